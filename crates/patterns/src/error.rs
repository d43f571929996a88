use std::fmt;

/// Error produced when a pattern cannot be compiled into a matcher.
#[derive(Debug)]
pub struct PatternError {
    pattern: String,
    kind: PatternErrorKind,
}

/// Classification of pattern compilation failures.
#[derive(Debug)]
pub enum PatternErrorKind {
    /// A path segment was rejected by the glob compiler.
    Glob(globset::Error),
}

impl PatternError {
    pub(crate) fn glob(pattern: impl Into<String>, source: globset::Error) -> Self {
        Self {
            pattern: pattern.into(),
            kind: PatternErrorKind::Glob(source),
        }
    }

    /// Returns the offending pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the specific failure.
    #[must_use]
    pub const fn kind(&self) -> &PatternErrorKind {
        &self.kind
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PatternErrorKind::Glob(source) => write!(
                f,
                "failed to compile glob pattern '{}': {}",
                self.pattern, source
            ),
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            PatternErrorKind::Glob(source) => Some(source),
        }
    }
}
