use std::fmt;

use crate::PatternError;
use crate::expand::{expand_braces, expand_extglob};
use crate::segment::{CompiledPattern, split_path};

/// Glob dialect switches shared by every compiled pattern.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MatchOptions {
    /// Let wildcards and globstars match names starting with `.`.
    pub dot: bool,
    /// Compare names case-sensitively.
    pub case_sensitive: bool,
    /// Expand `{a,b}` and `{1..3}` groups.
    pub brace: bool,
    /// Treat a `**` segment as any number of directories.
    pub globstar: bool,
    /// Accept `@(..)`, `?(..)`, `*(..)`, `+(..)`, and `!(..)` groups.
    pub extglob: bool,
    /// Match slash-free patterns against the final path component only.
    pub base_name_match: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            dot: false,
            case_sensitive: true,
            brace: true,
            globstar: true,
            extglob: true,
            base_name_match: false,
        }
    }
}

/// A compiled pattern able to answer full and partial path matches.
///
/// Paths are POSIX-style and relative to the task base unless the pattern
/// itself is absolute. A trailing `/` on the tested path marks it as a
/// directory.
pub trait PatternMatcher: fmt::Debug + Send + Sync {
    /// Source text the matcher was compiled from.
    fn pattern(&self) -> &str;

    /// Returns `true` when `path` matches the whole pattern.
    fn matches(&self, path: &str) -> bool;

    /// Returns `true` when an entry below the directory `path` could match.
    fn partial_matches(&self, path: &str) -> bool;
}

/// Builds [`PatternMatcher`]s. Swappable so callers can plug in another glob dialect.
pub trait MatcherFactory: fmt::Debug + Send + Sync {
    /// Compiles one positive pattern.
    fn compile(
        &self,
        pattern: &str,
        options: &MatchOptions,
    ) -> Result<Box<dyn PatternMatcher>, PatternError>;
}

/// Default matcher: brace and extglob expansion over segment-wise matching.
#[derive(Debug)]
pub struct GlobMatcher {
    pattern: String,
    alternatives: Vec<CompiledPattern>,
    base_name_only: bool,
}

impl GlobMatcher {
    /// Compiles `pattern` under `options`.
    ///
    /// # Examples
    ///
    /// ```
    /// use patterns::{GlobMatcher, MatchOptions, PatternMatcher};
    ///
    /// let matcher = GlobMatcher::new("src/**/*.{rs,toml}", &MatchOptions::default()).unwrap();
    /// assert!(matcher.matches("src/lib.rs"));
    /// assert!(matcher.matches("src/nested/Cargo.toml"));
    /// assert!(!matcher.matches("tests/lib.rs"));
    /// assert!(matcher.partial_matches("src/nested"));
    /// ```
    pub fn new(pattern: &str, options: &MatchOptions) -> Result<Self, PatternError> {
        let expanded = if options.brace {
            expand_braces(pattern)
        } else {
            vec![pattern.to_owned()]
        };
        let expanded: Vec<String> = if options.extglob {
            expanded
                .iter()
                .flat_map(|alternative| expand_extglob(alternative))
                .collect()
        } else {
            expanded
        };

        let alternatives = expanded
            .iter()
            .map(|alternative| CompiledPattern::compile(pattern, alternative, options))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            pattern: pattern.to_owned(),
            alternatives,
            base_name_only: options.base_name_match && !pattern.contains('/'),
        })
    }
}

impl PatternMatcher for GlobMatcher {
    fn pattern(&self) -> &str {
        &self.pattern
    }

    fn matches(&self, path: &str) -> bool {
        let is_dir = path.ends_with('/');
        let parts = split_path(path);
        let parts = if self.base_name_only {
            parts.last().map_or(&[][..], std::slice::from_ref)
        } else {
            &parts[..]
        };
        self.alternatives
            .iter()
            .any(|alternative| alternative.matches(parts, is_dir))
    }

    fn partial_matches(&self, path: &str) -> bool {
        if self.base_name_only {
            return true;
        }
        let parts = split_path(path);
        self.alternatives
            .iter()
            .any(|alternative| alternative.partial_matches(&parts))
    }
}

/// Factory for [`GlobMatcher`].
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobMatcherFactory;

impl MatcherFactory for GlobMatcherFactory {
    fn compile(
        &self,
        pattern: &str,
        options: &MatchOptions,
    ) -> Result<Box<dyn PatternMatcher>, PatternError> {
        Ok(Box::new(GlobMatcher::new(pattern, options)?))
    }
}

/// Compiles every pattern with `factory`, stopping at the first failure.
pub fn compile_all<S: AsRef<str>>(
    factory: &dyn MatcherFactory,
    patterns: &[S],
    options: &MatchOptions,
) -> Result<Vec<Box<dyn PatternMatcher>>, PatternError> {
    patterns
        .iter()
        .map(|pattern| factory.compile(pattern.as_ref(), options))
        .collect()
}

/// Returns `true` when any matcher fully matches `path`.
pub fn match_any(matchers: &[Box<dyn PatternMatcher>], path: &str) -> bool {
    matchers.iter().any(|matcher| matcher.matches(path))
}
