//! crates/logging/src/verbosity.rs
//! Coarse verbosity levels mapped onto tracing filter directives.

use crate::ALL_TARGETS;

/// User-facing verbosity level.
///
/// Each level enables progressively more detail for the globtree targets.
/// Levels are ordered, so `Verbosity::Debug > Verbosity::Normal` holds.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Verbosity {
    /// Only errors.
    Quiet,
    /// Errors and warnings about skipped paths.
    #[default]
    Normal,
    /// Adds task generation and provider summaries.
    Verbose,
    /// Adds per-directory traversal details.
    Debug,
    /// Everything, including individual filter decisions.
    Trace,
}

impl Verbosity {
    /// Maps a `-v` style counter onto a level. Values past the last level saturate.
    #[must_use]
    pub const fn from_level(level: u8) -> Self {
        match level {
            0 => Self::Quiet,
            1 => Self::Normal,
            2 => Self::Verbose,
            3 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// The tracing level name applied to every globtree target.
    #[must_use]
    pub const fn level_name(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Builds an `EnvFilter` directive string covering all globtree targets.
    #[must_use]
    pub fn directives(self) -> String {
        let level = self.level_name();
        let mut directives = String::from(level);
        for target in ALL_TARGETS {
            directives.push(',');
            directives.push_str(target);
            directives.push('=');
            directives.push_str(level);
        }
        directives
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_saturate_at_trace() {
        assert_eq!(Verbosity::from_level(4), Verbosity::Trace);
        assert_eq!(Verbosity::from_level(200), Verbosity::Trace);
    }

    #[test]
    fn directives_start_with_global_level() {
        let directives = Verbosity::Quiet.directives();
        assert!(directives.starts_with("error,"));
        assert_eq!(directives.matches("=error").count(), ALL_TARGETS.len());
    }

    #[test]
    fn default_is_normal() {
        assert_eq!(Verbosity::default(), Verbosity::Normal);
        assert_eq!(Verbosity::default().level_name(), "warn");
    }
}
