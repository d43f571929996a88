#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `settings` holds the option bag accepted by `globtree` and the normalised,
//! read-only [`Settings`] derived from it for one resolution call.
//!
//! # Design
//!
//! - [`Options`] is a plain struct with public fields so callers can use
//!   struct-update syntax over [`Options::default`]. With the `serde` feature
//!   it loads from configuration files using camelCase keys.
//! - [`Settings::new`] resolves interdependent options once: `only_directories`
//!   clears `only_files`, `stats` forces broken symbolic links to be fatal,
//!   and a missing `cwd` is replaced with the process working directory.
//!
//! # Examples
//!
//! ```
//! use settings::{Deep, Options, Settings};
//!
//! let settings = Settings::new(Options {
//!     only_directories: true,
//!     deep: Deep::from(2_usize),
//!     ..Options::default()
//! });
//!
//! assert!(!settings.only_files());
//! assert!(settings.only_directories());
//! assert_eq!(settings.deep().limit(), Some(2));
//! ```

mod deep;

use std::env;
use std::path::{Path, PathBuf};

use patterns::{MatchOptions, unixify};

pub use deep::Deep;

/// User-facing options for one resolution call.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Options {
    /// Directory patterns are resolved against. Defaults to the process
    /// working directory.
    pub cwd: Option<PathBuf>,
    /// Recursion limit below each task base.
    pub deep: Deep,
    /// Extra patterns to exclude, treated as negatives.
    pub ignore: Vec<String>,
    /// Let wildcards match names starting with `.`.
    pub dot: bool,
    /// Attach metadata to every emitted entry.
    pub stats: bool,
    /// Emit only files.
    pub only_files: bool,
    /// Emit only directories. Overrides `only_files`.
    pub only_directories: bool,
    /// Descend into symbolic links to directories.
    pub follow_symbolic_links: bool,
    /// Fail the call when a symbolic link points nowhere.
    pub throw_error_on_broken_symbolic_link: bool,
    /// Swallow every I/O error.
    pub suppress_errors: bool,
    /// Emit each path at most once per call.
    pub unique: bool,
    /// Append `/` to emitted directory paths.
    pub mark_directories: bool,
    /// Emit absolute paths.
    pub absolute: bool,
    /// Match slash-free patterns against base names.
    pub base_name_match: bool,
    /// Expand `{a,b}` groups.
    pub brace: bool,
    /// Treat `**` as any number of directories.
    pub globstar: bool,
    /// Accept `@(a|b)` and `?(a|b)` groups.
    pub extglob: bool,
    /// Compare names case-sensitively.
    pub case_sensitive_match: bool,
    /// Upper bound on concurrently running task readers. `None` is unbounded.
    pub concurrency: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            cwd: None,
            deep: Deep::Unlimited,
            ignore: Vec::new(),
            dot: false,
            stats: false,
            only_files: true,
            only_directories: false,
            follow_symbolic_links: true,
            throw_error_on_broken_symbolic_link: false,
            suppress_errors: false,
            unique: true,
            mark_directories: false,
            absolute: false,
            base_name_match: false,
            brace: true,
            globstar: true,
            extglob: true,
            case_sensitive_match: true,
            concurrency: None,
        }
    }
}

/// Normalised options, immutable for the duration of one call.
#[derive(Clone, Debug)]
pub struct Settings {
    cwd: PathBuf,
    cwd_posix: String,
    deep: Deep,
    ignore: Vec<String>,
    dot: bool,
    stats: bool,
    only_files: bool,
    only_directories: bool,
    follow_symbolic_links: bool,
    throw_error_on_broken_symbolic_link: bool,
    suppress_errors: bool,
    unique: bool,
    mark_directories: bool,
    absolute: bool,
    base_name_match: bool,
    brace: bool,
    globstar: bool,
    extglob: bool,
    case_sensitive_match: bool,
    concurrency: Option<usize>,
}

impl Settings {
    /// Normalises `options`.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let cwd = options
            .cwd
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        let cwd_posix = unixify(&cwd.to_string_lossy());

        Self {
            cwd,
            cwd_posix,
            deep: options.deep,
            ignore: options.ignore,
            dot: options.dot,
            stats: options.stats,
            only_files: options.only_files && !options.only_directories,
            only_directories: options.only_directories,
            follow_symbolic_links: options.follow_symbolic_links,
            throw_error_on_broken_symbolic_link: options.throw_error_on_broken_symbolic_link
                || options.stats,
            suppress_errors: options.suppress_errors,
            unique: options.unique,
            mark_directories: options.mark_directories,
            absolute: options.absolute,
            base_name_match: options.base_name_match,
            brace: options.brace,
            globstar: options.globstar,
            extglob: options.extglob,
            case_sensitive_match: options.case_sensitive_match,
            concurrency: options.concurrency.filter(|limit| *limit > 0),
        }
    }

    /// Working directory as a native path.
    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Working directory with `/` separators, used to build absolute output paths.
    #[must_use]
    pub fn cwd_posix(&self) -> &str {
        &self.cwd_posix
    }

    /// Recursion limit.
    #[must_use]
    pub const fn deep(&self) -> Deep {
        self.deep
    }

    /// Ignore patterns as supplied.
    #[must_use]
    pub fn ignore(&self) -> &[String] {
        &self.ignore
    }

    /// Whether wildcards match dot-files.
    #[must_use]
    pub const fn dot(&self) -> bool {
        self.dot
    }

    /// Whether entries carry metadata.
    #[must_use]
    pub const fn stats(&self) -> bool {
        self.stats
    }

    /// Whether only files are emitted.
    #[must_use]
    pub const fn only_files(&self) -> bool {
        self.only_files
    }

    /// Whether only directories are emitted.
    #[must_use]
    pub const fn only_directories(&self) -> bool {
        self.only_directories
    }

    /// Whether symbolic links to directories are walked.
    #[must_use]
    pub const fn follow_symbolic_links(&self) -> bool {
        self.follow_symbolic_links
    }

    /// Whether a broken symbolic link aborts the call.
    #[must_use]
    pub const fn throw_error_on_broken_symbolic_link(&self) -> bool {
        self.throw_error_on_broken_symbolic_link
    }

    /// Whether every I/O error is swallowed.
    #[must_use]
    pub const fn suppress_errors(&self) -> bool {
        self.suppress_errors
    }

    /// Whether duplicate paths are dropped.
    #[must_use]
    pub const fn unique(&self) -> bool {
        self.unique
    }

    /// Whether directory paths get a trailing `/`.
    #[must_use]
    pub const fn mark_directories(&self) -> bool {
        self.mark_directories
    }

    /// Whether emitted paths are absolute.
    #[must_use]
    pub const fn absolute(&self) -> bool {
        self.absolute
    }

    /// Whether slash-free patterns match base names.
    #[must_use]
    pub const fn base_name_match(&self) -> bool {
        self.base_name_match
    }

    /// Whether matching is case-sensitive.
    #[must_use]
    pub const fn case_sensitive_match(&self) -> bool {
        self.case_sensitive_match
    }

    /// Concurrency bound for async and stream modes.
    #[must_use]
    pub const fn concurrency(&self) -> Option<usize> {
        self.concurrency
    }

    /// Glob dialect derived from these settings.
    #[must_use]
    pub const fn match_options(&self) -> MatchOptions {
        MatchOptions {
            dot: self.dot,
            case_sensitive: self.case_sensitive_match,
            brace: self.brace,
            globstar: self.globstar,
            extglob: self.extglob,
            base_name_match: self.base_name_match,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
