#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `patterns` classifies and compiles the glob patterns handed to `globtree`.
//! Classification decides how a pattern is resolved: static patterns name a
//! single path and are checked with one `lstat`, while dynamic patterns need a
//! directory walk guided by a matcher.
//!
//! # Design
//!
//! - [`is_dynamic`], [`get_base_directory`], and the other free functions are
//!   pure string helpers used by task generation.
//! - [`GlobMatcher`] expands brace groups and `@(..)`/`?(..)` groups, then
//!   compiles each `/`-separated segment with [`globset`]. Segments holding
//!   repetition or negation groups get a small dedicated matcher instead. A
//!   segment-wise representation is what makes [`PatternMatcher::partial_matches`]
//!   possible, which the traversal uses to prune directories early.
//! - [`MatcherFactory`] is the seam for replacing the glob dialect.
//!
//! # Invariants
//!
//! - Without [`MatchOptions::dot`], wildcards and `**` never match a name
//!   starting with `.` unless the pattern segment itself starts with `.`.
//! - Matching never touches the filesystem.
//!
//! # Errors
//!
//! Compilation returns [`PatternError`] carrying the offending pattern and
//! the underlying [`globset::Error`].
//!
//! # Examples
//!
//! ```
//! use patterns::{GlobMatcherFactory, MatchOptions, MatcherFactory, is_dynamic};
//!
//! let options = MatchOptions::default();
//! assert!(is_dynamic("**/*.md", &options));
//! assert!(!is_dynamic("docs/readme.md", &options));
//!
//! let matcher = GlobMatcherFactory.compile("docs/*.md", &options).unwrap();
//! assert!(matcher.matches("docs/readme.md"));
//! assert!(!matcher.matches("docs/.hidden.md"));
//! ```

mod error;
mod expand;
mod extglob;
mod matcher;
mod segment;
mod utils;

pub use error::{PatternError, PatternErrorKind};
pub use expand::{expand_braces, expand_extglob};
pub use matcher::{
    GlobMatcher, GlobMatcherFactory, MatchOptions, MatcherFactory, PatternMatcher, compile_all,
    match_any,
};
pub use utils::{
    convert_to_negative, convert_to_positive, ends_with_globstar, escape, get_base_directory,
    is_absolute, is_dynamic, is_negative, is_positive, is_static, make_absolute,
    remove_leading_dot_segment, split_segments, strip_globstar_suffix, unescape, unixify,
};
