#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` holds the three decisions made while a glob task is read: which
//! entries are reported ([`EntryFilter`]), which directories are listed
//! ([`DeepFilter`]) and which failures abort the call ([`ErrorFilter`]).
//!
//! # Design
//!
//! - [`EntryFilter`] is created once per call and hands out an
//!   [`EntryPredicate`] per task. The predicates share a concurrent index of
//!   reported paths so deduplication holds across tasks running on different
//!   workers.
//! - [`DeepFilter`] implements [`walk::DescendFilter`]; it owns the set of
//!   real directories already entered by its task.
//! - [`ErrorFilter`] implements [`walk::ErrorPolicy`].
//!
//! # Invariants
//!
//! - Entries are tested with `/` separators and without a leading `./`.
//!   Directories are tested with a trailing `/` so directory-only patterns
//!   (`dir/`) apply to them.
//! - Patterns that are absolute are always tested against the entry path
//!   joined onto the working directory.
//! - A negative match always wins over a positive one.
//!
//! # Errors
//!
//! Building a predicate or a deep filter compiles patterns and reports the
//! first [`patterns::PatternError`].
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use filters::EntryFilter;
//! use patterns::GlobMatcherFactory;
//! use settings::{Options, Settings};
//! use walk::{Dirent, Entry, EntryKind};
//!
//! let settings = Settings::new(Options {
//!     cwd: Some("/project".into()),
//!     ..Options::default()
//! });
//! let filter = EntryFilter::new(&settings, Arc::new(GlobMatcherFactory));
//! let predicate = filter.build(&["src/**/*.rs"], &["src/generated/**"]).unwrap();
//!
//! let file = |path: &str| Entry::new(path, "src", 2, Dirent::new(EntryKind::File, false));
//! assert!(predicate.accepts(&file("src/lib.rs")));
//! assert!(!predicate.accepts(&file("src/generated/api.rs")));
//! assert!(!predicate.accepts(&file("src/lib.rs")));
//! ```

mod deep;
mod entry;
mod error;
mod scoped;

pub use deep::DeepFilter;
pub use entry::{EntryFilter, EntryPredicate};
pub use error::ErrorFilter;
