#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` produces the raw entries for one glob task. A static task is
//! resolved with one `lstat` per exact path; a dynamic task is walked
//! depth-first below its base directory. Readers are plain [`Iterator`]s so
//! they can run on a blocking worker and be pulled lazily.
//!
//! # Design
//!
//! - [`FileSystem`] abstracts directory listing and stat calls.
//!   [`LocalFileSystem`] sorts listings by name so a run is deterministic.
//! - [`ReaderBuilder`] captures the per-call configuration (working
//!   directory, symbolic link handling, metadata collection, cancellation)
//!   and hands out [`StaticReader`]s and [`DynamicReader`]s.
//! - A [`DescendFilter`] decides which directories are listed and an
//!   [`ErrorPolicy`] decides which failures abort the call. Both are traits
//!   so the filtering crate can plug in without this crate knowing about
//!   patterns.
//! - The walk keeps an explicit stack of open listings instead of recursing,
//!   so deep trees never grow the call stack.
//!
//! # Invariants
//!
//! - Entry paths use `/` separators and start with the task base (omitted
//!   when the base is `.`).
//! - Direct children of the base have depth 1.
//! - Once a fatal error is yielded, or the [`CancelFlag`] is raised, the
//!   reader yields nothing further and issues no more I/O.
//!
//! # Errors
//!
//! [`WalkError`] carries the failing path and the underlying [`std::io::Error`].
//! Errors the policy deems non-fatal are logged under the `globtree::walk`
//! target and the affected subtree is skipped.
//!
//! # Examples
//!
//! ```
//! use std::fs;
//! use walk::{Entry, ReaderBuilder, WalkError};
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! fs::create_dir(temp.path().join("src"))?;
//! fs::write(temp.path().join("src/lib.rs"), b"")?;
//!
//! let reader = ReaderBuilder::new(temp.path()).build_dynamic(
//!     ".",
//!     |_: &Entry| true,
//!     |_: &WalkError| true,
//! );
//! let paths = reader
//!     .map(|entry| entry.map(Entry::into_path))
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! assert_eq!(paths, ["src", "src/lib.rs"]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod entry;
mod error;
mod fs;
mod reader;

pub use builder::ReaderBuilder;
pub use entry::{Dirent, Entry, EntryKind, EntryStats};
pub use error::{WalkError, WalkErrorKind};
pub use fs::{DirEntryInfo, FileSystem, LocalFileSystem};
pub use reader::{CancelFlag, DescendFilter, DynamicReader, ErrorPolicy, Reader, StaticReader};
