#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `globtree` resolves a list of glob patterns, negations included, against
//! the filesystem. Patterns are split into independent traversal tasks, each
//! task is read by a static or walking reader, and the raw entries pass
//! through one shared set of filters before they are returned.
//!
//! # Design
//!
//! The workspace keeps one concern per crate and this crate ties them
//! together:
//!
//! - `tasks` groups patterns into [`Task`]s rooted at their deepest static
//!   directory. Tasks whose patterns are exact paths are resolved with a
//!   single stat each.
//! - `walk` reads one task through the [`FileSystem`] abstraction.
//! - `filters` decides which entries are reported, which directories are
//!   entered and which errors abort the call.
//! - [`Glob`] runs the pipeline in three modes: lazily on the calling thread
//!   ([`Glob::iter`], [`Glob::collect`]), concurrently with a single
//!   collected result ([`Glob::run`]), or as a [`Stream`](futures::Stream)
//!   ([`Glob::stream`]).
//!
//! # Invariants
//!
//! - With `unique` set, no path is reported twice in one call, whichever
//!   tasks found it.
//! - No entry deeper than the `deep` limit is reported by a walking task.
//! - Each real directory is listed at most once per task when symbolic links
//!   are followed, so link cycles terminate.
//! - Collected results are ordered by task, then by discovery order.
//!
//! # Errors
//!
//! [`GlobError`] reports pattern compilation failures and fatal I/O errors.
//! Missing paths are never errors. Unreadable nested directories are skipped
//! with a warning on the `globtree::walk` target. Broken symbolic links are
//! fatal only when `throw_error_on_broken_symbolic_link` (or `stats`) is set,
//! and `suppress_errors` makes every I/O error non-fatal.
//!
//! # Examples
//!
//! ```
//! use globtree::{Options, glob_sync_paths};
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! std::fs::create_dir_all(temp.path().join("src/bin"))?;
//! std::fs::write(temp.path().join("src/lib.rs"), b"")?;
//! std::fs::write(temp.path().join("src/bin/cli.rs"), b"")?;
//! std::fs::write(temp.path().join("src/notes.md"), b"")?;
//!
//! let options = Options {
//!     cwd: Some(temp.path().to_path_buf()),
//!     ..Options::default()
//! };
//! let mut paths = glob_sync_paths(&["src/**/*.rs", "!**/bin/**"], options)?;
//! paths.sort();
//! assert_eq!(paths, ["src/lib.rs"]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod error;
mod provider;

pub use error::GlobError;
pub use filters::{DeepFilter, EntryFilter, EntryPredicate, ErrorFilter};
pub use logging::{Verbosity, init_tracing, try_init_tracing};
pub use patterns::{
    GlobMatcher, GlobMatcherFactory, MatchOptions, MatcherFactory, PatternError,
    PatternErrorKind, PatternMatcher, escape as escape_path, is_dynamic, unixify,
};
pub use provider::{Glob, GlobIter, GlobStream};
pub use settings::{Deep, Options, Settings};
pub use tasks::Task;
pub use walk::{
    CancelFlag, DirEntryInfo, Dirent, Entry, EntryKind, EntryStats, FileSystem, LocalFileSystem,
    WalkError, WalkErrorKind,
};

fn build<S: AsRef<str>>(patterns: &[S], options: Options) -> Glob {
    Glob::new(patterns.iter().map(|pattern| pattern.as_ref().to_owned())).with_options(options)
}

/// Splits `patterns` into the traversal tasks a call would run.
#[must_use]
pub fn generate_tasks<S: AsRef<str>>(patterns: &[S], options: Options) -> Vec<Task> {
    tasks::generate(patterns, &Settings::new(options))
}

/// Returns `true` when `pattern` needs a directory walk to resolve.
#[must_use]
pub fn is_dynamic_pattern(pattern: &str, options: Options) -> bool {
    is_dynamic(pattern, &Settings::new(options).match_options())
}

/// Resolves `patterns` on the calling thread.
pub fn glob_sync<S: AsRef<str>>(patterns: &[S], options: Options) -> Result<Vec<Entry>, GlobError> {
    build(patterns, options).collect()
}

/// Resolves `patterns` on the calling thread and maps each entry.
pub fn glob_sync_with<S, T, F>(
    patterns: &[S],
    options: Options,
    transform: F,
) -> Result<Vec<T>, GlobError>
where
    S: AsRef<str>,
    F: FnMut(Entry) -> T,
{
    build(patterns, options).collect_with(transform)
}

/// Resolves `patterns` on the calling thread, returning output paths only.
pub fn glob_sync_paths<S: AsRef<str>>(
    patterns: &[S],
    options: Options,
) -> Result<Vec<String>, GlobError> {
    glob_sync_with(patterns, options, Entry::into_path)
}

/// Iterates the matches of `patterns` lazily on the calling thread.
#[must_use]
pub fn glob_iter<S: AsRef<str>>(patterns: &[S], options: Options) -> GlobIter {
    build(patterns, options).iter()
}

/// Resolves `patterns` concurrently on Tokio's blocking pool.
pub async fn glob<S: AsRef<str>>(patterns: &[S], options: Options) -> Result<Vec<Entry>, GlobError> {
    build(patterns, options).run().await
}

/// Resolves `patterns` concurrently and maps each entry.
pub async fn glob_with<S, T, F>(
    patterns: &[S],
    options: Options,
    transform: F,
) -> Result<Vec<T>, GlobError>
where
    S: AsRef<str>,
    F: FnMut(Entry) -> T,
{
    build(patterns, options).run_with(transform).await
}

/// Resolves `patterns` concurrently, returning output paths only.
pub async fn glob_paths<S: AsRef<str>>(
    patterns: &[S],
    options: Options,
) -> Result<Vec<String>, GlobError> {
    glob_with(patterns, options, Entry::into_path).await
}

/// Streams the matches of `patterns`.
///
/// # Panics
///
/// Panics when called outside a Tokio runtime.
#[must_use]
pub fn glob_stream<S: AsRef<str>>(
    patterns: &[S],
    options: Options,
) -> GlobStream<fn(Entry) -> Entry> {
    build(patterns, options).stream()
}

/// Streams the matches of `patterns`, mapping each entry as it is received.
///
/// # Panics
///
/// Panics when called outside a Tokio runtime.
pub fn glob_stream_with<S, T, F>(patterns: &[S], options: Options, transform: F) -> GlobStream<F>
where
    S: AsRef<str>,
    F: FnMut(Entry) -> T,
{
    build(patterns, options).stream_with(transform)
}
