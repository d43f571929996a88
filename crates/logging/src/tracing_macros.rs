//! Convenience macros for globtree tracing.
//!
//! These macros provide ergonomic wrappers around standard tracing macros
//! with appropriate targets for each pipeline stage.

/// Emit a task generation trace.
///
/// # Example
/// ```ignore
/// trace_tasks!("generated {} tasks", tasks.len());
/// ```
#[macro_export]
macro_rules! trace_tasks {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "globtree::tasks", $($arg)*);
    };
}

/// Emit a directory traversal trace.
///
/// # Example
/// ```ignore
/// trace_walk!("reading directory {}", path.display());
/// ```
#[macro_export]
macro_rules! trace_walk {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "globtree::walk", $($arg)*);
    };
}

/// Emit a filter decision trace.
///
/// # Example
/// ```ignore
/// trace_filter!("pruned directory {}", entry.path());
/// ```
#[macro_export]
macro_rules! trace_filter {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "globtree::filter", $($arg)*);
    };
}

/// Emit a provider trace.
///
/// # Example
/// ```ignore
/// trace_provider!("task {} finished with {} entries", index, count);
/// ```
#[macro_export]
macro_rules! trace_provider {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "globtree::provider", $($arg)*);
    };
}

/// Report an I/O failure that was swallowed instead of aborting resolution.
///
/// # Example
/// ```ignore
/// warn_skipped!(path = %dir.display(), error = %err, "skipping unreadable directory");
/// ```
#[macro_export]
macro_rules! warn_skipped {
    ($($arg:tt)*) => {
        ::tracing::warn!(target: "globtree::walk", $($arg)*);
    };
}
