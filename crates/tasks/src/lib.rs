#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `tasks` turns a list of positive and negative glob patterns into
//! independent traversal jobs. Each [`Task`] is rooted at the deepest static
//! directory its patterns share, so the traversal never lists directories no
//! pattern can reach.
//!
//! # Design
//!
//! - Positives are grouped by [`patterns::get_base_directory`] in first-seen
//!   order. A dynamic pattern rooted at `.` collapses every pattern inside the
//!   working directory into one task at `.`.
//! - Negatives from the input come first, then `ignore` entries. A negative is
//!   attached to a task only when its own base lies on the same path as the
//!   task base, or when it is rooted at `.` or absolute.
//! - A task without attached negatives whose positives are all static is a
//!   static task: the reader stats each path instead of walking.
//!
//! # Invariants
//!
//! - Tasks partition the positives: every positive pattern lands in exactly
//!   one task.
//! - Disabling case-sensitive matching makes every task dynamic.
//!
//! # Examples
//!
//! ```
//! use settings::Settings;
//!
//! let tasks = tasks::generate(&["a/file.json"], &Settings::default());
//! assert_eq!(tasks.len(), 1);
//! assert!(!tasks[0].is_dynamic());
//! assert!(tasks[0].negative().is_empty());
//! ```

mod generator;
mod task;

pub use generator::{
    PatternGroups, convert_pattern_group_to_task, convert_pattern_groups_to_tasks,
    convert_patterns_to_tasks, generate, get_negative_patterns_as_positive, get_positive_patterns,
    group_patterns_by_base_directory, negative_applies_to_base,
};
pub use task::{Task, normalize_base};

#[cfg(test)]
mod tests;
