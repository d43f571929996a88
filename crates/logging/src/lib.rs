#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` centralises the diagnostics conventions shared by the globtree
//! workspace. Every crate logs through the [`tracing`] facade using a small
//! set of subsystem targets so callers can raise or silence one stage of the
//! resolution pipeline without touching the others.
//!
//! # Design
//!
//! - The `trace_*!` macros forward to the matching `tracing` macro with a
//!   fixed target (`globtree::tasks`, `globtree::walk`, `globtree::filter`,
//!   `globtree::provider`).
//! - [`Verbosity`] maps a coarse user-facing level onto an
//!   [`EnvFilter`](tracing_subscriber::EnvFilter) directive string.
//! - [`init_tracing`] installs a formatting subscriber for binaries and tests.
//!   Library code never installs a subscriber itself.
//!
//! # Examples
//!
//! ```
//! use logging::Verbosity;
//!
//! assert_eq!(Verbosity::from_level(0), Verbosity::Quiet);
//! assert!(Verbosity::Debug.directives().contains("globtree::walk=debug"));
//! ```

mod subscriber;
mod tracing_macros;
mod verbosity;

pub use subscriber::{init_tracing, try_init_tracing};
pub use verbosity::Verbosity;

/// Target used for task generation diagnostics.
pub const TASKS_TARGET: &str = "globtree::tasks";
/// Target used for directory traversal diagnostics.
pub const WALK_TARGET: &str = "globtree::walk";
/// Target used for entry, deep, and error filter diagnostics.
pub const FILTER_TARGET: &str = "globtree::filter";
/// Target used for provider and merge diagnostics.
pub const PROVIDER_TARGET: &str = "globtree::provider";

/// Every target emitted by the workspace, in pipeline order.
pub const ALL_TARGETS: [&str; 4] = [TASKS_TARGET, WALK_TARGET, FILTER_TARGET, PROVIDER_TARGET];
