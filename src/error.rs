//! Error type returned by every resolution entry point.

use std::io;
use std::path::Path;

use patterns::PatternError;
use tokio::task;
use walk::WalkError;

/// Failure of one resolution call.
#[derive(Debug, thiserror::Error)]
pub enum GlobError {
    /// A pattern could not be compiled.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// A fatal I/O error ended the walk.
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// A blocking worker panicked or was cancelled by the runtime.
    #[error("task reader did not complete: {0}")]
    Join(#[from] task::JoinError),
}

impl GlobError {
    /// Path involved in a walk failure.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Walk(error) => Some(error.path()),
            Self::Pattern(_) | Self::Join(_) => None,
        }
    }

    /// Underlying I/O error of a walk failure.
    #[must_use]
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Walk(error) => Some(error.io_error()),
            Self::Pattern(_) | Self::Join(_) => None,
        }
    }
}
