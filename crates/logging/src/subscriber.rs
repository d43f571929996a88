//! crates/logging/src/subscriber.rs
//! Installation of a formatting subscriber for binaries and tests.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::Verbosity;

fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directives()))
}

/// Installs a global formatting subscriber.
///
/// `RUST_LOG` takes precedence over `verbosity` when it is set. Returns an
/// error if a global subscriber was already installed.
pub fn try_init_tracing(verbosity: Verbosity) -> Result<(), TryInitError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish()
        .try_init()
}

/// Installs a global formatting subscriber, ignoring repeated initialisation.
pub fn init_tracing(verbosity: Verbosity) {
    let _ = try_init_tracing(verbosity);
}
