use settings::Settings;
use walk::{ErrorPolicy, WalkError, WalkErrorKind};

/// Classifies walk failures as fatal or skippable.
///
/// With `suppress_errors` set nothing is fatal. Otherwise missing paths and
/// unreadable nested directories are skipped, broken symbolic links abort only
/// when `throw_error_on_broken_symbolic_link` is set, and everything else
/// aborts the call.
#[derive(Clone, Copy, Debug)]
pub struct ErrorFilter {
    suppress_errors: bool,
    throw_on_broken_symbolic_link: bool,
}

impl ErrorFilter {
    /// Captures the error options of `settings`.
    #[must_use]
    pub const fn new(settings: &Settings) -> Self {
        Self {
            suppress_errors: settings.suppress_errors(),
            throw_on_broken_symbolic_link: settings.throw_error_on_broken_symbolic_link(),
        }
    }

    /// Returns `true` when `error` must abort resolution.
    #[must_use]
    pub fn should_throw(&self, error: &WalkError) -> bool {
        if self.suppress_errors {
            return false;
        }
        match error.kind() {
            WalkErrorKind::BrokenSymlink { .. } => self.throw_on_broken_symbolic_link,
            _ if error.is_not_found() => false,
            WalkErrorKind::ReadDir { .. } | WalkErrorKind::Canonicalize { .. } => false,
            WalkErrorKind::ReadRoot { .. } | WalkErrorKind::Stat { .. } => true,
        }
    }
}

impl ErrorPolicy for ErrorFilter {
    fn is_fatal(&self, error: &WalkError) -> bool {
        self.should_throw(error)
    }
}
