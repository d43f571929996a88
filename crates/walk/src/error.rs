use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Error raised while reading a task's subtree.
#[derive(Debug)]
pub struct WalkError {
    kind: WalkErrorKind,
}

impl WalkError {
    pub(crate) fn new(kind: WalkErrorKind) -> Self {
        Self { kind }
    }

    /// Failure listing the task base directory.
    pub fn read_root(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::ReadRoot { path, source })
    }

    /// Failure listing a directory below the task base.
    pub fn read_dir(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::ReadDir { path, source })
    }

    /// Failure querying an entry's metadata.
    pub fn stat(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::Stat { path, source })
    }

    /// A symbolic link whose target does not exist.
    pub fn broken_symlink(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::BrokenSymlink { path, source })
    }

    /// Failure resolving a directory's real path for cycle detection.
    pub fn canonicalize(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::Canonicalize { path, source })
    }

    /// Returns the specific failure.
    #[must_use]
    pub fn kind(&self) -> &WalkErrorKind {
        &self.kind
    }

    /// Returns the filesystem path associated with the error.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    /// use std::path::{Path, PathBuf};
    /// use walk::WalkError;
    ///
    /// let error = WalkError::read_dir(
    ///     PathBuf::from("locked"),
    ///     io::Error::from(io::ErrorKind::PermissionDenied),
    /// );
    /// assert_eq!(error.path(), Path::new("locked"));
    /// assert!(!error.is_not_found());
    /// ```
    #[must_use]
    pub fn path(&self) -> &Path {
        self.kind.path()
    }

    /// Returns the underlying I/O error.
    #[must_use]
    pub fn io_error(&self) -> &io::Error {
        self.kind.io_error()
    }

    /// Whether the path vanished or never existed.
    ///
    /// A component that is not a directory counts as missing too.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.io_error().kind(),
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
        )
    }
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WalkErrorKind::ReadRoot { path, source } => {
                write!(
                    f,
                    "failed to read base directory '{}': {}",
                    path.display(),
                    source
                )
            }
            WalkErrorKind::ReadDir { path, source } => {
                write!(
                    f,
                    "failed to read directory '{}': {}",
                    path.display(),
                    source
                )
            }
            WalkErrorKind::Stat { path, source } => {
                write!(
                    f,
                    "failed to inspect metadata for '{}': {}",
                    path.display(),
                    source
                )
            }
            WalkErrorKind::BrokenSymlink { path, source } => {
                write!(
                    f,
                    "broken symbolic link '{}': {}",
                    path.display(),
                    source
                )
            }
            WalkErrorKind::Canonicalize { path, source } => {
                write!(f, "failed to canonicalize '{}': {}", path.display(), source)
            }
        }
    }
}

impl Error for WalkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.kind.io_error())
    }
}

/// Classification of traversal failures.
#[derive(Debug)]
pub enum WalkErrorKind {
    /// Failed to list the task base directory.
    ReadRoot {
        /// Base directory that could not be listed.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to list a nested directory.
    ReadDir {
        /// Directory whose contents could not be read.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to query metadata for an entry.
    Stat {
        /// Path whose metadata could not be retrieved.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// A symbolic link points at a missing target.
    BrokenSymlink {
        /// The link itself.
        path: PathBuf,
        /// Error returned when following the link.
        source: io::Error,
    },
    /// Failed to resolve the real path of a directory.
    Canonicalize {
        /// Directory path that failed to canonicalize.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
}

impl WalkErrorKind {
    /// Returns the filesystem path tied to the failure.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::ReadRoot { path, .. }
            | Self::ReadDir { path, .. }
            | Self::Stat { path, .. }
            | Self::BrokenSymlink { path, .. }
            | Self::Canonicalize { path, .. } => path,
        }
    }

    /// Returns the underlying I/O error.
    #[must_use]
    pub fn io_error(&self) -> &io::Error {
        match self {
            Self::ReadRoot { source, .. }
            | Self::ReadDir { source, .. }
            | Self::Stat { source, .. }
            | Self::BrokenSymlink { source, .. }
            | Self::Canonicalize { source, .. } => source,
        }
    }
}
