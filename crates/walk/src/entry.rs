use std::fs;
use std::time::SystemTime;

/// File type as reported by a directory listing or stat call.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link that was not resolved.
    Symlink,
    /// Sockets, FIFOs, devices.
    Other,
}

impl From<fs::FileType> for EntryKind {
    fn from(file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// Type information for an entry.
///
/// `kind` is the resolved type when a symbolic link was followed, so a link
/// to a directory reports [`EntryKind::Directory`] with `symlink` set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Dirent {
    kind: EntryKind,
    symlink: bool,
}

impl Dirent {
    /// Creates type information.
    #[must_use]
    pub const fn new(kind: EntryKind, symlink: bool) -> Self {
        Self { kind, symlink }
    }

    /// Resolved file type.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Whether the entry is a file (or a followed link to one).
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File)
    }

    /// Whether the entry is a directory (or a followed link to one).
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    /// Whether the entry itself is a symbolic link.
    #[must_use]
    pub const fn is_symbolic_link(&self) -> bool {
        self.symlink || matches!(self.kind, EntryKind::Symlink)
    }
}

/// Metadata captured when `stats` is requested.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntryStats {
    kind: EntryKind,
    size: u64,
    modified: Option<SystemTime>,
    readonly: bool,
}

impl EntryStats {
    /// Creates metadata from raw parts.
    #[must_use]
    pub const fn new(
        kind: EntryKind,
        size: u64,
        modified: Option<SystemTime>,
        readonly: bool,
    ) -> Self {
        Self {
            kind,
            size,
            modified,
            readonly,
        }
    }

    /// File type of the stat result.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Last modification time, when the platform reports one.
    #[must_use]
    pub const fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Whether the entry is read-only.
    #[must_use]
    pub const fn readonly(&self) -> bool {
        self.readonly
    }
}

impl From<&fs::Metadata> for EntryStats {
    fn from(metadata: &fs::Metadata) -> Self {
        Self {
            kind: metadata.file_type().into(),
            size: metadata.len(),
            modified: metadata.modified().ok(),
            readonly: metadata.permissions().readonly(),
        }
    }
}

/// One filesystem object discovered while resolving a task.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    path: String,
    base_path: String,
    depth: usize,
    dirent: Dirent,
    stats: Option<EntryStats>,
}

impl Entry {
    /// Creates an entry without metadata.
    ///
    /// `path` uses `/` separators and is relative to the working directory
    /// unless the task base is absolute.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        base_path: impl Into<String>,
        depth: usize,
        dirent: Dirent,
    ) -> Self {
        Self {
            path: path.into(),
            base_path: base_path.into(),
            depth,
            dirent,
            stats: None,
        }
    }

    /// Attaches metadata.
    #[must_use]
    pub fn with_stats(mut self, stats: EntryStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Replaces the output path, keeping every other field.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// POSIX-style path of the entry.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Final path component.
    #[must_use]
    pub fn name(&self) -> &str {
        let trimmed = self.path.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }

    /// Base directory of the task that produced the entry.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Path segments below the task base; direct children are at depth 1.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Type information.
    #[must_use]
    pub const fn dirent(&self) -> &Dirent {
        &self.dirent
    }

    /// Metadata, present only when stats were requested.
    #[must_use]
    pub const fn stats(&self) -> Option<&EntryStats> {
        self.stats.as_ref()
    }

    /// Shorthand for `dirent().is_file()`.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        self.dirent.is_file()
    }

    /// Shorthand for `dirent().is_directory()`.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        self.dirent.is_directory()
    }

    /// Shorthand for `dirent().is_symbolic_link()`.
    #[must_use]
    pub const fn is_symbolic_link(&self) -> bool {
        self.dirent.is_symbolic_link()
    }

    /// Consumes the entry, returning its path.
    #[must_use]
    pub fn into_path(self) -> String {
        self.path
    }
}
