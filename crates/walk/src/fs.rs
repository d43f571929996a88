use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::entry::{EntryKind, EntryStats};

/// One child returned by [`FileSystem::read_dir`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DirEntryInfo {
    /// File name, lossily converted to UTF-8.
    pub name: String,
    /// Type without following symbolic links.
    pub kind: EntryKind,
}

impl DirEntryInfo {
    /// Creates a listing record.
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Directory provider consumed by the readers.
///
/// Implementations must be usable from several blocking worker threads at
/// once.
pub trait FileSystem: fmt::Debug + Send + Sync {
    /// Lists the immediate children of `path`.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>>;

    /// Queries metadata, following a final symbolic link when `follow` is set.
    fn stat(&self, path: &Path, follow: bool) -> io::Result<EntryStats>;

    /// Resolves `path` to its real location.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

/// [`FileSystem`] backed by `std::fs`.
///
/// Listings are sorted by name so traversal order is stable across runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let kind = match entry.file_type() {
                Ok(file_type) => file_type.into(),
                Err(error) if error.kind() == io::ErrorKind::NotFound => continue,
                Err(error) => return Err(error),
            };
            entries.push(DirEntryInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }
        entries.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(entries)
    }

    fn stat(&self, path: &Path, follow: bool) -> io::Result<EntryStats> {
        let metadata = if follow {
            fs::metadata(path)?
        } else {
            fs::symlink_metadata(path)?
        };
        Ok(EntryStats::from(&metadata))
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }
}
