//! Fixture options and instrumented directory providers.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use globtree::{DirEntryInfo, EntryStats, FileSystem, LocalFileSystem, Options};
use test_support::FixtureTree;

/// Default options rooted at `tree`.
pub fn options_for(tree: &FixtureTree) -> Options {
    Options {
        cwd: Some(tree.root().to_path_buf()),
        ..Options::default()
    }
}

/// Local provider that counts directory listings.
#[derive(Debug, Default)]
pub struct CountingFileSystem {
    listings: AtomicUsize,
}

impl CountingFileSystem {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn listings(&self) -> usize {
        self.listings.load(Ordering::SeqCst)
    }
}

impl FileSystem for CountingFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
        self.listings.fetch_add(1, Ordering::SeqCst);
        LocalFileSystem.read_dir(path)
    }

    fn stat(&self, path: &Path, follow: bool) -> io::Result<EntryStats> {
        LocalFileSystem.stat(path, follow)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        LocalFileSystem.canonicalize(path)
    }
}

/// Local provider that refuses to list one directory.
#[derive(Debug)]
pub struct LockedFileSystem {
    locked: PathBuf,
}

impl LockedFileSystem {
    pub fn shared(locked: PathBuf) -> Arc<Self> {
        Arc::new(Self { locked })
    }
}

impl FileSystem for LockedFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
        if path == self.locked {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        LocalFileSystem.read_dir(path)
    }

    fn stat(&self, path: &Path, follow: bool) -> io::Result<EntryStats> {
        LocalFileSystem.stat(path, follow)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        LocalFileSystem.canonicalize(path)
    }
}
