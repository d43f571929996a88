//! Temporary directory trees for tests.
//!
//! [`FixtureTree`] owns a [`tempfile::TempDir`] and offers chained helpers
//! for laying out files, directories, and symbolic links relative to it. All
//! helpers panic on failure since they only run inside tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory removed when dropped.
#[derive(Debug)]
pub struct FixtureTree {
    temp_dir: TempDir,
}

impl FixtureTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Creates a tree from slash-separated paths. Paths ending in `/` become
    /// directories, everything else an empty file.
    #[must_use]
    pub fn with_paths(paths: &[&str]) -> Self {
        let tree = Self::new();
        for path in paths {
            if let Some(dir) = path.strip_suffix('/') {
                tree.dir(dir);
            } else {
                tree.file(path);
            }
        }
        tree
    }

    /// Root of the tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the tree.
    #[must_use]
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Creates a directory and its parents.
    pub fn dir(&self, relative: &str) -> &Self {
        fs::create_dir_all(self.path(relative)).expect("create fixture dir");
        self
    }

    /// Creates an empty file, creating parent directories as needed.
    pub fn file(&self, relative: &str) -> &Self {
        self.write(relative, b"")
    }

    /// Creates a file with `contents`.
    pub fn write(&self, relative: &str, contents: &[u8]) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture parent");
        }
        fs::write(&path, contents).expect("write fixture file");
        self
    }

    /// Creates a symbolic link at `link` pointing to `target` verbatim.
    #[cfg(unix)]
    pub fn symlink(&self, target: &str, link: &str) -> &Self {
        let path = self.path(link);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture parent");
        }
        std::os::unix::fs::symlink(target, &path).expect("create fixture symlink");
        self
    }

    /// Root as a `/`-separated string.
    #[must_use]
    pub fn root_posix(&self) -> String {
        self.root().to_string_lossy().replace('\\', "/")
    }
}

impl Default for FixtureTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Sorts and returns `paths`, for comparing unordered results.
#[must_use]
pub fn sorted<S: Into<String>>(paths: impl IntoIterator<Item = S>) -> Vec<String> {
    let mut paths: Vec<String> = paths.into_iter().map(Into::into).collect();
    paths.sort();
    paths
}
