use std::path::PathBuf;
use std::sync::Arc;

use crate::fs::{FileSystem, LocalFileSystem};
use crate::reader::{
    CancelFlag, DescendFilter, DynamicReader, ErrorPolicy, Reader, ReaderContext, StaticReader,
};

/// Configures the readers created for one resolution call.
#[derive(Clone, Debug)]
pub struct ReaderBuilder {
    cwd: PathBuf,
    file_system: Arc<dyn FileSystem>,
    follow_symbolic_links: bool,
    stats: bool,
    max_depth: Option<usize>,
    cancel: CancelFlag,
}

impl ReaderBuilder {
    /// Creates a builder resolving task bases against `cwd`.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(cwd: P) -> Self {
        Self {
            cwd: cwd.into(),
            file_system: Arc::new(LocalFileSystem),
            follow_symbolic_links: true,
            stats: false,
            max_depth: None,
            cancel: CancelFlag::new(),
        }
    }

    /// Replaces the directory provider.
    #[must_use]
    pub fn file_system(mut self, file_system: Arc<dyn FileSystem>) -> Self {
        self.file_system = file_system;
        self
    }

    /// Configures whether symbolic links are resolved to their targets.
    ///
    /// A followed link to a directory is reported as a directory and may be
    /// descended into; the descend filter sees its real path first so cycles
    /// can be cut.
    #[must_use]
    pub const fn follow_symbolic_links(mut self, follow: bool) -> Self {
        self.follow_symbolic_links = follow;
        self
    }

    /// Attaches metadata to every entry.
    #[must_use]
    pub const fn stats(mut self, stats: bool) -> Self {
        self.stats = stats;
        self
    }

    /// Limits how many segments an exact path may have.
    ///
    /// Walking readers leave depth to their [`DescendFilter`].
    #[must_use]
    pub const fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Shares a cancellation flag with the readers.
    #[must_use]
    pub fn cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns the shared cancellation flag.
    #[must_use]
    pub fn cancel(&self) -> &CancelFlag {
        &self.cancel
    }

    /// Reader that stats each of `patterns` as an exact path.
    pub fn build_static<E: ErrorPolicy>(
        &self,
        base: &str,
        patterns: &[String],
        policy: E,
    ) -> StaticReader<E> {
        StaticReader::new(self.context(), base, patterns.to_vec(), policy)
    }

    /// Reader that walks the tree below `base`.
    pub fn build_dynamic<D: DescendFilter, E: ErrorPolicy>(
        &self,
        base: &str,
        filter: D,
        policy: E,
    ) -> DynamicReader<D, E> {
        DynamicReader::new(self.context(), base, filter, policy)
    }

    /// Picks the static or dynamic reader.
    pub fn build<D: DescendFilter, E: ErrorPolicy>(
        &self,
        base: &str,
        patterns: &[String],
        dynamic: bool,
        filter: D,
        policy: E,
    ) -> Reader<D, E> {
        if dynamic {
            Reader::Dynamic(self.build_dynamic(base, filter, policy))
        } else {
            Reader::Static(self.build_static(base, patterns, policy))
        }
    }

    fn context(&self) -> ReaderContext {
        ReaderContext {
            cwd: self.cwd.clone(),
            file_system: Arc::clone(&self.file_system),
            follow_symbolic_links: self.follow_symbolic_links,
            stats: self.stats,
            max_depth: self.max_depth,
            cancel: self.cancel.clone(),
        }
    }
}
