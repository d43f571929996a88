use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::vec;

use logging::{trace_walk, warn_skipped};
use patterns::{remove_leading_dot_segment, unescape};

use crate::entry::{Dirent, Entry, EntryKind, EntryStats};
use crate::error::WalkError;
use crate::fs::{DirEntryInfo, FileSystem};

/// Decides whether a dynamic reader recurses into a directory.
pub trait DescendFilter {
    /// Called once before the base directory is listed. Returning `false`
    /// skips the listing entirely.
    fn root(&mut self) -> bool {
        true
    }

    /// Called for every directory entry before it is listed.
    fn descend(&mut self, entry: &Entry) -> bool;

    /// Called with the real path of a directory about to be listed, only
    /// when symbolic links are followed. Returning `false` skips it.
    fn enter(&mut self, real_path: &Path) -> bool {
        let _ = real_path;
        true
    }
}

impl<F: FnMut(&Entry) -> bool> DescendFilter for F {
    fn descend(&mut self, entry: &Entry) -> bool {
        self(entry)
    }
}

/// Decides whether an I/O failure aborts the resolution call.
pub trait ErrorPolicy {
    /// Returns `true` when `error` must be propagated.
    fn is_fatal(&self, error: &WalkError) -> bool;
}

impl<F: Fn(&WalkError) -> bool> ErrorPolicy for F {
    fn is_fatal(&self, error: &WalkError) -> bool {
        self(error)
    }
}

/// Shared flag telling readers to stop issuing I/O.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates a flag in the running state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ReaderContext {
    pub(crate) cwd: PathBuf,
    pub(crate) file_system: Arc<dyn FileSystem>,
    pub(crate) follow_symbolic_links: bool,
    pub(crate) stats: bool,
    pub(crate) max_depth: Option<usize>,
    pub(crate) cancel: CancelFlag,
}

struct Resolved {
    dirent: Dirent,
    stats: Option<EntryStats>,
}

impl ReaderContext {
    /// Resolves type and metadata for an entry whose unresolved type is `kind`.
    ///
    /// Returns `Ok(None)` when the entry vanished.
    fn resolve<E: ErrorPolicy>(
        &self,
        fs_path: &Path,
        kind: EntryKind,
        mut lstat: Option<EntryStats>,
        policy: &E,
    ) -> Result<Option<Resolved>, WalkError> {
        let mut dirent = Dirent::new(kind, false);
        let mut stats = None;

        if kind == EntryKind::Symlink && self.follow_symbolic_links {
            match self.file_system.stat(fs_path, true) {
                Ok(target) => {
                    dirent = Dirent::new(target.kind(), true);
                    stats = Some(target);
                }
                Err(source) => {
                    let error = WalkError::broken_symlink(fs_path.to_path_buf(), source);
                    skip_or_raise(policy, error)?;
                }
            }
        }

        if !self.stats {
            return Ok(Some(Resolved {
                dirent,
                stats: None,
            }));
        }

        if stats.is_none() {
            if lstat.is_none() {
                match self.file_system.stat(fs_path, false) {
                    Ok(metadata) => lstat = Some(metadata),
                    Err(source) => {
                        let error = WalkError::stat(fs_path.to_path_buf(), source);
                        if error.is_not_found() {
                            trace_walk!(path = %fs_path.display(), "entry vanished before stat");
                            return Ok(None);
                        }
                        skip_or_raise(policy, error)?;
                    }
                }
            }
            stats = lstat;
        }

        Ok(Some(Resolved { dirent, stats }))
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Propagates `error` when the policy says so, otherwise logs and swallows it.
fn skip_or_raise<E: ErrorPolicy>(policy: &E, error: WalkError) -> Result<(), WalkError> {
    if policy.is_fatal(&error) {
        return Err(error);
    }
    if error.is_not_found() {
        trace_walk!(path = %error.path().display(), "skipping missing path");
    } else {
        warn_skipped!(path = %error.path().display(), error = %error.io_error(), "{}", error);
    }
    Ok(())
}

fn join_posix(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else if prefix.ends_with('/') {
        format!("{prefix}{name}")
    } else {
        format!("{prefix}/{name}")
    }
}

fn build_entry(path: String, base: &str, depth: usize, resolved: Resolved) -> Entry {
    let entry = Entry::new(path, base, depth, resolved.dirent);
    match resolved.stats {
        Some(stats) => entry.with_stats(stats),
        None => entry,
    }
}

/// Resolves exact paths with one `lstat` each instead of walking.
///
/// Missing paths produce nothing. Depth is the number of segments in the
/// path; paths deeper than the configured limit are skipped without a stat.
#[derive(Debug)]
pub struct StaticReader<E> {
    context: ReaderContext,
    base: String,
    patterns: vec::IntoIter<String>,
    policy: E,
    finished: bool,
}

impl<E: ErrorPolicy> StaticReader<E> {
    pub(crate) fn new(
        context: ReaderContext,
        base: &str,
        patterns: Vec<String>,
        policy: E,
    ) -> Self {
        Self {
            context,
            base: base.to_owned(),
            patterns: patterns.into_iter(),
            policy,
            finished: false,
        }
    }

    fn read(&self, pattern: &str) -> Result<Option<Entry>, WalkError> {
        let relative = unescape(remove_leading_dot_segment(pattern));
        let relative = relative.trim_end_matches('/');
        let depth = relative.split('/').filter(|part| !part.is_empty()).count();
        if self.context.max_depth.is_some_and(|max| depth > max) {
            trace_walk!(pattern, depth, "static path deeper than limit");
            return Ok(None);
        }
        let fs_path = self.context.cwd.join(relative);

        let lstat = match self.context.file_system.stat(&fs_path, false) {
            Ok(lstat) => lstat,
            Err(source) => {
                let error = WalkError::stat(fs_path, source);
                if error.is_not_found() {
                    trace_walk!(pattern, "static path does not exist");
                    return Ok(None);
                }
                skip_or_raise(&self.policy, error)?;
                return Ok(None);
            }
        };

        let kind = lstat.kind();
        let Some(resolved) = self
            .context
            .resolve(&fs_path, kind, Some(lstat), &self.policy)?
        else {
            return Ok(None);
        };

        Ok(Some(build_entry(relative.to_owned(), &self.base, depth, resolved)))
    }
}

impl<E: ErrorPolicy> Iterator for StaticReader<E> {
    type Item = Result<Entry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished || self.context.is_cancelled() {
                self.finished = true;
                return None;
            }
            let pattern = self.patterns.next()?;
            match self.read(&pattern) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => {}
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            }
        }
    }
}

/// Depth-first walk below a task base.
///
/// Every visited entry is yielded; the [`DescendFilter`] only decides which
/// directories are listed. Children are visited in listing order and a
/// directory's contents are exhausted before its next sibling.
#[derive(Debug)]
pub struct DynamicReader<D, E> {
    context: ReaderContext,
    base: String,
    root: PathBuf,
    filter: D,
    policy: E,
    stack: Vec<DirectoryState>,
    started: bool,
    finished: bool,
}

#[derive(Debug)]
struct DirectoryState {
    fs_path: PathBuf,
    prefix: String,
    entries: vec::IntoIter<DirEntryInfo>,
    depth: usize,
}

impl<D: DescendFilter, E: ErrorPolicy> DynamicReader<D, E> {
    pub(crate) fn new(context: ReaderContext, base: &str, filter: D, policy: E) -> Self {
        let root = if base == "." {
            context.cwd.clone()
        } else {
            context.cwd.join(unescape(base))
        };
        Self {
            context,
            base: base.to_owned(),
            root,
            filter,
            policy,
            stack: Vec::new(),
            started: false,
            finished: false,
        }
    }

    /// Returns the descend filter, e.g. to inspect its state after the walk.
    pub fn filter(&self) -> &D {
        &self.filter
    }

    fn open_root(&mut self) -> Result<(), WalkError> {
        trace_walk!(base = %self.base, root = %self.root.display(), "walking task base");
        if !self.filter.root() {
            return Ok(());
        }

        if self.context.follow_symbolic_links {
            match self.context.file_system.canonicalize(&self.root) {
                Ok(real) => {
                    if !self.filter.enter(&real) {
                        return Ok(());
                    }
                }
                Err(source) => {
                    let error = WalkError::read_root(self.root.clone(), source);
                    return skip_or_raise(&self.policy, error);
                }
            }
        }

        match self.context.file_system.read_dir(&self.root) {
            Ok(entries) => {
                let prefix = if self.base == "." {
                    String::new()
                } else {
                    unescape(&self.base)
                };
                self.stack.push(DirectoryState {
                    fs_path: self.root.clone(),
                    prefix,
                    entries: entries.into_iter(),
                    depth: 0,
                });
                Ok(())
            }
            Err(source) => {
                let error = WalkError::read_root(self.root.clone(), source);
                skip_or_raise(&self.policy, error)
            }
        }
    }

    fn visit(
        &mut self,
        fs_path: PathBuf,
        path: String,
        depth: usize,
        kind: EntryKind,
    ) -> Result<Option<Entry>, WalkError> {
        let Some(resolved) = self.context.resolve(&fs_path, kind, None, &self.policy)? else {
            return Ok(None);
        };
        let entry = build_entry(path, &self.base, depth, resolved);

        if entry.is_directory() && self.filter.descend(&entry) {
            self.enter(fs_path, entry.path().to_owned(), depth)?;
        }
        Ok(Some(entry))
    }

    fn enter(&mut self, fs_path: PathBuf, prefix: String, depth: usize) -> Result<(), WalkError> {
        if self.context.follow_symbolic_links {
            match self.context.file_system.canonicalize(&fs_path) {
                Ok(real) => {
                    if !self.filter.enter(&real) {
                        trace_walk!(path = %fs_path.display(), "directory already visited");
                        return Ok(());
                    }
                }
                Err(source) => {
                    let error = WalkError::canonicalize(fs_path, source);
                    return skip_or_raise(&self.policy, error);
                }
            }
        }

        if self.context.is_cancelled() {
            return Ok(());
        }

        match self.context.file_system.read_dir(&fs_path) {
            Ok(entries) => {
                trace_walk!(
                    path = %fs_path.display(),
                    entries = entries.len(),
                    "entering directory"
                );
                self.stack.push(DirectoryState {
                    fs_path,
                    prefix,
                    entries: entries.into_iter(),
                    depth,
                });
                Ok(())
            }
            Err(source) => skip_or_raise(&self.policy, WalkError::read_dir(fs_path, source)),
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        self.stack.clear();
    }
}

impl<D: DescendFilter, E: ErrorPolicy> Iterator for DynamicReader<D, E> {
    type Item = Result<Entry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if !self.started {
            self.started = true;
            if let Err(error) = self.open_root() {
                self.finish();
                return Some(Err(error));
            }
        }

        loop {
            if self.context.is_cancelled() {
                trace_walk!(base = %self.base, "walk cancelled");
                self.finish();
                return None;
            }

            let (fs_path, path, depth, kind) = {
                let Some(state) = self.stack.last_mut() else {
                    self.finished = true;
                    return None;
                };
                if let Some(info) = state.entries.next() {
                    (
                        state.fs_path.join(&info.name),
                        join_posix(&state.prefix, &info.name),
                        state.depth + 1,
                        info.kind,
                    )
                } else {
                    self.stack.pop();
                    continue;
                }
            };

            match self.visit(fs_path, path, depth, kind) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => {}
                Err(error) => {
                    self.finish();
                    return Some(Err(error));
                }
            }
        }
    }
}

/// Either reader, chosen by whether the task is dynamic.
#[derive(Debug)]
pub enum Reader<D, E> {
    /// Exact-path reader.
    Static(StaticReader<E>),
    /// Walking reader.
    Dynamic(DynamicReader<D, E>),
}

impl<D: DescendFilter, E: ErrorPolicy> Iterator for Reader<D, E> {
    type Item = Result<Entry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Static(reader) => reader.next(),
            Self::Dynamic(reader) => reader.next(),
        }
    }
}
