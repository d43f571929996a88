//! Task → reader → filter pipeline shared by every consumption mode.

mod deferred;
mod stream;
mod sync;

use std::sync::Arc;

use filters::{DeepFilter, EntryFilter, EntryPredicate, ErrorFilter};
use logging::trace_provider;
use patterns::{GlobMatcherFactory, MatcherFactory, make_absolute};
use settings::{Options, Settings};
use tasks::Task;
use walk::{CancelFlag, Entry, FileSystem, LocalFileSystem, Reader, ReaderBuilder};

use crate::GlobError;

pub use stream::GlobStream;
pub use sync::GlobIter;

/// Resolution call description: patterns, options and collaborators.
///
/// A `Glob` is inert until one of [`iter`](Self::iter),
/// [`collect`](Self::collect), [`run`](Self::run) or [`stream`](Self::stream)
/// is called. Each of those is an independent call with its own
/// deduplication index and cycle guards.
///
/// # Examples
///
/// ```
/// use globtree::{Glob, Options};
///
/// # fn demo() -> Result<(), globtree::GlobError> {
/// let temp = tempfile::tempdir().unwrap();
/// std::fs::write(temp.path().join("notes.md"), b"").unwrap();
///
/// let paths: Vec<String> = Glob::new(["*.md"])
///     .with_options(Options {
///         cwd: Some(temp.path().to_path_buf()),
///         ..Options::default()
///     })
///     .collect_with(|entry| entry.into_path())?;
/// assert_eq!(paths, ["notes.md"]);
/// # Ok(())
/// # }
/// # demo().unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Glob {
    patterns: Vec<String>,
    settings: Arc<Settings>,
    file_system: Arc<dyn FileSystem>,
    factory: Arc<dyn MatcherFactory>,
}

impl Glob {
    /// Creates a call over `patterns` with default options.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            settings: Arc::new(Settings::default()),
            file_system: Arc::new(LocalFileSystem),
            factory: Arc::new(GlobMatcherFactory),
        }
    }

    /// Replaces the options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.settings = Arc::new(Settings::new(options));
        self
    }

    /// Replaces the directory provider.
    #[must_use]
    pub fn with_file_system(mut self, file_system: Arc<dyn FileSystem>) -> Self {
        self.file_system = file_system;
        self
    }

    /// Replaces the pattern matcher.
    #[must_use]
    pub fn with_matcher_factory(mut self, factory: Arc<dyn MatcherFactory>) -> Self {
        self.factory = factory;
        self
    }

    /// Normalised options of the call.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Patterns as given.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Traversal tasks the patterns are split into.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        tasks::generate(&self.patterns, &self.settings)
    }

    fn pipeline(&self) -> Pipeline {
        Pipeline::new(self)
    }
}

/// Per-call state shared by all tasks of one resolution.
///
/// The entry filter's index and the cancellation flag are the only mutable
/// state; both are safe to use from several blocking workers.
#[derive(Debug)]
pub(crate) struct Pipeline {
    settings: Arc<Settings>,
    factory: Arc<dyn MatcherFactory>,
    entries: EntryFilter,
    readers: ReaderBuilder,
}

impl Pipeline {
    fn new(glob: &Glob) -> Self {
        let settings = Arc::clone(&glob.settings);
        let readers = ReaderBuilder::new(settings.cwd())
            .file_system(Arc::clone(&glob.file_system))
            .follow_symbolic_links(settings.follow_symbolic_links())
            .stats(settings.stats())
            .max_depth(settings.deep().limit());
        Self {
            entries: EntryFilter::new(&settings, Arc::clone(&glob.factory)),
            factory: Arc::clone(&glob.factory),
            settings,
            readers,
        }
    }

    pub(crate) fn cancel_flag(&self) -> &CancelFlag {
        self.readers.cancel()
    }

    /// Accepted entries of `task`, in discovery order.
    pub(crate) fn task_entries(&self, task: &Task) -> Result<TaskEntries, GlobError> {
        let predicate = self.entries.build(task.positive(), task.negative())?;
        let deep = DeepFilter::new(
            &self.settings,
            &*self.factory,
            task.positive(),
            task.negative(),
        )?;
        let reader = self.readers.build(
            task.base(),
            task.positive(),
            task.is_dynamic(),
            deep,
            ErrorFilter::new(&self.settings),
        );
        trace_provider!(
            base = task.base(),
            dynamic = task.is_dynamic(),
            "starting task reader"
        );
        Ok(TaskEntries {
            reader,
            predicate,
            output: OutputPaths::new(&self.settings),
            accepted: 0,
            finished: false,
        })
    }

    /// Runs `task` to completion on the calling thread.
    pub(crate) fn collect_task(&self, task: &Task) -> Result<Vec<Entry>, GlobError> {
        self.task_entries(task)?.collect()
    }
}

/// Rewrites accepted entries into their output form.
#[derive(Debug)]
struct OutputPaths {
    cwd: Option<String>,
    mark_directories: bool,
}

impl OutputPaths {
    fn new(settings: &Settings) -> Self {
        Self {
            cwd: settings.absolute().then(|| settings.cwd_posix().to_owned()),
            mark_directories: settings.mark_directories(),
        }
    }

    fn apply(&self, entry: Entry) -> Entry {
        let mark = self.mark_directories && entry.is_directory() && !entry.path().ends_with('/');
        if self.cwd.is_none() && !mark {
            return entry;
        }
        let mut path = match &self.cwd {
            Some(cwd) => make_absolute(cwd, entry.path()),
            None => entry.path().to_owned(),
        };
        if mark {
            path.push('/');
        }
        entry.with_path(path)
    }
}

/// Reader for one task, filtered and rewritten for output.
///
/// Ends after the first error.
#[derive(Debug)]
pub(crate) struct TaskEntries {
    reader: Reader<DeepFilter, ErrorFilter>,
    predicate: EntryPredicate,
    output: OutputPaths,
    accepted: usize,
    finished: bool,
}

impl Iterator for TaskEntries {
    type Item = Result<Entry, GlobError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        for item in self.reader.by_ref() {
            match item {
                Ok(entry) if self.predicate.accepts(&entry) => {
                    self.accepted += 1;
                    return Some(Ok(self.output.apply(entry)));
                }
                Ok(_) => {}
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error.into()));
                }
            }
        }
        self.finished = true;
        trace_provider!(accepted = self.accepted, "task reader finished");
        None
    }
}

/// Raises the call's cancellation flag when dropped.
#[derive(Debug)]
pub(crate) struct CancelOnDrop(CancelFlag);

impl CancelOnDrop {
    pub(crate) const fn new(flag: CancelFlag) -> Self {
        Self(flag)
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}
