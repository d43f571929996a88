use std::vec;

use logging::trace_provider;
use tasks::Task;
use walk::Entry;

use super::{Glob, Pipeline, TaskEntries};
use crate::GlobError;

/// Lazy, single-threaded resolution.
///
/// Tasks run one after another on the calling thread; entries come out in
/// task order, then discovery order. The iterator ends after the first
/// error.
#[derive(Debug)]
pub struct GlobIter {
    pipeline: Pipeline,
    tasks: vec::IntoIter<Task>,
    current: Option<TaskEntries>,
    finished: bool,
}

impl GlobIter {
    pub(crate) fn new(glob: &Glob) -> Self {
        let tasks = glob.tasks();
        trace_provider!(tasks = tasks.len(), "resolving synchronously");
        Self {
            pipeline: glob.pipeline(),
            tasks: tasks.into_iter(),
            current: None,
            finished: false,
        }
    }
}

impl Iterator for GlobIter {
    type Item = Result<Entry, GlobError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            if let Some(current) = self.current.as_mut() {
                match current.next() {
                    Some(Ok(entry)) => return Some(Ok(entry)),
                    Some(Err(error)) => {
                        self.finished = true;
                        return Some(Err(error));
                    }
                    None => self.current = None,
                }
            }

            let Some(task) = self.tasks.next() else {
                self.finished = true;
                break;
            };
            match self.pipeline.task_entries(&task) {
                Ok(entries) => self.current = Some(entries),
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            }
        }
        None
    }
}

impl Glob {
    /// Pulls entries lazily on the calling thread.
    #[must_use]
    pub fn iter(&self) -> GlobIter {
        GlobIter::new(self)
    }

    /// Resolves every task and returns the accepted entries.
    ///
    /// Nothing is returned when any task fails.
    pub fn collect(&self) -> Result<Vec<Entry>, GlobError> {
        self.iter().collect()
    }

    /// Like [`collect`](Self::collect), then maps each entry through
    /// `transform` in output order.
    ///
    /// `transform` is not called when the resolution fails.
    pub fn collect_with<T, F>(&self, transform: F) -> Result<Vec<T>, GlobError>
    where
        F: FnMut(Entry) -> T,
    {
        Ok(self.collect()?.into_iter().map(transform).collect())
    }
}
