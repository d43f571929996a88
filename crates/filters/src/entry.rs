use std::sync::Arc;

use dashmap::DashSet;
use logging::trace_filter;
use patterns::{MatchOptions, MatcherFactory, PatternError};
use settings::Settings;
use walk::Entry;

use crate::scoped::{EntryPath, ScopedPatterns};

/// Builds the per-task predicates that decide which entries are reported.
///
/// One `EntryFilter` lives for a whole resolution call. Every predicate it
/// builds shares the same index of reported paths, so with `unique` set a
/// path found by two tasks is reported once.
#[derive(Clone, Debug)]
pub struct EntryFilter {
    factory: Arc<dyn MatcherFactory>,
    options: MatchOptions,
    cwd: Arc<str>,
    index: Arc<DashSet<String>>,
    unique: bool,
    only_files: bool,
    only_directories: bool,
    absolute: bool,
}

impl EntryFilter {
    /// Captures the filtering options of `settings`.
    #[must_use]
    pub fn new(settings: &Settings, factory: Arc<dyn MatcherFactory>) -> Self {
        Self {
            factory,
            options: settings.match_options(),
            cwd: Arc::from(settings.cwd_posix()),
            index: Arc::new(DashSet::new()),
            unique: settings.unique(),
            only_files: settings.only_files(),
            only_directories: settings.only_directories(),
            absolute: settings.absolute(),
        }
    }

    /// Compiles the predicate for one task.
    ///
    /// `negative` holds the task's ignore patterns in positive form.
    ///
    /// # Errors
    ///
    /// Returns the first [`PatternError`] raised while compiling a pattern.
    pub fn build<S: AsRef<str>>(
        &self,
        positive: &[S],
        negative: &[S],
    ) -> Result<EntryPredicate, PatternError> {
        let absolute_cwd = self.absolute.then_some(&*self.cwd);
        let positive =
            ScopedPatterns::compile(&*self.factory, positive, &self.options, absolute_cwd)?;
        let negative =
            ScopedPatterns::compile(&*self.factory, negative, &self.options, absolute_cwd)?;
        Ok(EntryPredicate {
            filter: self.clone(),
            positive,
            negative,
        })
    }

    /// Number of distinct paths reported so far.
    #[must_use]
    pub fn reported(&self) -> usize {
        self.index.len()
    }
}

/// Accept/reject decision for the entries of one task.
#[derive(Debug)]
pub struct EntryPredicate {
    filter: EntryFilter,
    positive: ScopedPatterns,
    negative: ScopedPatterns,
}

impl EntryPredicate {
    /// Returns `true` when `entry` should be reported.
    ///
    /// With `unique` set, acceptance also records the path; a concurrent
    /// predicate that loses the race for the same path rejects it.
    #[must_use]
    pub fn accepts(&self, entry: &Entry) -> bool {
        let filter = &self.filter;
        let path = EntryPath::new(&filter.cwd, entry.path(), entry.is_directory());
        let key = if filter.absolute {
            path.absolute()
        } else {
            path.relative()
        };

        if filter.unique && filter.index.contains(key) {
            trace_filter!("{} already reported", key);
            return false;
        }
        if filter.only_files && !entry.is_file() {
            return false;
        }
        if filter.only_directories && !entry.is_directory() {
            return false;
        }
        if let Some(pattern) = self.negative.find_match(&path) {
            trace_filter!("{} excluded by {}", key, pattern);
            return false;
        }
        if !self.positive.any_match(&path) {
            return false;
        }
        if filter.unique && !filter.index.insert(key.to_owned()) {
            trace_filter!("{} reported by another task", key);
            return false;
        }
        true
    }
}
