use std::collections::HashSet;
use std::path::{Path, PathBuf};

use logging::trace_filter;
use patterns::{MatcherFactory, PatternError, ends_with_globstar, strip_globstar_suffix};
use settings::Settings;
use walk::{DescendFilter, Entry};

use crate::scoped::{EntryPath, ScopedPatterns};

/// Decides which directories of a dynamic task are listed.
///
/// A directory is entered only while it is shallower than the depth limit,
/// is not an unfollowed symbolic link, may still lead to a positive match,
/// and is not the root of a subtree a negative pattern excludes wholesale
/// (`dir/**`). With symbolic links followed, each real directory is entered
/// once per task, which also breaks cycles.
#[derive(Debug)]
pub struct DeepFilter {
    cwd: String,
    max_depth: Option<usize>,
    follow_symbolic_links: bool,
    base_name_match: bool,
    positive: ScopedPatterns,
    excluded_subtrees: ScopedPatterns,
    visited: HashSet<PathBuf>,
}

impl DeepFilter {
    /// Compiles the directory filter for one task.
    ///
    /// Only negatives ending in `/**` take part in pruning; the others are
    /// left to the entry filter.
    ///
    /// # Errors
    ///
    /// Returns the first [`PatternError`] raised while compiling a pattern.
    pub fn new<S: AsRef<str>>(
        settings: &Settings,
        factory: &dyn MatcherFactory,
        positive: &[S],
        negative: &[S],
    ) -> Result<Self, PatternError> {
        let options = settings.match_options();
        let subtrees: Vec<&str> = negative
            .iter()
            .map(AsRef::as_ref)
            .filter(|pattern| ends_with_globstar(pattern))
            .map(strip_globstar_suffix)
            .collect();

        Ok(Self {
            cwd: settings.cwd_posix().to_owned(),
            max_depth: settings.deep().limit(),
            follow_symbolic_links: settings.follow_symbolic_links(),
            base_name_match: settings.base_name_match(),
            positive: ScopedPatterns::compile(factory, positive, &options, None)?,
            excluded_subtrees: ScopedPatterns::compile(factory, &subtrees, &options, None)?,
            visited: HashSet::new(),
        })
    }
}

impl DescendFilter for DeepFilter {
    fn root(&mut self) -> bool {
        self.max_depth != Some(0)
    }

    fn descend(&mut self, entry: &Entry) -> bool {
        if self.max_depth.is_some_and(|max| entry.depth() >= max) {
            trace_filter!("{} at depth limit", entry.path());
            return false;
        }
        if entry.is_symbolic_link() && !self.follow_symbolic_links {
            return false;
        }

        let path = EntryPath::new(&self.cwd, entry.path(), false);
        if !self.base_name_match
            && !self.positive.is_empty()
            && !self.positive.any_partial_match(&path)
        {
            trace_filter!("{} cannot lead to a match", entry.path());
            return false;
        }
        if let Some(pattern) = self.excluded_subtrees.find_match(&path) {
            trace_filter!("{} pruned by {}", entry.path(), pattern);
            return false;
        }
        true
    }

    fn enter(&mut self, real_path: &Path) -> bool {
        let first_visit = self.visited.insert(real_path.to_path_buf());
        if !first_visit {
            trace_filter!("{} already visited", real_path.display());
        }
        first_visit
    }
}
