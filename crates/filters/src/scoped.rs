use patterns::{
    MatchOptions, MatcherFactory, PatternError, PatternMatcher, escape, is_absolute,
    make_absolute, remove_leading_dot_segment,
};

/// Compiled patterns, each remembering whether it targets absolute paths.
///
/// Absolute patterns are tested against the entry path joined onto the
/// working directory; the rest see the relative path with any leading `./`
/// removed.
#[derive(Debug, Default)]
pub(crate) struct ScopedPatterns {
    matchers: Vec<(Box<dyn PatternMatcher>, bool)>,
}

impl ScopedPatterns {
    /// Compiles `patterns`, rooting relative ones at `absolute_cwd` when given.
    ///
    /// Base name patterns (no `/` with base name matching on) are never
    /// rooted, so they keep matching the last segment only.
    pub(crate) fn compile<S: AsRef<str>>(
        factory: &dyn MatcherFactory,
        patterns: &[S],
        options: &MatchOptions,
        absolute_cwd: Option<&str>,
    ) -> Result<Self, PatternError> {
        let escaped_cwd = absolute_cwd.map(escape);
        let mut matchers = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let base_name_only = options.base_name_match && !pattern.contains('/');
            let source = match escaped_cwd.as_deref() {
                Some(cwd) if !base_name_only => make_absolute(cwd, pattern),
                _ => pattern.to_owned(),
            };
            let absolute = is_absolute(&source);
            matchers.push((factory.compile(&source, options)?, absolute));
        }
        Ok(Self { matchers })
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Full match of the first pattern accepting `path`, if any.
    pub(crate) fn find_match(&self, path: &EntryPath<'_>) -> Option<&str> {
        self.matchers
            .iter()
            .find(|(matcher, absolute)| matcher.matches(path.select(*absolute)))
            .map(|(matcher, _)| matcher.pattern())
    }

    pub(crate) fn any_match(&self, path: &EntryPath<'_>) -> bool {
        self.find_match(path).is_some()
    }

    pub(crate) fn any_partial_match(&self, path: &EntryPath<'_>) -> bool {
        self.matchers
            .iter()
            .any(|(matcher, absolute)| matcher.partial_matches(path.select(*absolute)))
    }
}

/// Relative and absolute renderings of one entry path.
#[derive(Debug)]
pub(crate) struct EntryPath<'a> {
    relative: &'a str,
    absolute: String,
    marked: Option<(String, String)>,
}

impl<'a> EntryPath<'a> {
    /// Builds both forms; `directory` appends `/` to each for matching.
    pub(crate) fn new(cwd: &str, path: &'a str, directory: bool) -> Self {
        let relative = remove_leading_dot_segment(path);
        let absolute = make_absolute(cwd, relative);
        let marked = directory.then(|| (format!("{relative}/"), format!("{absolute}/")));
        Self {
            relative,
            absolute,
            marked,
        }
    }

    pub(crate) fn relative(&self) -> &str {
        self.relative
    }

    pub(crate) fn absolute(&self) -> &str {
        &self.absolute
    }

    fn select(&self, absolute: bool) -> &str {
        match (&self.marked, absolute) {
            (Some((_, marked)), true) => marked,
            (Some((marked, _)), false) => marked,
            (None, true) => &self.absolute,
            (None, false) => self.relative,
        }
    }
}
