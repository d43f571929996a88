use patterns::convert_to_negative;

/// One traversal job: a base directory and the patterns evaluated below it.
///
/// Positive patterns keep their original form relative to the working
/// directory. Negatives are stored without their `!` marker; [`Task::patterns`]
/// lists positives followed by the negated forms.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Task {
    base: String,
    dynamic: bool,
    patterns: Vec<String>,
    positive: Vec<String>,
    negative: Vec<String>,
}

impl Task {
    /// Builds a task, normalising `base` (`./a` becomes `a`, empty becomes `.`).
    pub fn new(base: &str, positive: Vec<String>, negative: Vec<String>, dynamic: bool) -> Self {
        let patterns = positive
            .iter()
            .cloned()
            .chain(negative.iter().map(|pattern| convert_to_negative(pattern)))
            .collect();

        Self {
            base: normalize_base(base),
            dynamic,
            patterns,
            positive,
            negative,
        }
    }

    /// Directory the task is rooted at, relative to the working directory.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Whether the task walks a directory tree instead of stating exact paths.
    #[must_use]
    pub const fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Positives followed by `!`-prefixed negatives.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Positive patterns in input order.
    #[must_use]
    pub fn positive(&self) -> &[String] {
        &self.positive
    }

    /// Negative patterns in positive form, input negatives before ignore entries.
    #[must_use]
    pub fn negative(&self) -> &[String] {
        &self.negative
    }
}

/// Strips leading `./` segments; an empty result becomes `.`.
#[must_use]
pub fn normalize_base(base: &str) -> String {
    let trimmed = patterns::remove_leading_dot_segment(base);
    if trimmed.is_empty() {
        ".".to_owned()
    } else {
        trimmed.to_owned()
    }
}
