use logging::trace_tasks;
use patterns::{
    MatchOptions, convert_to_positive, get_base_directory, is_absolute, is_dynamic, is_negative,
    is_positive, remove_leading_dot_segment,
};
use settings::Settings;

use crate::task::{Task, normalize_base};

/// Patterns sharing one base directory, in first-seen order.
pub type PatternGroups = Vec<(String, Vec<String>)>;

/// Converts `patterns` plus the configured ignore list into tasks.
///
/// # Examples
///
/// ```
/// use settings::Settings;
///
/// let tasks = tasks::generate(&["a/*", "!a/*.md"], &Settings::default());
///
/// assert_eq!(tasks.len(), 1);
/// assert_eq!(tasks[0].base(), "a");
/// assert_eq!(tasks[0].positive(), ["a/*"]);
/// assert_eq!(tasks[0].negative(), ["a/*.md"]);
/// ```
pub fn generate<S: AsRef<str>>(patterns: &[S], settings: &Settings) -> Vec<Task> {
    let options = settings.match_options();
    let positive = get_positive_patterns(patterns);
    let negative = get_negative_patterns_as_positive(patterns, settings.ignore());

    // a case-insensitive name cannot be resolved by stat
    let force_dynamic = !settings.case_sensitive_match();

    let tasks = convert_patterns_to_tasks(&positive, &negative, force_dynamic, &options);
    trace_tasks!(
        positive = positive.len(),
        negative = negative.len(),
        tasks = tasks.len(),
        "generated tasks"
    );
    for task in &tasks {
        trace_tasks!(
            base = task.base(),
            dynamic = task.is_dynamic(),
            patterns = ?task.patterns(),
            "task"
        );
    }
    tasks
}

/// Non-negated, non-empty patterns in input order.
pub fn get_positive_patterns<S: AsRef<str>>(patterns: &[S]) -> Vec<String> {
    patterns
        .iter()
        .map(AsRef::as_ref)
        .filter(|pattern| !pattern.is_empty() && is_positive(pattern))
        .map(str::to_owned)
        .collect()
}

/// Negations from `patterns` followed by every `ignore` entry, all in positive form.
pub fn get_negative_patterns_as_positive<S: AsRef<str>, I: AsRef<str>>(
    patterns: &[S],
    ignore: &[I],
) -> Vec<String> {
    let negated = patterns
        .iter()
        .map(AsRef::as_ref)
        .filter(|pattern| is_negative(pattern))
        .map(convert_to_positive);
    let ignored = ignore.iter().map(AsRef::as_ref).map(convert_to_positive);

    negated
        .chain(ignored)
        .filter(|pattern| !pattern.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Groups patterns by normalised base directory, keeping first-seen order.
pub fn group_patterns_by_base_directory(
    patterns: &[String],
    options: &MatchOptions,
) -> PatternGroups {
    let mut groups: PatternGroups = Vec::new();
    for pattern in patterns {
        let base =
            normalize_base(&get_base_directory(remove_leading_dot_segment(pattern), options));
        match groups.iter_mut().find(|(existing, _)| *existing == base) {
            Some((_, members)) => members.push(pattern.clone()),
            None => groups.push((base, vec![pattern.clone()])),
        }
    }
    groups
}

/// Builds tasks for `positive`, collapsing everything inside the working
/// directory into one task at `.` when a dynamic pattern is rooted there.
///
/// Patterns reaching outside the working directory (absolute or `..`) are
/// always grouped on their own and come first.
pub fn convert_patterns_to_tasks(
    positive: &[String],
    negative: &[String],
    force_dynamic: bool,
    options: &MatchOptions,
) -> Vec<Task> {
    let (outside, inside): (Vec<String>, Vec<String>) = positive
        .iter()
        .cloned()
        .partition(|pattern| is_outside_current_directory(pattern));

    let outside_groups = group_patterns_by_base_directory(&outside, options);
    let mut tasks =
        convert_pattern_groups_to_tasks(&outside_groups, negative, force_dynamic, options);

    let inside_groups = group_patterns_by_base_directory(&inside, options);
    if has_global_pattern(&inside_groups, options) {
        tasks.push(convert_pattern_group_to_task(".", &inside, negative, true, options));
    } else {
        tasks.extend(convert_pattern_groups_to_tasks(
            &inside_groups,
            negative,
            force_dynamic,
            options,
        ));
    }
    tasks
}

/// One task per group, in group order.
pub fn convert_pattern_groups_to_tasks(
    groups: &PatternGroups,
    negative: &[String],
    force_dynamic: bool,
    options: &MatchOptions,
) -> Vec<Task> {
    groups
        .iter()
        .map(|(base, members)| {
            convert_pattern_group_to_task(base, members, negative, force_dynamic, options)
        })
        .collect()
}

/// Builds a task for one base directory.
///
/// Only negatives that can match something below `base` are attached; any
/// attached negative makes the task dynamic.
pub fn convert_pattern_group_to_task(
    base: &str,
    positive: &[String],
    negative: &[String],
    force_dynamic: bool,
    options: &MatchOptions,
) -> Task {
    let base = normalize_base(base);
    let scoped: Vec<String> = negative
        .iter()
        .filter(|pattern| negative_applies_to_base(&base, pattern, options))
        .cloned()
        .collect();

    let dynamic = force_dynamic
        || !scoped.is_empty()
        || positive.iter().any(|pattern| is_dynamic(pattern, options));

    Task::new(&base, positive.to_vec(), scoped, dynamic)
}

/// Whether `negative` could exclude an entry found below `base`.
///
/// Negatives rooted at `.` or absolute negatives apply everywhere. Otherwise
/// the two base directories must lie on one path. Bases are compared
/// case-insensitively when matching ignores case.
pub fn negative_applies_to_base(base: &str, negative: &str, options: &MatchOptions) -> bool {
    if base == "." || is_absolute(negative) {
        return true;
    }
    let negative_base =
        normalize_base(&get_base_directory(remove_leading_dot_segment(negative), options));
    if !options.case_sensitive {
        return bases_share_path(&base.to_lowercase(), &negative_base.to_lowercase());
    }
    bases_share_path(base, &negative_base)
}

fn bases_share_path(base: &str, negative_base: &str) -> bool {
    negative_base == "."
        || negative_base == base
        || is_path_prefix(negative_base, base)
        || is_path_prefix(base, negative_base)
}

fn is_path_prefix(prefix: &str, path: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('/') || prefix.ends_with('/'))
}

fn is_outside_current_directory(pattern: &str) -> bool {
    let pattern = remove_leading_dot_segment(pattern);
    is_absolute(pattern) || pattern == ".." || pattern.starts_with("../")
}

fn has_global_pattern(groups: &PatternGroups, options: &MatchOptions) -> bool {
    groups.iter().any(|(base, members)| {
        base == "." && members.iter().any(|pattern| is_dynamic(pattern, options))
    })
}
