use super::*;
use patterns::MatchOptions;
use settings::{Options, Settings};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

fn options() -> MatchOptions {
    MatchOptions::default()
}

#[test]
fn empty_input_yields_no_tasks() {
    let tasks = generate::<&str>(&[], &Settings::default());
    assert!(tasks.is_empty());
}

#[test]
fn ignore_entries_follow_input_negatives() {
    let settings = Settings::new(Options {
        ignore: strings(&["*.txt"]),
        ..Options::default()
    });

    let tasks = generate(&["a/*", "!*.md"], &settings);

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].base(), "a");
    assert_eq!(tasks[0].positive(), ["a/*"]);
    assert_eq!(tasks[0].negative(), ["*.md", "*.txt"]);
    assert_eq!(tasks[0].patterns(), ["a/*", "!*.md", "!*.txt"]);
    assert!(tasks[0].is_dynamic());
}

#[test]
fn scoped_negatives_leave_unrelated_static_tasks_alone() {
    let tasks = generate(&["a/file.json", "b/*", "!b/*.md"], &Settings::default());

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].base(), "a");
    assert!(!tasks[0].is_dynamic());
    assert!(tasks[0].negative().is_empty());

    assert_eq!(tasks[1].base(), "b");
    assert!(tasks[1].is_dynamic());
    assert_eq!(tasks[1].negative(), ["b/*.md"]);
}

#[test]
fn global_negative_makes_static_task_dynamic() {
    let settings = Settings::new(Options {
        ignore: strings(&["**/*.bak"]),
        ..Options::default()
    });
    let tasks = generate(&["a/file.json"], &settings);

    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].is_dynamic());
    assert_eq!(tasks[0].negative(), ["**/*.bak"]);
}

#[test]
fn case_insensitive_matching_forces_dynamic_tasks() {
    let settings = Settings::new(Options {
        case_sensitive_match: false,
        ..Options::default()
    });
    let tasks = generate(&["a/file.json", "b/*"], &settings);

    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(Task::is_dynamic));
}

#[test]
fn global_pattern_collapses_into_single_task() {
    let positive = strings(&["*", "a/*", "b/file.txt"]);
    let negative = strings(&["*.md", "b/*.txt"]);

    let tasks = convert_patterns_to_tasks(&positive, &negative, false, &options());

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].base(), ".");
    assert!(tasks[0].is_dynamic());
    assert_eq!(tasks[0].positive(), positive.as_slice());
    assert_eq!(tasks[0].negative(), negative.as_slice());
}

#[test]
fn leading_globstar_counts_as_global() {
    let positive = strings(&["src/*.rs", "**/*.md"]);
    let tasks = convert_patterns_to_tasks(&positive, &[], false, &options());

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].base(), ".");
}

#[test]
fn static_pattern_at_root_is_not_global() {
    let positive = strings(&["README.md", "src/*.rs"]);
    let tasks = convert_patterns_to_tasks(&positive, &[], false, &options());

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].base(), ".");
    assert!(!tasks[0].is_dynamic());
    assert_eq!(tasks[1].base(), "src");
}

#[test]
fn outside_patterns_keep_their_own_tasks() {
    let positive = strings(&["*.js", "../shared/*.js", "/opt/app/*.js"]);
    let tasks = convert_patterns_to_tasks(&positive, &[], false, &options());

    let bases: Vec<&str> = tasks.iter().map(Task::base).collect();
    assert_eq!(bases, ["../shared", "/opt/app", "."]);
    assert_eq!(tasks[2].positive(), ["*.js"]);
}

#[test]
fn two_bases_produce_two_tasks() {
    let positive = strings(&["a/*", "b/*"]);
    let negative = strings(&["b/*.md"]);

    let tasks = convert_patterns_to_tasks(&positive, &negative, true, &options());

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].base(), "a");
    assert!(tasks[0].negative().is_empty());
    assert!(tasks[0].is_dynamic());
    assert_eq!(tasks[1].negative(), ["b/*.md"]);
}

#[test]
fn positive_patterns_drop_negations_and_empties() {
    assert_eq!(get_positive_patterns(&["*", "!*.md", ""]), ["*"]);
}

#[test]
fn negatives_include_ignore_in_positive_form() {
    assert_eq!(
        get_negative_patterns_as_positive(&["*", "!*.md"], &["*.txt", "!*.json"]),
        ["*.md", "*.txt", "*.json"]
    );
    assert!(get_negative_patterns_as_positive::<&str, &str>(&["*"], &[]).is_empty());
}

#[test]
fn grouping_preserves_first_seen_order() {
    let groups = group_patterns_by_base_directory(
        &strings(&["b/*", "*", "a/*", "b/**/*.md", "./a/x/*"]),
        &options(),
    );

    assert_eq!(
        groups,
        vec![
            ("b".to_owned(), strings(&["b/*", "b/**/*.md"])),
            (".".to_owned(), strings(&["*"])),
            ("a".to_owned(), strings(&["a/*"])),
            ("a/x".to_owned(), strings(&["./a/x/*"])),
        ]
    );
    assert!(group_patterns_by_base_directory(&[], &options()).is_empty());
}

#[test]
fn group_task_is_static_only_without_negatives() {
    let task = convert_pattern_group_to_task(".", &strings(&[".gitignore"]), &[], false, &options());
    assert!(!task.is_dynamic());

    let with_negative = convert_pattern_group_to_task(
        ".",
        &strings(&[".gitignore"]),
        &strings(&[".git*"]),
        false,
        &options(),
    );
    assert!(with_negative.is_dynamic());
    assert_eq!(with_negative.patterns(), [".gitignore", "!.git*"]);
}

#[test]
fn base_is_normalised() {
    assert_eq!(normalize_base("./a/b"), "a/b");
    assert_eq!(normalize_base(""), ".");
    assert_eq!(normalize_base("./"), ".");
    let task = Task::new("./src", strings(&["./src/*.rs"]), Vec::new(), true);
    assert_eq!(task.base(), "src");
}

#[test]
fn negative_scope_follows_path_nesting() {
    let opts = options();
    assert!(negative_applies_to_base("a", "*.md", &opts));
    assert!(negative_applies_to_base("a", "a/*.md", &opts));
    assert!(negative_applies_to_base("a", "a/b/*.md", &opts));
    assert!(negative_applies_to_base("a/b", "a/*.md", &opts));
    assert!(negative_applies_to_base("a", "/abs/*.md", &opts));
    assert!(!negative_applies_to_base("a", "b/*.md", &opts));
    assert!(!negative_applies_to_base("ab", "a/*.md", &opts));
}

#[test]
fn negative_scope_ignores_case_when_matching_does() {
    let insensitive = MatchOptions {
        case_sensitive: false,
        ..options()
    };
    assert!(negative_applies_to_base("b", "B/*.md", &insensitive));
    assert!(negative_applies_to_base("Src/lib", "src/*.rs", &insensitive));
    assert!(!negative_applies_to_base("b", "C/*.md", &insensitive));
    assert!(!negative_applies_to_base("b", "B/*.md", &options()));

    let settings = Settings::new(Options {
        case_sensitive_match: false,
        ..Options::default()
    });
    let tasks = generate(&["b/*", "!B/*.md"], &settings);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].base(), "b");
    assert_eq!(tasks[0].negative(), ["B/*.md"]);
}
