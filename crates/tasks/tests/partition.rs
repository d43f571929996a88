//! Property tests for task generation.
//!
//! Whatever the input, every positive pattern must end up in exactly one
//! task, and every task's base must be a directory prefix of the patterns it
//! holds.

use patterns::{MatchOptions, get_base_directory, remove_leading_dot_segment};
use proptest::prelude::*;
use settings::{Options, Settings};
use tasks::{generate, normalize_base};

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("a".to_owned()),
        Just("b".to_owned()),
        Just("B".to_owned()),
        Just("Src".to_owned()),
        Just("src".to_owned()),
        Just("*".to_owned()),
        Just("**".to_owned()),
        Just("*.md".to_owned()),
        Just("file.txt".to_owned()),
        Just("{x,y}".to_owned()),
    ]
}

fn pattern() -> impl Strategy<Value = String> {
    (proptest::collection::vec(segment(), 1..4), any::<bool>()).prop_map(|(segments, negated)| {
        let joined = segments.join("/");
        if negated { format!("!{joined}") } else { joined }
    })
}

fn settings_for(case_sensitive: bool) -> Settings {
    Settings::new(Options {
        case_sensitive_match: case_sensitive,
        ..Options::default()
    })
}

fn folded_base(pattern: &str, case_sensitive: bool) -> String {
    let base = normalize_base(&get_base_directory(
        remove_leading_dot_segment(pattern),
        &MatchOptions::default(),
    ));
    if case_sensitive { base } else { base.to_lowercase() }
}

fn is_under(base: &str, pattern: &str) -> bool {
    if base == "." {
        return true;
    }
    let pattern_base = normalize_base(&get_base_directory(
        remove_leading_dot_segment(pattern),
        &MatchOptions::default(),
    ));
    pattern_base == base || pattern_base.starts_with(&format!("{base}/"))
}

proptest! {
    #[test]
    fn every_positive_lands_in_exactly_one_task(
        patterns in proptest::collection::vec(pattern(), 0..8),
        case_sensitive in any::<bool>(),
    ) {
        let tasks = generate(&patterns, &settings_for(case_sensitive));

        let mut collected: Vec<String> = tasks
            .iter()
            .flat_map(|task| task.positive().iter().cloned())
            .collect();
        let mut expected: Vec<String> = patterns
            .iter()
            .filter(|pattern| !pattern.starts_with('!'))
            .cloned()
            .collect();
        collected.sort();
        expected.sort();
        prop_assert_eq!(collected, expected);
    }

    #[test]
    fn task_bases_contain_their_patterns(patterns in proptest::collection::vec(pattern(), 0..8)) {
        for task in generate(&patterns, &Settings::default()) {
            for positive in task.positive() {
                prop_assert!(is_under(task.base(), positive), "{} not under {}", positive, task.base());
            }
        }
    }

    #[test]
    fn bases_are_distinct(patterns in proptest::collection::vec(pattern(), 0..8)) {
        let tasks = generate(&patterns, &Settings::default());
        let mut bases: Vec<&str> = tasks.iter().map(|task| task.base()).collect();
        let before = bases.len();
        bases.sort_unstable();
        bases.dedup();
        prop_assert_eq!(before, bases.len());
    }

    #[test]
    fn static_tasks_never_carry_negatives(patterns in proptest::collection::vec(pattern(), 0..8)) {
        for task in generate(&patterns, &Settings::default()) {
            if !task.is_dynamic() {
                prop_assert!(task.negative().is_empty());
            }
        }
    }

    #[test]
    fn case_insensitive_tasks_are_all_dynamic(patterns in proptest::collection::vec(pattern(), 0..8)) {
        let settings = Settings::new(Options {
            case_sensitive_match: false,
            ..Options::default()
        });
        for task in generate(&patterns, &settings) {
            prop_assert!(task.is_dynamic());
        }
    }

    #[test]
    fn negatives_reach_tasks_sharing_their_base(
        patterns in proptest::collection::vec(pattern(), 0..8),
        case_sensitive in any::<bool>(),
    ) {
        let negatives: Vec<&str> = patterns
            .iter()
            .filter_map(|pattern| pattern.strip_prefix('!'))
            .collect();
        for task in generate(&patterns, &settings_for(case_sensitive)) {
            for negative in &negatives {
                let negative_base = folded_base(negative, case_sensitive);
                let shares_base = task
                    .positive()
                    .iter()
                    .any(|positive| folded_base(positive, case_sensitive) == negative_base);
                if shares_base {
                    prop_assert!(
                        task.negative().iter().any(|attached| attached.as_str() == *negative),
                        "{} missing from task {}", negative, task.base()
                    );
                }
            }
        }
    }
}
