//! End-to-end resolution on the calling thread.

mod integration;

use globtree::{
    Deep, Glob, GlobError, Options, escape_path, glob_iter, glob_sync, glob_sync_paths,
    glob_sync_with,
};
use integration::helpers::{CountingFileSystem, LockedFileSystem, options_for};
use test_support::{FixtureTree, sorted};

fn resolve(tree: &FixtureTree, patterns: &[&str], options: Options) -> Vec<String> {
    sorted(glob_sync_paths(patterns, options).expect("resolution succeeds"))
        .into_iter()
        .map(|path| path.replace(&tree.root_posix(), "<root>"))
        .collect()
}

#[test]
fn static_pattern_is_resolved_without_listing() {
    let tree = FixtureTree::with_paths(&["a/file.json", "a/other.json"]);
    let file_system = CountingFileSystem::shared();

    let entries = Glob::new(["a/file.json"])
        .with_options(options_for(&tree))
        .with_file_system(file_system.clone())
        .collect()
        .unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path(), "a/file.json");
    assert_eq!(entries[0].depth(), 2);
    assert_eq!(file_system.listings(), 0);
}

#[test]
fn missing_static_pattern_yields_nothing() {
    let tree = FixtureTree::with_paths(&["present.txt"]);
    assert!(resolve(&tree, &["absent.txt"], options_for(&tree)).is_empty());
}

#[test]
fn escaped_literal_paths_resolve() {
    let tree = FixtureTree::with_paths(&["weird[1].txt"]);
    let pattern = escape_path("weird[1].txt");
    assert_eq!(resolve(&tree, &[pattern.as_str()], options_for(&tree)), ["weird[1].txt"]);
}

#[test]
fn negatives_and_ignore_exclude_matches() {
    let tree = FixtureTree::with_paths(&["a.txt", "b.txt", "c.log", "d.tmp"]);

    let options = Options {
        ignore: vec!["*.tmp".to_owned()],
        ..options_for(&tree)
    };
    assert_eq!(resolve(&tree, &["*", "!b.txt"], options), ["a.txt", "c.log"]);
}

#[test]
fn negated_subtree_is_not_walked() {
    let tree = FixtureTree::with_paths(&["src/app.js", "node_modules/dep/index.js"]);
    let file_system = CountingFileSystem::shared();

    let paths: Vec<String> = Glob::new(["**/*.js", "!**/node_modules/**"])
        .with_options(options_for(&tree))
        .with_file_system(file_system.clone())
        .collect_with(|entry| entry.into_path())
        .unwrap();

    assert_eq!(paths, ["src/app.js"]);
    // the root and `src`
    assert_eq!(file_system.listings(), 2);
}

#[test]
fn overlapping_tasks_report_a_path_once() {
    let tree = FixtureTree::with_paths(&["a/b/x.txt", "a/y.txt"]);
    let patterns = ["a/**/*.txt", "a/b/*.txt"];

    assert_eq!(
        resolve(&tree, &patterns, options_for(&tree)),
        ["a/b/x.txt", "a/y.txt"]
    );

    let repeated = Options {
        unique: false,
        ..options_for(&tree)
    };
    assert_eq!(
        resolve(&tree, &patterns, repeated),
        ["a/b/x.txt", "a/b/x.txt", "a/y.txt"]
    );
}

#[test]
fn results_follow_task_order() {
    let tree = FixtureTree::with_paths(&["z/1.txt", "a/1.txt", "a/2.txt"]);

    let paths = glob_sync_paths(&["z/*.txt", "a/*.txt"], options_for(&tree)).unwrap();
    assert_eq!(paths, ["z/1.txt", "a/1.txt", "a/2.txt"]);
}

#[test]
fn depth_limit_bounds_walk() {
    let tree = FixtureTree::with_paths(&["a.txt", "one/b.txt", "one/two/c.txt"]);
    let limited = |deep: Deep| Options {
        deep,
        ..options_for(&tree)
    };

    assert!(resolve(&tree, &["**"], limited(Deep::from(false))).is_empty());
    assert_eq!(resolve(&tree, &["**"], limited(Deep::Limited(1))), ["a.txt"]);
    assert_eq!(
        resolve(&tree, &["**"], limited(Deep::Limited(2))),
        ["a.txt", "one/b.txt"]
    );
    assert_eq!(
        resolve(&tree, &["**"], limited(Deep::from(true))),
        ["a.txt", "one/b.txt", "one/two/c.txt"]
    );
    assert_eq!(resolve(&tree, &["one/**"], limited(Deep::Limited(1))), ["one/b.txt"]);
}

#[test]
fn depth_limit_applies_to_exact_paths() {
    let tree = FixtureTree::with_paths(&["a/b/c.txt", "a/d.txt"]);
    let options = Options {
        deep: Deep::Limited(2),
        ..options_for(&tree)
    };

    let entries = glob_sync(&["a/b/c.txt", "a/d.txt"], options).unwrap();
    let paths: Vec<&str> = entries.iter().map(|entry| entry.path()).collect();
    assert_eq!(paths, ["a/d.txt"]);
    assert!(entries.iter().all(|entry| entry.depth() <= 2));
}

#[test]
fn reported_depth_counts_segments_below_base() {
    let tree = FixtureTree::with_paths(&["one/two/c.txt"]);

    let entries = glob_sync(&["one/**"], options_for(&tree)).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path(), "one/two/c.txt");
    assert_eq!(entries[0].base_path(), "one");
    assert_eq!(entries[0].depth(), 2);
}

#[test]
fn only_directories_overrides_only_files() {
    let tree = FixtureTree::with_paths(&["a/b/c.txt", "d.txt"]);

    let options = Options {
        only_files: true,
        only_directories: true,
        ..options_for(&tree)
    };
    assert_eq!(resolve(&tree, &["**"], options), ["a", "a/b"]);
}

#[test]
fn mark_directories_appends_slash() {
    let tree = FixtureTree::with_paths(&["a/b/c.txt"]);

    let options = Options {
        only_files: false,
        mark_directories: true,
        ..options_for(&tree)
    };
    assert_eq!(resolve(&tree, &["**"], options), ["a/", "a/b/", "a/b/c.txt"]);
}

#[test]
fn absolute_paths_are_rooted_at_cwd() {
    let tree = FixtureTree::with_paths(&["src/lib.rs", "src/main.rs"]);

    let options = Options {
        absolute: true,
        ..options_for(&tree)
    };
    assert_eq!(
        resolve(&tree, &["src/*.rs"], options),
        ["<root>/src/lib.rs", "<root>/src/main.rs"]
    );
}

#[test]
fn absolute_paths_outside_cwd_are_normalised() {
    let tree = FixtureTree::with_paths(&["work/", "shared/a.txt"]);

    let options = Options {
        cwd: Some(tree.path("work")),
        absolute: true,
        ..Options::default()
    };
    assert_eq!(
        resolve(&tree, &["../shared/*.txt", "../shared/a.txt"], options),
        ["<root>/shared/a.txt"]
    );
}

#[test]
fn base_name_match_searches_every_level() {
    let tree = FixtureTree::with_paths(&["docs/x/readme.md", "top.md", "src/lib.rs"]);

    let options = Options {
        base_name_match: true,
        ..options_for(&tree)
    };
    assert_eq!(
        resolve(&tree, &["*.md"], options),
        ["docs/x/readme.md", "top.md"]
    );
}

#[test]
fn dot_entries_need_the_dot_option() {
    let tree = FixtureTree::with_paths(&[".hidden/a.txt", "b.txt"]);

    assert_eq!(resolve(&tree, &["**/*.txt"], options_for(&tree)), ["b.txt"]);
    let options = Options {
        dot: true,
        ..options_for(&tree)
    };
    assert_eq!(
        resolve(&tree, &["**/*.txt"], options),
        [".hidden/a.txt", "b.txt"]
    );
}

#[test]
fn case_insensitive_patterns_walk_instead_of_stat() {
    let tree = FixtureTree::with_paths(&["readme.md"]);

    let options = Options {
        case_sensitive_match: false,
        ..options_for(&tree)
    };
    assert_eq!(resolve(&tree, &["README.MD"], options), ["readme.md"]);
}

#[test]
fn case_insensitive_negatives_reach_differently_cased_bases() {
    let tree = FixtureTree::with_paths(&["b/x.md", "b/y.txt"]);

    let options = Options {
        case_sensitive_match: false,
        ..options_for(&tree)
    };
    assert_eq!(resolve(&tree, &["b/*", "!B/*.md"], options), ["b/y.txt"]);
}

#[test]
fn patterns_may_leave_the_working_directory() {
    let tree = FixtureTree::with_paths(&["work/", "shared/a.txt"]);

    let options = Options {
        cwd: Some(tree.path("work")),
        ..Options::default()
    };
    assert_eq!(
        glob_sync_paths(&["../shared/*.txt"], options).unwrap(),
        ["../shared/a.txt"]
    );
}

#[test]
fn transform_runs_in_output_order() {
    let tree = FixtureTree::with_paths(&["b.txt", "a.txt"]);

    let names = glob_sync_with(&["*.txt"], options_for(&tree), |entry| {
        entry.name().to_uppercase()
    })
    .unwrap();
    assert_eq!(names, ["A.TXT", "B.TXT"]);
}

#[test]
fn stats_are_attached() {
    let tree = FixtureTree::new();
    tree.write("data.bin", b"12345");

    let options = Options {
        stats: true,
        ..options_for(&tree)
    };
    let entries = glob_sync(&["*.bin"], options).unwrap();
    let stats = entries[0].stats().expect("stats requested");
    assert_eq!(stats.size(), 5);
}

#[test]
fn invalid_pattern_fails_the_call() {
    let tree = FixtureTree::with_paths(&["a.txt"]);

    let error = glob_sync(&["[z-a].txt"], options_for(&tree)).unwrap_err();
    assert!(matches!(error, GlobError::Pattern(_)));
}

#[test]
fn extended_globs_resolve() {
    let tree = FixtureTree::with_paths(&["a.txt", "b.txt", "ab.txt", "c.txt", "c.md"]);

    assert_eq!(
        resolve(&tree, &["*(a|b).txt"], options_for(&tree)),
        ["a.txt", "ab.txt", "b.txt"]
    );
    assert_eq!(
        resolve(&tree, &["+(a).txt"], options_for(&tree)),
        ["a.txt"]
    );
    assert_eq!(
        resolve(&tree, &["!(a|b).txt"], options_for(&tree)),
        ["ab.txt", "c.txt"]
    );

    let no_brace = Options {
        brace: false,
        ..options_for(&tree)
    };
    assert_eq!(
        resolve(&tree, &["@(a|b).txt"], no_brace.clone()),
        ["a.txt", "b.txt"]
    );
    assert_eq!(resolve(&tree, &["c?(.md)"], no_brace), ["c.md"]);
}

#[test]
fn missing_base_directory_is_not_an_error() {
    let tree = FixtureTree::with_paths(&["a.txt"]);
    assert!(resolve(&tree, &["missing/**/*.txt"], options_for(&tree)).is_empty());
}

#[test]
fn unreadable_directory_is_skipped() {
    let tree = FixtureTree::with_paths(&["locked/secret.txt", "open/a.txt", "top.txt"]);

    let paths = Glob::new(["**/*.txt"])
        .with_options(options_for(&tree))
        .with_file_system(LockedFileSystem::shared(tree.path("locked")))
        .collect_with(|entry| entry.into_path())
        .unwrap();
    assert_eq!(sorted(paths), ["open/a.txt", "top.txt"]);
}

#[test]
fn unreadable_task_base_fails_the_call() {
    let tree = FixtureTree::with_paths(&["locked/secret.txt", "open/a.txt"]);

    let error = Glob::new(["locked/*.txt", "open/*.txt"])
        .with_options(options_for(&tree))
        .with_file_system(LockedFileSystem::shared(tree.path("locked")))
        .collect()
        .unwrap_err();
    assert_eq!(error.path(), Some(tree.path("locked").as_path()));
}

#[test]
fn suppress_errors_keeps_going() {
    let tree = FixtureTree::with_paths(&["locked/secret.txt", "open/a.txt"]);

    let paths = Glob::new(["locked/*.txt", "open/*.txt"])
        .with_options(Options {
            suppress_errors: true,
            ..options_for(&tree)
        })
        .with_file_system(LockedFileSystem::shared(tree.path("locked")))
        .collect_with(|entry| entry.into_path())
        .unwrap();
    assert_eq!(paths, ["open/a.txt"]);
}

#[test]
fn iterator_stops_after_first_error() {
    let tree = FixtureTree::with_paths(&["locked/secret.txt", "open/a.txt"]);

    let mut iter = Glob::new(["locked/*.txt", "open/*.txt"])
        .with_options(options_for(&tree))
        .with_file_system(LockedFileSystem::shared(tree.path("locked")))
        .iter();
    assert!(iter.next().expect("an item").is_err());
    assert!(iter.next().is_none());
}

#[test]
fn iterator_is_lazy() {
    let tree = FixtureTree::with_paths(&["a.txt", "b.txt", "c.txt"]);

    let first = glob_iter(&["*.txt"], options_for(&tree))
        .next()
        .expect("an item")
        .unwrap();
    assert_eq!(first.path(), "a.txt");
}

#[cfg(unix)]
mod symlinks {
    use super::*;

    #[test]
    fn link_cycle_terminates() {
        let tree = FixtureTree::with_paths(&["a/file.txt"]);
        tree.symlink("..", "a/loop");

        assert_eq!(resolve(&tree, &["**"], options_for(&tree)), ["a/file.txt"]);
    }

    #[test]
    fn linked_directories_are_followed() {
        let tree = FixtureTree::with_paths(&["real/file.txt"]);
        tree.symlink("real", "alias");

        let followed = resolve(&tree, &["**"], options_for(&tree));
        assert!(followed.contains(&"alias/file.txt".to_owned()));

        let options = Options {
            follow_symbolic_links: false,
            ..options_for(&tree)
        };
        assert_eq!(resolve(&tree, &["**"], options), ["real/file.txt"]);
    }

    #[test]
    fn broken_link_is_fatal_only_when_asked() {
        let tree = FixtureTree::with_paths(&["a.txt"]);
        tree.symlink("nowhere", "dangling");

        assert_eq!(resolve(&tree, &["*"], options_for(&tree)), ["a.txt"]);

        let strict = Options {
            throw_error_on_broken_symbolic_link: true,
            ..options_for(&tree)
        };
        assert!(glob_sync(&["*"], strict).is_err());

        let with_stats = Options {
            stats: true,
            ..options_for(&tree)
        };
        assert!(glob_sync(&["*"], with_stats).is_err());
    }
}
