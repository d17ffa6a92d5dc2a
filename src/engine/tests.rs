use crate::{GitignoreMatcher, WalkDirLister, partition_directory};
use crate::{Options, Partition};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const FIXTURE: &str = "\
# This is a comment in a .gitignore file!
/node_modules
*.log

# Ignore this nonexistent file
/nonexistent

# Do not ignore this file
!/nonexistent/foo

# Ignore some files

/baz

/foo/*.wat

# Ignore some deep sub folders
/othernonexistent/**/what

# Unignore some other sub folders
!/othernonexistent/**/what/foo


*.swp
";

const NO_NEGATIVES: &str = "\
node_modules/
*.log
";

fn fixture() -> GitignoreMatcher {
    GitignoreMatcher::new(FIXTURE).unwrap()
}

fn no_negatives() -> GitignoreMatcher {
    GitignoreMatcher::new(NO_NEGATIVES).unwrap()
}

fn check(rules: &GitignoreMatcher, cases: &[(&str, bool)], query: fn(&GitignoreMatcher, &str, bool) -> bool) {
    for (path, expected) in cases {
        assert_eq!(query(rules, path, *expected), *expected, "{path}");
    }
}

#[test]
fn fixture_accepts() {
    check(
        &fixture(),
        &[
            ("test/index.js", true),
            ("wat/test/index.js", true),
            ("test.swp", false),
            ("foo/test.swp", false),
            ("node_modules/wat.js", false),
            ("foo/bar.wat", false),
            ("nonexistent", false),
            ("nonexistent/bar", false),
            ("nonexistent/foo", true),
            ("nonexistent/foo/wat", true),
        ],
        GitignoreMatcher::accepts_expecting,
    );

    check(
        &no_negatives(),
        &[("test/index.js", true), ("node_modules.json", true), ("node_modules/wat.js", false)],
        GitignoreMatcher::accepts_expecting,
    );
}

#[test]
fn fixture_denies() {
    check(
        &fixture(),
        &[
            ("test.swp", true),
            ("foo/test.swp", true),
            ("node_modules/wat.js", true),
            ("foo/bar.wat", true),
            ("nonexistent", true),
            ("nonexistent/bar", true),
            ("test/index.js", false),
            ("wat/test/index.js", false),
            ("nonexistent/foo", false),
            ("nonexistent/foo/wat", false),
        ],
        GitignoreMatcher::denies_expecting,
    );

    check(
        &no_negatives(),
        &[
            ("node_modules/wat.js", true),
            ("node_modules/", true),
            ("node_modules/foo", true),
            ("test/index.js", false),
            ("wat/test/index.js", false),
            ("node_modules.json", false),
        ],
        GitignoreMatcher::denies_expecting,
    );
}

#[test]
fn fixture_inspects() {
    check(
        &fixture(),
        &[
            ("lib", false),
            ("lib/foo/bar", false),
            ("baz", true),
            ("baz/wat/foo", true),
            ("nonexistent", true),
            ("nonexistent/foo", true),
            ("nonexistent/foo/bar", true),
            ("nonexistent/wat", true),
            ("nonexistent/wat/foo", true),
        ],
        GitignoreMatcher::inspects_expecting,
    );

    check(
        &no_negatives(),
        &[("lib", false), ("lib/foo/bar", false), ("node_modules/", true), ("node_modules/wat/foo", true)],
        GitignoreMatcher::inspects_expecting,
    );
}

#[test]
fn deep_reinclude_beats_deep_ignore() {
    let rules = fixture();
    assert!(rules.denies("othernonexistent/a/b/what"));
    assert!(rules.denies("othernonexistent/a/what/bar"));
    assert!(rules.accepts("othernonexistent/a/b/what/foo"));
    assert!(rules.accepts("othernonexistent/what/foo/deeper"));
}

#[test]
fn directory_only_rule_needs_trailing_slash() {
    let rules = no_negatives();
    assert!(rules.accepts("node_modules"));
    assert!(rules.denies("node_modules/"));
    assert!(rules.denies("deep/node_modules/x.js"));
}

#[test]
fn reinclude_inside_ignored_directory() {
    let rules = GitignoreMatcher::new("node_modules\n!node_modules/keep").unwrap();
    assert!(!rules.denies("node_modules/keep"));
    assert!(rules.accepts("node_modules/keep"));
    assert!(rules.denies("node_modules/other"));
}

#[test]
fn overlap_follows_longer_match_not_line_order() {
    // The re-include comes first in the file and the deny last, yet the
    // re-include wins wherever it matches the longer span.
    let rules = GitignoreMatcher::new("!/logs/important/\n/logs/\n").unwrap();
    let eval = rules.evaluate("logs/important/today.txt");
    assert!(eval.is_overlap());
    assert!(eval.accepts());

    // And the deny wins where its span is longer, regardless of order.
    let rules = GitignoreMatcher::new("/logs/important/\n!logs\n").unwrap();
    let eval = rules.evaluate("logs/important/today.txt");
    assert!(eval.is_overlap());
    assert_eq!(eval.accept_match().unwrap().rule.pattern(), "logs");
    assert_eq!(eval.deny_match().unwrap().rule.pattern(), "/logs/important/");
    assert!(eval.denies());
}

#[test]
fn overlap_compares_character_lengths() {
    let rules = GitignoreMatcher::new("abcde\n!ééé").unwrap();
    assert!(rules.denies_expecting("ééé/abcde", true));
    assert!(!rules.accepts_expecting("ééé/abcde", false));
    assert!(rules.accepts("ééé/x"));
}

#[test]
fn plain_file_name_matches_at_any_depth() {
    let rules = GitignoreMatcher::new("foo.txt").unwrap();
    assert!(rules.denies("foo.txt"));
    assert!(!rules.accepts("foo.txt"));
    assert!(rules.denies("a/foo.txt"));
    assert!(!rules.accepts("a/foo.txt"));
}

#[test]
fn rooted_patterns_do_not_overmatch_siblings() {
    let cases = [
        ("/ajax/libs/bPopup/*b*", "/ajax/libs/bPopup/0.9.0"),
        ("/ajax/libs/jquery-form-validator/2.2", "/ajax/libs/jquery-form-validator/2.2.43"),
        ("/ajax/libs/punycode/2.0", "/ajax/libs/punycode/2.0.0"),
        ("/ajax/libs/typescript/*dev*", "/ajax/libs/typescript/2.0.6-insiders.20161014"),
    ];
    for (pattern, path) in cases {
        let rules = GitignoreMatcher::new(pattern).unwrap();
        assert!(rules.accepts_expecting(path, true), "{pattern} vs {path}");
    }
}

#[test]
fn hyphenated_directory_name_at_any_depth() {
    let rules = GitignoreMatcher::new("node-modules").unwrap();
    for path in ["packages/my-package/node-modules", "packages/my-package/node-modules/a", "node-modules/a"] {
        assert!(rules.denies(path), "{path}");
        assert!(!rules.accepts(path), "{path}");
    }
}

#[test]
fn only_one_numbered_subtree_is_kept() {
    let rules = GitignoreMatcher::new("a/*\n!a/2\na/2/*\n!a/2/a\n").unwrap();
    assert!(rules.accepts("a/2/a"));
    assert!(!rules.accepts("a/3/a"));
}

#[test]
fn compiling_twice_is_byte_identical() {
    let a = fixture();
    let b = fixture();
    assert_eq!(a.positives().merged_source(), b.positives().merged_source());
    assert_eq!(a.negatives().merged_source(), b.negatives().merged_source());
    assert_eq!(
        a.positives().individual_sources().collect::<Vec<_>>(),
        b.positives().individual_sources().collect::<Vec<_>>()
    );
}

#[test]
fn partition_over_a_tree() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("node_modules/keep")).unwrap();
    std::fs::create_dir_all(root.join("src")).unwrap();
    std::fs::write(root.join("node_modules/keep/index.js"), "").unwrap();
    std::fs::write(root.join("node_modules/other.js"), "").unwrap();
    std::fs::write(root.join("src/main.rs"), "").unwrap();
    std::fs::write(root.join("debug.log"), "").unwrap();

    let rules = "node_modules\n!node_modules/keep\n*.log\n";
    let partition = partition_directory(rules, root, &Options::default()).unwrap();
    assert_eq!(
        partition,
        Partition {
            accepted: vec!["/".into(), "node_modules/keep/index.js".into(), "src/main.rs".into()],
            denied: vec!["debug.log".into(), "node_modules/other.js".into()],
        }
    );

    let matcher = GitignoreMatcher::new(rules).unwrap();
    assert_eq!(matcher.denied_in(&WalkDirLister::default(), root).unwrap(), partition.denied);
    assert_eq!(matcher.accepted_in(&WalkDirLister::default(), root).unwrap(), partition.accepted);
}

#[test]
fn rule_file_partition_defaults_to_its_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::write(root.join(".gitignore"), "*.o\n").unwrap();
    std::fs::write(root.join("main.o"), "").unwrap();
    std::fs::write(root.join("main.c"), "").unwrap();

    let partition = crate::partition_rule_file(&root.join(".gitignore"), "utf-8", None, &Options::default()).unwrap();
    assert_eq!(partition.accepted, vec!["/", ".gitignore", "main.c"]);
    assert_eq!(partition.denied, vec!["main.o"]);
}

#[test]
fn matcher_is_shareable_across_threads() {
    let rules = std::sync::Arc::new(fixture());
    let handles: Vec<_> = ["test.swp", "nonexistent/foo", "lib/x"]
        .into_iter()
        .map(|path| {
            let rules = std::sync::Arc::clone(&rules);
            std::thread::spawn(move || (path, rules.accepts(path)))
        })
        .collect();

    let mut results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    results.sort();
    assert_eq!(results, vec![("lib/x", true), ("nonexistent/foo", true), ("test.swp", false)]);
}

fn path_strategy() -> impl Strategy<Value = String> {
    let segment = prop_oneof![
        Just("node_modules".to_string()),
        Just("nonexistent".to_string()),
        Just("foo".to_string()),
        Just("what".to_string()),
        Just("baz".to_string()),
        "[a-z]{1,6}(\\.(log|swp|wat|js))?",
    ];
    (prop::collection::vec(segment, 1..6), any::<bool>()).prop_map(|(segments, trailing)| {
        let mut path = segments.join("/");
        if trailing {
            path.push('/');
        }
        path
    })
}

proptest! {
    #[test]
    fn accepts_is_the_complement_of_denies(path in path_strategy()) {
        let rules = fixture();
        prop_assert_eq!(rules.accepts(&path), !rules.denies(&path));
    }

    #[test]
    fn untouched_paths_are_accepted(path in path_strategy()) {
        let rules = fixture();
        if !rules.inspects(&path) {
            prop_assert!(rules.accepts(&path));
            prop_assert!(!rules.denies(&path));
        }
    }
}
