use crossdupe::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use crossdupe::options::{ConfigError, ScanOptions};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_nested_roots_rejected_when_recursive() {
    let temp = TempDir::new().unwrap();
    let outer = temp.path().join("outer");
    let inner = outer.join("inner");
    fs::create_dir_all(&inner).unwrap();

    let err = DuplicateFinder::with_defaults()
        .find_duplicates(&ScanOptions::new(&outer, &inner, true))
        .unwrap_err();
    assert!(matches!(
        err,
        FinderError::Config(ConfigError::NestedDirectories { .. })
    ));

    // Either order is rejected
    let err = ScanOptions::new(&inner, &outer, true).validate().unwrap_err();
    match err {
        ConfigError::NestedDirectories { outer: o, inner: i } => {
            assert_eq!(o, outer.canonicalize().unwrap());
            assert_eq!(i, inner.canonicalize().unwrap());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_nested_roots_allowed_without_recursion() {
    let temp = TempDir::new().unwrap();
    let outer = temp.path().join("outer");
    let inner = outer.join("inner");
    fs::create_dir_all(&inner).unwrap();
    fs::write(outer.join("a.txt"), b"shared").unwrap();
    fs::write(inner.join("b.txt"), b"shared").unwrap();

    let groups = crossdupe::find_duplicates(&outer, &inner, false).unwrap();

    assert_eq!(groups.len(), 1);
    assert!(groups[0].spans_both_trees());
}

#[test]
fn test_sibling_with_common_name_prefix_is_not_nested() {
    let temp = TempDir::new().unwrap();
    let foo = temp.path().join("foo");
    let foobar = temp.path().join("foobar");
    fs::create_dir(&foo).unwrap();
    fs::create_dir(&foobar).unwrap();

    assert!(ScanOptions::new(&foo, &foobar, true).validate().is_ok());
    assert!(ScanOptions::new(&foobar, &foo, true).validate().is_ok());
}

#[test]
fn test_same_directory_rejected() {
    let temp = TempDir::new().unwrap();

    let err = ScanOptions::new(temp.path(), temp.path(), false)
        .validate()
        .unwrap_err();

    assert!(matches!(err, ConfigError::SameDirectory(_)));
}

#[test]
fn test_same_directory_through_dot_segments_rejected() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a");
    fs::create_dir(&a).unwrap();
    let roundabout = a.join("..").join("a");

    let err = ScanOptions::new(&a, &roundabout, false)
        .validate()
        .unwrap_err();

    assert!(matches!(err, ConfigError::SameDirectory(_)));
}

#[cfg(unix)]
#[test]
fn test_symlinked_root_resolves_to_same_directory() {
    let temp = TempDir::new().unwrap();
    let real = temp.path().join("real");
    let link = temp.path().join("link");
    fs::create_dir(&real).unwrap();
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let err = ScanOptions::new(&real, &link, true).validate().unwrap_err();

    assert!(matches!(err, ConfigError::SameDirectory(_)));
}

#[test]
fn test_cross_tree_only_drops_single_root_groups() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a");
    let b = temp.path().join("b");
    fs::create_dir(&a).unwrap();
    fs::create_dir(&b).unwrap();
    fs::write(a.join("x1"), b"local copy").unwrap();
    fs::write(a.join("x2"), b"local copy").unwrap();
    fs::write(a.join("y"), b"shared!!!!").unwrap();
    fs::write(b.join("y"), b"shared!!!!").unwrap();

    let options = ScanOptions::new(&a, &b, false);

    let (all, _) = DuplicateFinder::with_defaults()
        .find_duplicates(&options)
        .unwrap();
    assert_eq!(all.len(), 2);

    let (cross, summary) = DuplicateFinder::new(FinderConfig::default().with_cross_tree_only(true))
        .find_duplicates(&options)
        .unwrap();
    assert_eq!(cross.len(), 1);
    assert_eq!(summary.duplicate_groups, 1);
    assert_eq!(cross[0].files, vec![a.join("y"), b.join("y")]);
}

#[test]
fn test_files_in_first_tree_listed_before_second() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a");
    let b = temp.path().join("b");
    fs::create_dir(&a).unwrap();
    fs::create_dir(&b).unwrap();
    // Names chosen so the second tree's file sorts first alphabetically
    fs::write(a.join("zzz"), b"same").unwrap();
    fs::write(b.join("aaa"), b"same").unwrap();

    let groups = crossdupe::find_duplicates(&a, &b, false).unwrap();

    assert_eq!(groups[0].files, vec![a.join("zzz"), b.join("aaa")]);
    assert_eq!(groups[0].first_tree, 1);
    assert_eq!(groups[0].second_tree, 1);
}
