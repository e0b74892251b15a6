use crossdupe::duplicates::{DuplicateFinder, FinderConfig};
use crossdupe::options::ScanOptions;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

fn setup() -> (TempDir, PathBuf, PathBuf) {
    let root = tempdir().unwrap();
    let a = root.path().join("a");
    let b = root.path().join("b");
    fs::create_dir(&a).unwrap();
    fs::create_dir(&b).unwrap();
    (root, a, b)
}

fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(&path).unwrap().write_all(content).unwrap();
    path
}

#[test]
fn test_scan_empty_directories() {
    let (_root, a, b) = setup();

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(&ScanOptions::new(&a, &b, true))
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files(), 0);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_scan_unique_files() {
    let (_root, a, b) = setup();
    write(&a, "one.txt", b"content a");
    write(&b, "two.txt", b"content b");
    write(&b, "three.txt", b"other size");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(&ScanOptions::new(&a, &b, false))
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files(), 3);
    assert_eq!(summary.eliminated_by_size, 1);
}

#[test]
fn test_scan_reference_scenario() {
    let (_root, a, b) = setup();
    let a_txt = write(&a, "a.txt", b"AAAA");
    let b_bin = write(&a, "b.bin", &[0u8; 10]);
    let c_txt = write(&b, "c.txt", b"AAAA");
    let d_bin = write(&b, "d.bin", &[0u8; 10]);
    let mut e = [0u8; 10];
    e[9] = 0x01;
    write(&b, "e.bin", &e);

    let groups = crossdupe::find_duplicates(&a, &b, false).unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].size, 4);
    assert_eq!(groups[0].files, vec![a_txt, c_txt]);
    assert_eq!(groups[1].size, 10);
    assert_eq!(groups[1].files, vec![b_bin, d_bin]);
}

#[test]
fn test_scan_paths_are_rooted_at_given_directories() {
    let (_root, a, b) = setup();
    write(&a, "x.txt", b"same");
    write(&b, "y.txt", b"same");

    let groups = crossdupe::find_duplicates(&a, &b, false).unwrap();

    assert!(groups[0].files[0].starts_with(&a));
    assert!(groups[0].files[1].starts_with(&b));
}

#[test]
fn test_scan_recursive_finds_nested_duplicates() {
    let (_root, a, b) = setup();
    write(&a, "photos/2020/img.jpg", b"jpeg bytes");
    write(&b, "backup/old/photos/img.jpg", b"jpeg bytes");
    write(&b, "top.jpg", b"jpeg bytes");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(&ScanOptions::new(&a, &b, true))
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 3);
    assert_eq!(groups[0].first_tree, 1);
    assert_eq!(groups[0].second_tree, 2);
    assert_eq!(summary.duplicate_files, 2);
    assert_eq!(summary.reclaimable_space, 20);
}

#[test]
fn test_scan_non_recursive_ignores_subdirectories() {
    let (_root, a, b) = setup();
    write(&a, "sub/hidden.txt", b"payload");
    write(&b, "visible.txt", b"payload");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(&ScanOptions::new(&a, &b, false))
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.first_tree_files, 0);
    assert_eq!(summary.second_tree_files, 1);
}

#[test]
fn test_scan_multiple_groups_same_size() {
    let (_root, a, b) = setup();
    for (name, content) in [("p", b"1111"), ("q", b"2222"), ("r", b"3333")] {
        write(&a, name, content);
        write(&b, name, content);
    }

    let groups = crossdupe::find_duplicates(&a, &b, false).unwrap();

    assert_eq!(groups.len(), 3);
    for group in &groups {
        assert_eq!(group.len(), 2);
        assert!(group.spans_both_trees());
        let first = fs::read(&group.files[0]).unwrap();
        let second = fs::read(&group.files[1]).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_scan_with_single_io_thread() {
    let (_root, a, b) = setup();
    for i in 0..10 {
        write(&a, &format!("f{i}"), format!("content-{}", i % 3).as_bytes());
        write(&b, &format!("g{i}"), format!("content-{}", i % 5).as_bytes());
    }

    let options = ScanOptions::new(&a, &b, false);
    let single = DuplicateFinder::new(FinderConfig::default().with_io_threads(1))
        .find_duplicates(&options)
        .unwrap()
        .0;
    let parallel = DuplicateFinder::new(FinderConfig::default().with_io_threads(8))
        .find_duplicates(&options)
        .unwrap()
        .0;

    assert_eq!(single, parallel);
    assert_eq!(single.len(), 5);
}

#[test]
fn test_scan_summary_tracks_pipeline() {
    let (_root, a, b) = setup();
    write(&a, "x1", b"xxxxxxxx");
    write(&a, "x2", b"xxxxxxxx");
    write(&b, "y1", b"yyyyyyyy");
    write(&b, "x3", b"xxxxxxxx");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(&ScanOptions::new(&a, &b, false))
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(summary.candidates_after_size, 4);
    assert_eq!(summary.candidates_after_prehash, 3);
    assert_eq!(summary.candidates_after_fullhash, 3);
    assert_eq!(summary.bytes_hashed, 32);
    assert_eq!(summary.total_size, 32);
    assert!(summary.wasted_percentage() > 49.0);
}
