//! Unusual file names and filesystem entries.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn two_roots() -> (TempDir, PathBuf, PathBuf) {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("left");
    let b = temp.path().join("right");
    fs::create_dir(&a).unwrap();
    fs::create_dir(&b).unwrap();
    (temp, a, b)
}

#[test]
fn test_unicode_and_whitespace_names() {
    let (_temp, a, b) = two_roots();
    fs::write(a.join("résumé final.txt"), b"cv").unwrap();
    fs::write(b.join("日本語 ファイル.txt"), b"cv").unwrap();

    let groups = crossdupe::find_duplicates(&a, &b, false).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].files[0], a.join("résumé final.txt"));
    assert_eq!(groups[0].files[1], b.join("日本語 ファイル.txt"));
}

#[test]
fn test_hidden_files_are_scanned() {
    let (_temp, a, b) = two_roots();
    fs::write(a.join(".hidden"), b"dotfile").unwrap();
    fs::write(b.join("visible"), b"dotfile").unwrap();

    let groups = crossdupe::find_duplicates(&a, &b, false).unwrap();

    assert_eq!(groups.len(), 1);
}

#[test]
fn test_deeply_nested_file() {
    let (_temp, a, b) = two_roots();
    let mut deep = a.clone();
    for i in 0..30 {
        deep = deep.join(format!("level{i}"));
    }
    fs::create_dir_all(&deep).unwrap();
    fs::write(deep.join("bottom.bin"), b"deep content").unwrap();
    fs::write(b.join("top.bin"), b"deep content").unwrap();

    let groups = crossdupe::find_duplicates(&a, &b, true).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].files[0], deep.join("bottom.bin"));
}

#[test]
fn test_empty_subdirectories_ignored() {
    let (_temp, a, b) = two_roots();
    fs::create_dir_all(a.join("empty/also_empty")).unwrap();
    fs::create_dir_all(b.join("nothing")).unwrap();

    let groups = crossdupe::find_duplicates(&a, &b, true).unwrap();

    assert!(groups.is_empty());
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_not_followed() {
    use std::os::unix::fs::symlink;

    let (temp, a, b) = two_roots();
    let target = temp.path().join("target.txt");
    fs::write(&target, b"linked").unwrap();
    symlink(&target, a.join("link.txt")).unwrap();
    fs::write(b.join("copy.txt"), b"linked").unwrap();

    let outside = temp.path().join("outside");
    fs::create_dir(&outside).unwrap();
    fs::write(outside.join("inner.txt"), b"linked").unwrap();
    symlink(&outside, a.join("dirlink")).unwrap();

    let groups = crossdupe::find_duplicates(&a, &b, true).unwrap();

    assert!(groups.is_empty());
}

#[cfg(unix)]
#[test]
fn test_hard_links_reported_as_duplicates() {
    let (_temp, a, b) = two_roots();
    fs::write(a.join("original"), b"hard linked").unwrap();
    fs::hard_link(a.join("original"), b.join("link")).unwrap();

    let groups = crossdupe::find_duplicates(&a, &b, false).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].files, vec![a.join("original"), b.join("link")]);
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_file_name() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let (_temp, a, b) = two_roots();
    let name = OsStr::from_bytes(b"bad\xffname.bin");
    fs::write(a.join(name), b"raw bytes").unwrap();
    fs::write(b.join("good.bin"), b"raw bytes").unwrap();

    let groups = crossdupe::find_duplicates(&a, &b, false).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].files[0], a.join(name));
}
