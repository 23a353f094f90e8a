use dupescan::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use dupescan::scanner::ScanError;
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

fn write_file(dir: &std::path::Path, name: &str, content: &[u8]) {
    File::create(dir.join(name))
        .unwrap()
        .write_all(content)
        .unwrap();
}

fn sorted_groups(groups: Vec<dupescan::DuplicateGroup>) -> Vec<Vec<String>> {
    let mut out: Vec<Vec<String>> = groups
        .into_iter()
        .map(|g| {
            let mut files = g.files;
            files.sort();
            files
        })
        .collect();
    out.sort();
    out
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.entries_listed, 0);
    assert_eq!(summary.workers_used, 0);
}

#[test]
fn test_scan_single_file() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "only.txt", b"alone");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.workers_used, 1);
    assert_eq!(summary.files_hashed, 1);
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "a.txt", b"content a");
    write_file(dir.path(), "b.txt", b"content b");
    write_file(dir.path(), "c.txt", b"content c");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.files_hashed, 3);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_scan_one_pair() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "a.txt", b"hello");
    write_file(dir.path(), "b.txt", b"hello");
    write_file(dir.path(), "c.txt", b"world");

    let groups = dupescan::scan(dir.path(), 10).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(sorted_groups(groups), vec![vec!["a.txt", "b.txt"]]);
}

#[test]
fn test_scan_all_identical_with_one_worker() {
    let dir = tempdir().unwrap();
    for name in ["x", "y", "z"] {
        write_file(dir.path(), name, b"same bytes");
    }

    let (groups, summary) = DuplicateFinder::new(FinderConfig::default().with_workers(1))
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(summary.workers_used, 1);
    assert_eq!(summary.duplicate_files, 2);
    assert_eq!(sorted_groups(groups), vec![vec!["x", "y", "z"]]);
}

#[test]
fn test_subdirectories_are_skipped() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "f", b"payload");
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    // Identical content below the top level is never visited.
    write_file(&sub, "f", b"payload");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.entries_listed, 2);
    assert_eq!(summary.directories_skipped, 1);
    assert_eq!(summary.files_hashed, 1);
    assert!(!summary.has_errors());
}

#[test]
fn test_workers_clamped_to_entry_count() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "one", b"1");
    write_file(dir.path(), "two", b"1");

    let (groups, summary) = DuplicateFinder::new(FinderConfig::default().with_workers(64))
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(summary.workers_used, 2);
    assert_eq!(groups.len(), 1);
}

#[test]
fn test_many_files_few_workers() {
    let dir = tempdir().unwrap();
    // 103 files, content repeats every 10 files.
    for i in 0..103 {
        write_file(dir.path(), &format!("file_{i:03}"), format!("body {}", i % 10).as_bytes());
    }

    let (groups, summary) = DuplicateFinder::new(FinderConfig::default().with_workers(4))
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(summary.workers_used, 4);
    assert_eq!(summary.files_hashed, 103);
    assert_eq!(groups.len(), 10);
    let total: usize = groups.iter().map(|g| g.len()).sum();
    assert_eq!(total, 103);
}

#[test]
fn test_result_independent_of_worker_count() {
    let dir = tempdir().unwrap();
    for i in 0..25 {
        write_file(dir.path(), &format!("n{i}"), format!("{}", i % 4).as_bytes());
    }

    let baseline = sorted_groups(dupescan::scan(dir.path(), 1).unwrap());
    for workers in [2, 3, 7, 25, 100] {
        let groups = sorted_groups(dupescan::scan(dir.path(), workers).unwrap());
        assert_eq!(groups, baseline, "workers = {workers}");
    }
}

#[test]
fn test_empty_files_are_duplicates() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "empty1", b"");
    write_file(dir.path(), "empty2", b"");

    let groups = dupescan::scan(dir.path(), 2).unwrap();
    assert_eq!(sorted_groups(groups), vec![vec!["empty1", "empty2"]]);
}

#[test]
fn test_large_files_span_many_buffers() {
    let dir = tempdir().unwrap();
    let mut big = vec![7u8; 64 * 1024 + 3];
    write_file(dir.path(), "big1", &big);
    write_file(dir.path(), "big2", &big);
    *big.last_mut().unwrap() = 8;
    write_file(dir.path(), "big3", &big);

    let groups = dupescan::scan(dir.path(), 3).unwrap();
    assert_eq!(sorted_groups(groups), vec![vec!["big1", "big2"]]);
}

#[test]
fn test_missing_directory_is_fatal() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let err = dupescan::scan(&missing, 4).unwrap_err();
    assert!(matches!(err, FinderError::ScanError(ScanError::NotFound(_))));
}

#[test]
fn test_file_as_root_is_fatal() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "plain", b"x");

    let err = dupescan::scan(&dir.path().join("plain"), 4).unwrap_err();
    assert!(matches!(
        err,
        FinderError::ScanError(ScanError::NotADirectory(_))
    ));
}
