//! A file that cannot be read is skipped; the rest of the scan completes.

#[cfg(unix)]
mod unix {
    use dupescan::duplicates::{DuplicateFinder, FinderConfig, FinderError};
    use dupescan::scanner::ScanError;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    fn running_as_root() -> bool {
        // Permission bits do not stop root from reading.
        let dir = tempdir().unwrap();
        let probe = dir.path().join("probe");
        fs::write(&probe, b"p").unwrap();
        fs::set_permissions(&probe, fs::Permissions::from_mode(0o000)).unwrap();
        fs::read(&probe).is_ok()
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        if running_as_root() {
            return;
        }

        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a"), b"dup").unwrap();
        fs::write(dir.path().join("b"), b"dup").unwrap();
        let locked = dir.path().join("locked");
        fs::write(&locked, b"dup").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let (groups, summary) = DuplicateFinder::new(FinderConfig::default().with_workers(3))
            .find_duplicates(dir.path())
            .unwrap();

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

        assert_eq!(groups.len(), 1);
        assert!(!groups[0].contains("locked"));
        assert_eq!(groups[0].len(), 2);
        assert_eq!(summary.files_hashed, 2);
        assert_eq!(summary.scan_errors.len(), 1);
        assert!(summary.has_errors());
    }

    #[test]
    fn test_unlistable_directory_is_fatal() {
        if running_as_root() {
            return;
        }

        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("a"), b"dup").unwrap();
        fs::write(locked.join("b"), b"dup").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = DuplicateFinder::with_defaults().find_duplicates(&locked);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        match result {
            Err(FinderError::ScanError(ScanError::PermissionDenied(path))) => {
                assert_eq!(path, locked);
            }
            other => panic!("expected a permission error, got {other:?}"),
        }
    }

    #[test]
    fn test_dangling_symlink_is_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a"), b"same").unwrap();
        fs::write(dir.path().join("b"), b"same").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();

        let (groups, summary) = DuplicateFinder::with_defaults()
            .find_duplicates(dir.path())
            .unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(summary.scan_errors.len(), 1);
    }
}
