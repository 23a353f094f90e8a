//! Directory listing for a single, non-recursive scan.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct, which lists the immediate
//! entries of one directory using [`walkdir`] limited to depth 1. Entries are
//! sorted by file name so that chunk assignment downstream is deterministic.
//! Subdirectories are listed (and flagged) rather than descended into; the
//! scan workers skip them.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"));
//! for entry in walker.list().unwrap() {
//!     println!("{} (dir: {})", entry.name, entry.is_dir);
//! }
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileEntry, ScanError};

/// Lister for the immediate entries of one directory.
#[derive(Debug, Clone)]
pub struct Walker {
    /// Directory to list
    root: PathBuf,
}

impl Walker {
    /// Create a new walker for the given directory.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            root: path.to_path_buf(),
        }
    }

    /// List every immediate entry of the directory, sorted by name.
    ///
    /// Symbolic links are not followed; they are listed with the type of the
    /// link itself.
    ///
    /// # Errors
    ///
    /// Any failure here is fatal to the scan:
    /// - [`ScanError::NotFound`] if the path does not exist
    /// - [`ScanError::NotADirectory`] if the path is not a directory
    /// - [`ScanError::PermissionDenied`] if the directory cannot be read
    /// - [`ScanError::Io`] for any other listing failure
    pub fn list(&self) -> Result<Vec<FileEntry>, ScanError> {
        self.validate_root()?;

        let walk = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        let mut entries = Vec::new();
        for result in walk {
            match result {
                Ok(entry) => {
                    let file_type = entry.file_type();
                    let is_dir = file_type.is_dir();
                    let is_special = !is_dir && !file_type.is_file() && !file_type.is_symlink();
                    let name = entry.file_name().to_string_lossy().into_owned();
                    log::trace!("Listed {}{}", name, if is_dir { "/" } else { "" });
                    entries.push(
                        FileEntry::new(name, entry.into_path(), is_dir).with_special(is_special),
                    );
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    return Err(self.listing_error(path, e));
                }
            }
        }

        log::debug!(
            "Listed {} entries in {}",
            entries.len(),
            self.root.display()
        );
        Ok(entries)
    }

    fn validate_root(&self) -> Result<(), ScanError> {
        let metadata = std::fs::metadata(&self.root).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ScanError::NotFound(self.root.clone()),
            ErrorKind::PermissionDenied => ScanError::PermissionDenied(self.root.clone()),
            _ => ScanError::Io {
                path: self.root.clone(),
                source: e,
            },
        })?;

        if metadata.is_dir() {
            Ok(())
        } else {
            Err(ScanError::NotADirectory(self.root.clone()))
        }
    }

    fn listing_error(&self, path: PathBuf, e: walkdir::Error) -> ScanError {
        let source = e.into_io_error().unwrap_or_else(|| {
            std::io::Error::new(ErrorKind::Other, "filesystem loop while listing")
        });
        match source.kind() {
            ErrorKind::NotFound if path == self.root => ScanError::NotFound(path),
            ErrorKind::PermissionDenied if path == self.root => ScanError::PermissionDenied(path),
            _ => ScanError::Io { path, source },
        }
    }
}
