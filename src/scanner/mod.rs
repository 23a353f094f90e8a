//! Scanner module for directory listing and file hashing.
//!
//! This module provides functionality for:
//! - Listing the immediate entries of one directory
//! - Content hashing with BLAKE3 (streaming, fixed-size buffer)
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Non-recursive directory listing
//! - [`hasher`]: BLAKE3 file hashing (streaming)
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{Hasher, Walker};
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! for entry in Walker::new(Path::new(".")).list().unwrap() {
//!     if entry.is_dir {
//!         continue;
//!     }
//!     match hasher.hash_file(&entry.path) {
//!         Ok(hash) => println!("{}: {}", entry.name, dupescan::scanner::hash_to_hex(&hash)),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use hasher::{hash_bytes, hash_to_hex, hex_to_hash, Hash, Hasher, DEFAULT_BUFFER_SIZE};
pub use walker::Walker;

/// One immediate entry of the scanned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Name relative to the scanned directory (the file identifier)
    pub name: String,
    /// Scanned directory joined with the entry name
    pub path: PathBuf,
    /// Whether the entry is a subdirectory (skipped by workers)
    pub is_dir: bool,
    /// FIFO, socket or device node. Skipped by workers, since opening a FIFO
    /// with no writer blocks.
    pub is_special: bool,
}

impl FileEntry {
    /// Create a new FileEntry.
    #[must_use]
    pub fn new(name: impl Into<String>, path: PathBuf, is_dir: bool) -> Self {
        Self {
            name: name.into(),
            path,
            is_dir,
            is_special: false,
        }
    }

    /// Mark the entry as a FIFO, socket or device node.
    #[must_use]
    pub fn with_special(mut self, is_special: bool) -> Self {
        self.is_special = is_special;
        self
    }
}

/// Failure to list the scanned directory, or a per-file [`HashError`].
///
/// The listing variants end the scan; `HashError` is only ever collected into
/// the scan summary.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The directory exists but may not be read.
    #[error("Cannot list {0}: permission denied")]
    PermissionDenied(PathBuf),

    /// Nothing exists at the given path.
    #[error("Directory not found: {0}")]
    NotFound(PathBuf),

    /// The path exists but names a file or other non-directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Any other failure while reading the directory entries.
    #[error("Cannot list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    HashError(#[from] HashError),
}

/// A single file could not be opened or read to the end.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// Listed, but gone (or a dangling link) by the time a worker opened it.
    #[error("Cannot open {0}: no such file")]
    NotFound(PathBuf),

    #[error("Cannot open {0}: permission denied")]
    PermissionDenied(PathBuf),

    /// Open or read failed for another reason.
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Path of the file that failed.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) => p,
            Self::Io { path, .. } => path,
        }
    }
}
