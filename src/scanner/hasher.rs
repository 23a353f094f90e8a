//! BLAKE3 file hasher with streaming support.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing BLAKE3 digests
//! of file contents. Files are read through a fixed-size buffer and each
//! block is folded into the running hash state in the order it was read, so
//! the digest depends only on the bytes and never on where the reads split.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{hash_to_hex, Hasher};
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let hash = hasher.hash_file(Path::new("Cargo.toml")).unwrap();
//! println!("{}", hash_to_hex(&hash));
//! ```

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use super::HashError;

/// A 32-byte BLAKE3 digest.
pub type Hash = [u8; 32];

/// Default read buffer size (10 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 10 * 1024;

/// Streaming content hasher.
///
/// Holds only the buffer size, so a single `Hasher` can be shared between
/// worker threads; every call allocates its own buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hasher {
    buffer_size: usize,
}

impl Hasher {
    /// Create a hasher with the default 10 KiB buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Create a hasher with a custom read buffer size.
    ///
    /// A size of zero is bumped to one byte.
    #[must_use]
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
        }
    }

    /// Read buffer size in bytes.
    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Digest everything readable from `reader`.
    ///
    /// Reads until end-of-stream. Interrupted reads are retried; any other
    /// read error aborts without producing a digest. The reader's position is
    /// advanced but the reader itself is left open.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if a read fails.
    pub fn hash_reader<R: Read>(&self, reader: &mut R) -> std::io::Result<Hash> {
        self.stream(reader).map(|(hash, _)| hash)
    }

    fn stream<R: Read>(&self, reader: &mut R) -> std::io::Result<(Hash, u64)> {
        let mut state = blake3::Hasher::new();
        let mut buf = vec![0u8; self.buffer_size];
        let mut total = 0u64;

        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    state.update(&buf[..n]);
                    total += n as u64;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok((*state.finalize().as_bytes(), total))
    }

    /// Open the file at `path` and digest its full content.
    ///
    /// # Errors
    ///
    /// - [`HashError::NotFound`] if the file does not exist
    /// - [`HashError::PermissionDenied`] if it cannot be opened for reading
    /// - [`HashError::Io`] for any other open or read failure
    pub fn hash_file(&self, path: &Path) -> Result<Hash, HashError> {
        self.hash_file_counted(path).map(|(hash, _)| hash)
    }

    /// Like [`Hasher::hash_file`], also returning the number of bytes read.
    ///
    /// # Errors
    ///
    /// Same as [`Hasher::hash_file`].
    pub fn hash_file_counted(&self, path: &Path) -> Result<(Hash, u64), HashError> {
        let mut file = File::open(path).map_err(|e| map_open_error(path, e))?;

        self.stream(&mut file).map_err(|source| HashError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

fn map_open_error(path: &Path, e: std::io::Error) -> HashError {
    match e.kind() {
        ErrorKind::NotFound => HashError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => HashError::PermissionDenied(path.to_path_buf()),
        _ => HashError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    }
}

/// Digest an in-memory byte slice.
#[must_use]
pub fn hash_bytes(data: &[u8]) -> Hash {
    *blake3::hash(data).as_bytes()
}

/// Render a digest as 64 lowercase hexadecimal characters.
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    blake3::Hash::from(*hash).to_hex().to_string()
}

/// Parse a 64-character hexadecimal string back into a digest.
///
/// Returns `None` if the string is not valid hex of the right length.
#[must_use]
pub fn hex_to_hash(hex: &str) -> Option<Hash> {
    blake3::Hash::from_hex(hex).ok().map(|h| *h.as_bytes())
}
