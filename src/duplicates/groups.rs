//! Duplicate groups and the reduction that produces them.
//!
//! # Overview
//!
//! Once every worker has recorded its files, the digest map is reduced to a
//! list of [`DuplicateGroup`]s: one per digest that was produced by two or
//! more files. Digests seen only once are dropped.
//!
//! # Example
//!
//! ```
//! use dupescan::duplicates::{reduce_groups, ResultMap};
//! use dupescan::scanner::hash_bytes;
//!
//! let map = ResultMap::new();
//! map.record(hash_bytes(b"hello"), "a.txt".to_string());
//! map.record(hash_bytes(b"hello"), "b.txt".to_string());
//! map.record(hash_bytes(b"world"), "c.txt".to_string());
//!
//! let groups = reduce_groups(map.into_inner());
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::scanner::{hash_to_hex, Hash};

/// Files that share one content digest.
///
/// Only ever built for two or more files. The file order is the order in
/// which workers recorded them, which is not guaranteed to follow the
/// directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// BLAKE3 hash of the file content (32 bytes)
    pub hash: Hash,
    /// File names relative to the scanned directory
    pub files: Vec<String>,
}

impl DuplicateGroup {
    /// Create a new duplicate group.
    #[must_use]
    pub fn new(hash: Hash, files: Vec<String>) -> Self {
        Self { hash, files }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of duplicate copies (total - 1 original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Hash as hexadecimal string.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }

    /// Check whether `name` belongs to this group.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.files.iter().any(|f| f == name)
    }
}

/// Reduce a digest map to its duplicate groups.
///
/// Every digest with at least two files becomes one group holding those files
/// in the order they were accumulated. Group order follows map iteration and
/// is unspecified.
#[must_use]
pub fn reduce_groups(map: HashMap<Hash, Vec<String>>) -> Vec<DuplicateGroup> {
    map.into_iter()
        .filter(|(_, files)| files.len() > 1)
        .map(|(hash, files)| {
            log::debug!(
                "Duplicate group {}: {} files",
                hash_to_hex(&hash),
                files.len()
            );
            DuplicateGroup::new(hash, files)
        })
        .collect()
}
