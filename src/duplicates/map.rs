//! Shared digest → file-name map filled by concurrent scan workers.
//!
//! Workers only ever append through [`ResultMap::record`]; the coordinator
//! reads the map back with [`ResultMap::snapshot`] or
//! [`ResultMap::into_inner`] once every worker has finished.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::scanner::Hash;

/// Mutex-guarded mapping from content digest to the files that produced it.
///
/// File order within a digest is the order in which `record` calls acquired
/// the lock, which is unspecified across workers.
#[derive(Debug, Default)]
pub struct ResultMap {
    inner: Mutex<HashMap<Hash, Vec<String>>>,
}

impl ResultMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `file` under `hash`, creating the entry if needed.
    pub fn record(&self, hash: Hash, file: String) {
        self.lock().entry(hash).or_default().push(file);
    }

    /// Number of distinct digests recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Total number of files recorded across all digests.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    /// Copy of the full mapping.
    ///
    /// Only meaningful once all writers have finished.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<Hash, Vec<String>> {
        self.lock().clone()
    }

    /// Consume the map and return the mapping without copying.
    #[must_use]
    pub fn into_inner(self) -> HashMap<Hash, Vec<String>> {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // Entries are append-only, so a panicking writer cannot leave a
    // half-updated value behind; recover the guard instead of propagating.
    fn lock(&self) -> MutexGuard<'_, HashMap<Hash, Vec<String>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
