//! Splitting the listed entries into contiguous per-worker chunks.

use std::ops::Range;

/// Number of workers actually used for `entry_count` entries.
///
/// Never more than the entries available and never less than one worker,
/// so no worker is left with an empty chunk. Returns 0 only when there is
/// nothing to scan.
#[must_use]
pub fn effective_workers(requested: usize, entry_count: usize) -> usize {
    if entry_count == 0 {
        return 0;
    }
    requested.clamp(1, entry_count)
}

/// Split `0..entry_count` into `workers` contiguous, non-overlapping ranges.
///
/// Every chunk has `entry_count / workers` entries except the last, which
/// also takes the remainder. `workers` is clamped with
/// [`effective_workers`] first; an empty input yields no chunks.
///
/// # Example
///
/// ```
/// use dupescan::duplicates::partition;
///
/// assert_eq!(partition(10, 3), vec![0..3, 3..6, 6..10]);
/// assert_eq!(partition(2, 8), vec![0..1, 1..2]);
/// assert!(partition(0, 4).is_empty());
/// ```
#[must_use]
pub fn partition(entry_count: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = effective_workers(workers, entry_count);
    if workers == 0 {
        return Vec::new();
    }

    let chunk_size = entry_count / workers;
    (0..workers)
        .map(|i| {
            let start = i * chunk_size;
            let end = if i == workers - 1 {
                entry_count
            } else {
                start + chunk_size
            };
            start..end
        })
        .collect()
}
