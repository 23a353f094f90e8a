//! Scan coordinator: list, partition, hash concurrently, reduce.
//!
//! # Overview
//!
//! [`DuplicateFinder`] drives one scan of a single directory:
//! 1. **Listing** - collect the immediate entries (fatal on failure)
//! 2. **Partitioned** - split the entries into one contiguous chunk per worker
//! 3. **Scanning** - hash every regular file of each chunk on its own worker
//!    and record the digest in a shared [`ResultMap`]
//! 4. **Reducing** - keep every digest shared by two or more files
//!
//! Workers run on a dedicated rayon pool inside a scope, so the coordinator
//! cannot reach the reduction before every worker has returned.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default().with_workers(4));
//! let (groups, summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! println!("{} groups from {} files", groups.len(), summary.files_hashed);
//! ```

use std::fmt;
use std::ops::Range;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use super::groups::{reduce_groups, DuplicateGroup};
use super::map::ResultMap;
use super::partition::partition;
use crate::progress::{ProgressCallback, PHASE_HASHING};
use crate::scanner::{FileEntry, Hasher, ScanError, Walker, DEFAULT_BUFFER_SIZE};

/// Default number of scan workers.
pub const DEFAULT_WORKERS: usize = 10;

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Requested number of workers; clamped to the number of listed entries.
    pub workers: usize,
    /// Read buffer size used by the content hasher.
    pub buffer_size: usize,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinderConfig")
            .field("workers", &self.workers)
            .field("buffer_size", &self.buffer_size)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "ProgressCallback"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            buffer_size: DEFAULT_BUFFER_SIZE,
            shutdown_flag: None,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the requested worker count (minimum 1).
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the hasher's read buffer size (minimum 1).
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Lifecycle of a single scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// No scan has started.
    Idle,
    /// Listing the directory entries.
    Listing,
    /// Entries split into worker chunks.
    Partitioned,
    /// Workers are hashing files.
    Scanning,
    /// Building duplicate groups from the result map.
    Reducing,
    /// Scan finished.
    Done,
    /// Listing failed or the scan was interrupted.
    Failed,
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Listing => "listing",
            Self::Partitioned => "partitioned",
            Self::Scanning => "scanning",
            Self::Reducing => "reducing",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Summary statistics from a scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Entries listed in the directory (files and subdirectories)
    pub entries_listed: usize,
    /// Subdirectories skipped by the workers
    pub directories_skipped: usize,
    /// FIFOs, sockets and device nodes skipped by the workers
    pub special_skipped: usize,
    /// Files successfully hashed and recorded
    pub files_hashed: usize,
    /// Total bytes read while hashing
    pub bytes_hashed: u64,
    /// Workers actually spawned
    pub workers_used: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Total number of duplicate files (excluding one original per group)
    pub duplicate_files: usize,
    /// Duration of the entire scan
    pub scan_duration: Duration,
    /// Per-file errors; the affected files are absent from every group
    pub scan_errors: Vec<ScanError>,
}

impl ScanSummary {
    /// Check whether any file could not be hashed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.scan_errors.is_empty()
    }

    /// Format bytes hashed as a human-readable string.
    #[must_use]
    pub fn bytes_hashed_display(&self) -> String {
        bytesize::ByteSize::b(self.bytes_hashed).to_string()
    }
}

/// Errors that end a scan without a result.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The scan was interrupted by user (Ctrl+C or shutdown signal).
    #[error("Scan interrupted by user")]
    Interrupted,

    /// The directory could not be listed.
    #[error(transparent)]
    ScanError(#[from] ScanError),
}

/// State shared by every worker for the duration of the scanning phase.
struct WorkerContext<'a> {
    map: &'a ResultMap,
    errors: &'a Mutex<Vec<ScanError>>,
    files_hashed: &'a AtomicUsize,
    bytes_hashed: &'a AtomicU64,
    processed: &'a AtomicUsize,
}

impl WorkerContext<'_> {
    fn push_error(&self, error: ScanError) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(error);
    }
}

/// Duplicate finder that coordinates one concurrent scan at a time.
#[derive(Debug)]
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
    phase: Mutex<ScanPhase>,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let hasher = Hasher::with_buffer_size(config.buffer_size);
        Self {
            config,
            hasher,
            phase: Mutex::new(ScanPhase::Idle),
        }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Phase reached by the most recent scan.
    #[must_use]
    pub fn phase(&self) -> ScanPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_phase(&self, phase: ScanPhase) {
        log::debug!("Scan phase: {}", phase);
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = phase;
    }

    /// Find all files in `path` that share content with another file there.
    ///
    /// Only the immediate entries of `path` are considered; subdirectories
    /// are skipped. Files that cannot be opened or read are logged, recorded
    /// in [`ScanSummary::scan_errors`] and left out of every group.
    ///
    /// # Errors
    ///
    /// - [`FinderError::ScanError`] if the directory cannot be listed; no
    ///   worker is started in that case
    /// - [`FinderError::Interrupted`] if the shutdown flag was raised
    pub fn find_duplicates(
        &self,
        path: &Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start_time = Instant::now();
        let mut summary = ScanSummary::default();

        self.set_phase(ScanPhase::Listing);
        let entries = Walker::new(path).list().map_err(|e| {
            self.set_phase(ScanPhase::Failed);
            FinderError::from(e)
        })?;
        summary.entries_listed = entries.len();
        summary.directories_skipped = entries.iter().filter(|e| e.is_dir).count();
        summary.special_skipped = entries.iter().filter(|e| e.is_special).count();
        let hashable = entries.len() - summary.directories_skipped - summary.special_skipped;

        self.set_phase(ScanPhase::Partitioned);
        let chunks = partition(entries.len(), self.config.workers);
        if chunks.is_empty() {
            log::info!("No entries in {}, nothing to scan", path.display());
            summary.scan_duration = start_time.elapsed();
            self.set_phase(ScanPhase::Done);
            return Ok((Vec::new(), summary));
        }
        summary.workers_used = chunks.len();
        log::debug!(
            "Partitioned {} entries into {} chunks",
            entries.len(),
            chunks.len()
        );

        self.set_phase(ScanPhase::Scanning);
        let map = ResultMap::new();
        let errors = Mutex::new(Vec::new());
        let files_hashed = AtomicUsize::new(0);
        let bytes_hashed = AtomicU64::new(0);
        let processed = AtomicUsize::new(0);
        let ctx = WorkerContext {
            map: &map,
            errors: &errors,
            files_hashed: &files_hashed,
            bytes_hashed: &bytes_hashed,
            processed: &processed,
        };

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start(PHASE_HASHING, hashable);
        }

        log::info!(
            "Hashing {} files with {} workers",
            hashable,
            chunks.len()
        );
        self.run_workers(&entries, &chunks, &ctx);

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end(PHASE_HASHING);
        }

        if self.config.is_shutdown_requested() {
            log::info!("Scan interrupted by shutdown signal");
            self.set_phase(ScanPhase::Failed);
            return Err(FinderError::Interrupted);
        }

        summary.files_hashed = files_hashed.into_inner();
        summary.bytes_hashed = bytes_hashed.into_inner();
        summary.scan_errors = errors.into_inner().unwrap_or_else(PoisonError::into_inner);

        self.set_phase(ScanPhase::Reducing);
        let groups = reduce_groups(map.into_inner());
        summary.duplicate_groups = groups.len();
        summary.duplicate_files = groups.iter().map(DuplicateGroup::duplicate_count).sum();
        summary.scan_duration = start_time.elapsed();
        self.set_phase(ScanPhase::Done);

        log::info!(
            "Scan complete: {} files hashed, {} groups, {} duplicates, {} errors in {:?}",
            summary.files_hashed,
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.scan_errors.len(),
            summary.scan_duration
        );

        Ok((groups, summary))
    }

    /// Run one worker per chunk and return once all of them have finished.
    fn run_workers(&self, entries: &[FileEntry], chunks: &[Range<usize>], ctx: &WorkerContext<'_>) {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(chunks.len())
            .thread_name(|i| format!("dupescan-worker-{i}"))
            .build();

        match pool {
            Ok(pool) => pool.scope(|scope| self.spawn_chunks(scope, entries, chunks, ctx)),
            Err(e) => {
                log::warn!(
                    "Failed to create worker pool ({}), using global pool with {} threads",
                    e,
                    rayon::current_num_threads()
                );
                rayon::scope(|scope| self.spawn_chunks(scope, entries, chunks, ctx));
            }
        }
    }

    fn spawn_chunks<'s>(
        &'s self,
        scope: &rayon::Scope<'s>,
        entries: &'s [FileEntry],
        chunks: &'s [Range<usize>],
        ctx: &'s WorkerContext<'s>,
    ) {
        for (worker, range) in chunks.iter().enumerate() {
            let chunk = &entries[range.clone()];
            scope.spawn(move |_| self.scan_chunk(worker, chunk, ctx));
        }
    }

    fn scan_chunk(&self, worker: usize, chunk: &[FileEntry], ctx: &WorkerContext<'_>) {
        log::trace!("Worker {}: {} entries", worker, chunk.len());

        for entry in chunk {
            if self.config.is_shutdown_requested() {
                log::debug!("Worker {}: Shutdown requested, stopping", worker);
                return;
            }

            if entry.is_dir {
                log::trace!("Skipping directory: {}", entry.name);
                continue;
            }

            if entry.is_special {
                log::trace!("Skipping special file: {}", entry.name);
                continue;
            }

            match self.hasher.hash_file_counted(&entry.path) {
                Ok((hash, bytes)) => {
                    log::trace!("Hashed {} ({} bytes)", entry.name, bytes);
                    ctx.map.record(hash, entry.name.clone());
                    ctx.files_hashed.fetch_add(1, Ordering::Relaxed);
                    ctx.bytes_hashed.fetch_add(bytes, Ordering::Relaxed);
                }
                Err(e) => {
                    log::warn!("Failed to hash {}: {}", entry.name, e);
                    ctx.push_error(e.into());
                }
            }

            let current = ctx.processed.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(ref callback) = self.config.progress_callback {
                callback.on_progress(current, &entry.name);
            }
        }
    }
}

/// Scan `directory` with up to `workers` concurrent workers.
///
/// Convenience wrapper around [`DuplicateFinder::find_duplicates`] that
/// discards the summary.
///
/// # Errors
///
/// Returns [`FinderError`] only if the directory cannot be listed.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// let groups = dupescan::scan(Path::new("."), 10).unwrap();
/// for group in &groups {
///     println!("{:?}", group.files);
/// }
/// ```
pub fn scan(directory: &Path, workers: usize) -> Result<Vec<DuplicateGroup>, FinderError> {
    let config = FinderConfig::default().with_workers(workers);
    DuplicateFinder::new(config)
        .find_duplicates(directory)
        .map(|(groups, _)| groups)
}
