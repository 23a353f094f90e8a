//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Partitioning listed entries across workers
//! - Concurrent accumulation of digest → file associations
//! - Reducing accumulated digests to duplicate groups
//! - Coordinating a complete scan

pub mod finder;
pub mod groups;
pub mod map;
pub mod partition;

pub use finder::{
    scan, DuplicateFinder, FinderConfig, FinderError, ScanPhase, ScanSummary, DEFAULT_WORKERS,
};
pub use groups::{reduce_groups, DuplicateGroup};
pub use map::ResultMap;
pub use partition::{effective_workers, partition};
