//! Progress reporting utilities using indicatif.
//!
//! This module provides the [`ProgressCallback`] trait that the scan
//! coordinator reports through, and [`Progress`], an indicatif-backed
//! implementation that draws a single bar for the hashing phase.

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};

/// Name of the hashing phase as reported to [`ProgressCallback`].
pub const PHASE_HASHING: &str = "hashing";

/// Progress callback for the scan.
///
/// Implementations are shared by every worker, so they must be `Send + Sync`
/// and tolerate calls arriving out of order.
pub trait ProgressCallback: Send + Sync {
    /// Called when a phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase` - Name of the phase (e.g., "hashing")
    /// * `total` - Total number of items to process
    fn on_phase_start(&self, phase: &str, total: usize);

    /// Called for each item processed.
    ///
    /// # Arguments
    ///
    /// * `current` - Number of items finished so far (1-based)
    /// * `name` - Name of the item just finished
    fn on_progress(&self, current: usize, name: &str);

    /// Called when a phase completes.
    fn on_phase_end(&self, phase: &str);
}

/// Progress reporter using indicatif.
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, no progress bar will be displayed.
    ///
    /// # Examples
    ///
    /// ```
    /// use dupescan::progress::Progress;
    ///
    /// let progress = Progress::new(false);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(ref pb) = *guard {
                f(pb);
            }
        }
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, total: usize) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::style());
        pb.set_message(format!("{phase}..."));
        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_progress(&self, current: usize, name: &str) {
        if self.quiet {
            return;
        }

        // Workers finish out of order; never move the bar backwards.
        self.with_bar(|pb| {
            if current as u64 > pb.position() {
                pb.set_position(current as u64);
            }
            pb.set_message(truncate_name(name, 30));
        });
    }

    fn on_phase_end(&self, phase: &str) {
        if self.quiet {
            return;
        }

        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
                log::debug!("Progress: {} complete", phase);
            }
        }
    }
}

/// Truncate a file name for display in the progress bar.
fn truncate_name(name: &str, max_len: usize) -> String {
    let count = name.chars().count();
    if count <= max_len {
        return name.to_string();
    }

    let tail: String = name.chars().skip(count - (max_len - 3)).collect();
    format!("...{tail}")
}
