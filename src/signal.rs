//! Ctrl+C handling for cancelling a scan.
//!
//! The first Ctrl+C raises the flag held by [`ShutdownHandler`]. Workers
//! check it before opening each file, so the files already being hashed are
//! finished and the scan then ends with [`FinderError::Interrupted`]. A second
//! Ctrl+C while the flag is still raised exits the process immediately with
//! status 130.
//!
//! [`FinderError::Interrupted`]: crate::duplicates::FinderError::Interrupted

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use crate::error::ExitCode;

/// Cancellation flag shared between the Ctrl+C hook and the scan workers.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    cancelled: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a handler with no cancellation pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the scan should stop picking up new files.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Raise the flag. Returns `true` if it was already raised.
    pub fn cancel(&self) -> bool {
        self.cancelled.swap(true, Ordering::SeqCst)
    }

    /// The flag itself, for [`FinderConfig::with_shutdown_flag`].
    ///
    /// [`FinderConfig::with_shutdown_flag`]: crate::duplicates::FinderConfig::with_shutdown_flag
    #[must_use]
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Lower the flag before the next scan.
    pub fn clear(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}

/// Failure to register the Ctrl+C hook.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("Could not install Ctrl+C handler: {0}")]
    InstallFailed(#[from] ctrlc::Error),
}

static INSTALLED: OnceLock<ShutdownHandler> = OnceLock::new();

/// Register the process-wide Ctrl+C hook and return its handler, cleared.
///
/// `ctrlc` takes one hook per process; later calls hand back the handler
/// registered first.
///
/// # Errors
///
/// Returns [`SignalError::InstallFailed`] if the hook cannot be registered
/// and no earlier call succeeded.
pub fn install_handler() -> Result<ShutdownHandler, SignalError> {
    if let Some(handler) = INSTALLED.get() {
        handler.clear();
        return Ok(handler.clone());
    }

    let handler = ShutdownHandler::new();
    let hook = handler.clone();

    let registered = ctrlc::set_handler(move || {
        let mut stderr = std::io::stderr();
        if hook.cancel() {
            let _ = writeln!(stderr, "\nAborted.");
            std::process::exit(ExitCode::Interrupted.as_i32());
        }
        let _ = writeln!(
            stderr,
            "\nInterrupted. Finishing files in progress (Ctrl+C again to abort)..."
        );
        let _ = stderr.flush();
        log::info!("Cancellation requested");
    });

    match (registered, INSTALLED.get()) {
        (Ok(()), _) => Ok(INSTALLED.get_or_init(|| handler).clone()),
        // Another thread registered between the check above and ours.
        (Err(_), Some(existing)) => {
            existing.clear();
            Ok(existing.clone())
        }
        (Err(e), None) => Err(e.into()),
    }
}
