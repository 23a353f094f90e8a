//! dupescan - Concurrent Duplicate File Finder
//!
//! Lists the entries directly inside one directory, hashes every regular file
//! with BLAKE3 across a pool of workers, and reports the groups of files whose
//! contents are identical.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! let groups = dupescan::scan(Path::new("/tmp/downloads"), 4)?;
//! for group in &groups {
//!     println!("{}: {:?}", group.hash_hex(), group.files);
//! }
//! # Ok::<(), dupescan::duplicates::FinderError>(())
//! ```

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use anyhow::Context;

pub use duplicates::{scan, DuplicateFinder, DuplicateGroup, FinderConfig, FinderError, ScanSummary};

use cli::{Cli, OutputFormat};
use config::Config;
use error::ExitCode;
use output::{JsonOutput, TextOutput};
use progress::Progress;

/// Run the command-line application and return its exit code.
///
/// Fatal failures (the directory cannot be listed, the scan was interrupted,
/// output cannot be written) are returned as errors for the caller to report.
///
/// # Errors
///
/// Returns an error if the scan fails or the results cannot be written.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    log::debug!("Log level: {}", logging::current_level_name());

    let config = Config::load(cli.config.as_deref()).apply_cli(&cli);
    log::debug!("Effective configuration: {:?}", config);

    let mut finder_config = config.finder_config();

    match signal::install_handler() {
        Ok(handler) => finder_config = finder_config.with_shutdown_flag(handler.flag()),
        Err(e) => log::warn!("{}; Ctrl+C will terminate immediately", e),
    }

    let show_progress = config.progress
        && config.output == OutputFormat::Text
        && !cli.quiet
        && io::stderr().is_terminal();
    if show_progress {
        finder_config = finder_config.with_progress_callback(Arc::new(Progress::new(false)));
    }

    let finder = DuplicateFinder::new(finder_config);
    let (groups, summary) = finder
        .find_duplicates(&cli.path)
        .with_context(|| format!("scanning {}", cli.path.display()))?;

    let exit_code = ExitCode::for_scan(groups.len(), summary.has_errors());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.output {
        OutputFormat::Text => {
            let color = !cli.no_color && stdout.is_terminal();
            TextOutput::new(&groups, &summary, color)
                .write_to(&mut out)
                .context("writing results")?;
        }
        OutputFormat::Json => {
            JsonOutput::new(&groups, &summary, exit_code)
                .write_to(&mut out, true)
                .context("writing JSON results")?;
        }
    }
    out.flush().context("flushing output")?;

    Ok(exit_code)
}
