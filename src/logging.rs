//! Logging setup for dupescan.
//!
//! Diagnostics go through the `log` facade with an `env_logger` backend on
//! stderr, so they never mix with results printed on stdout. The level is
//! chosen by (in priority order):
//!
//! 1. `RUST_LOG` environment variable (if set)
//! 2. CLI flags: `--quiet` (errors only), `-v` (debug), `-vv` (trace)
//! 3. Default: info
//!
//! Per-file hashing failures are logged at `warn`, so they stay visible at
//! the default level and disappear with `--quiet`.

use env_logger::Builder;
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Initialize logging from the CLI verbosity flags.
///
/// Safe to call more than once; later calls are ignored (this keeps
/// integration tests that drive `run_app` repeatedly from panicking).
///
/// # Example
///
/// ```rust,no_run
/// use dupescan::logging::init_logging;
///
/// init_logging(1, false);
/// log::debug!("visible with -v");
/// ```
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    let from_env = env::var("RUST_LOG").is_ok();
    if from_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    configure_format(&mut builder, verbose);

    if builder.try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
        return;
    }

    if from_env {
        log::debug!("Logging configured from RUST_LOG");
    } else {
        log::debug!(
            "Logging initialized at level: {:?}",
            determine_level(verbose, quiet)
        );
    }
}

/// Determine the log level from CLI flags. `quiet` wins over `verbose`.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Debug builds get a timestamp; with `-v` every line also names the thread
/// that logged it, so records from `dupescan-worker-N` can be told apart.
/// Release builds print level and message only.
fn configure_format(builder: &mut Builder, verbose: u8) {
    #[cfg(debug_assertions)]
    {
        builder.format(move |buf, record| {
            let style = buf.default_level_style(record.level());
            let timestamp = buf.timestamp_millis();
            write!(buf, "{timestamp} {style}{:<5}{style:#} ", record.level())?;
            if verbose >= 1 {
                let thread = std::thread::current();
                write!(buf, "[{}] ", thread.name().unwrap_or("main"))?;
            }
            writeln!(buf, "{}", record.args())
        });
    }

    #[cfg(not(debug_assertions))]
    {
        let _ = verbose;
        builder.format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(buf, "{style}{:<5}{style:#} {}", record.level(), record.args())
        });
    }
}

/// Lowercase name of the active maximum level, e.g. `"debug"`.
#[must_use]
pub fn current_level_name() -> &'static str {
    let level = log::max_level();
    LEVEL_NAMES[level as usize]
}

const LEVEL_NAMES: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
