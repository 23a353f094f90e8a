//! Layered application configuration.
//!
//! Settings are merged with figment, lowest priority first:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. A TOML file: the `--config` path if given, otherwise `config.toml` in
//!    the platform configuration directory
//! 3. Environment variables prefixed with `DUPESCAN_` (e.g. `DUPESCAN_THREADS=4`)
//! 4. CLI flags ([`Config::apply_cli`])
//!
//! ```toml
//! threads = 8
//! buffer_size = 65536
//! output = "json"
//! progress = false
//! ```

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, OutputFormat};
use crate::duplicates::{FinderConfig, DEFAULT_WORKERS};
use crate::scanner::DEFAULT_BUFFER_SIZE;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "DUPESCAN_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of scan workers.
    pub threads: usize,
    /// Read buffer size for hashing, in bytes.
    pub buffer_size: usize,
    /// Result presentation format.
    pub output: OutputFormat,
    /// Show a progress bar while hashing.
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threads: DEFAULT_WORKERS,
            buffer_size: DEFAULT_BUFFER_SIZE,
            output: OutputFormat::Text,
            progress: true,
        }
    }
}

impl Config {
    /// Build the figment for defaults, the TOML file and the environment.
    ///
    /// `file` overrides the platform default location.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = file.map(Path::to_path_buf).or_else(Self::default_path) {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load the configuration, falling back to defaults if it is invalid.
    pub fn load(file: Option<&Path>) -> Self {
        if let Some(path) = file {
            if !path.exists() {
                log::warn!("Config file {} not found, ignoring", path.display());
            }
        }

        match Self::figment(file).extract::<Config>() {
            Ok(config) => config.sanitized(),
            Err(e) => {
                log::warn!("Invalid configuration, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Replace zero worker or buffer counts with their defaults.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if self.threads == 0 {
            log::warn!("threads = 0 is invalid, using {}", DEFAULT_WORKERS);
            self.threads = DEFAULT_WORKERS;
        }
        if self.buffer_size == 0 {
            log::warn!("buffer_size = 0 is invalid, using {}", DEFAULT_BUFFER_SIZE);
            self.buffer_size = DEFAULT_BUFFER_SIZE;
        }
        self
    }

    /// Apply CLI flags on top of the loaded configuration.
    #[must_use]
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(threads) = cli.threads {
            self.threads = threads;
        }
        if let Some(buffer_size) = cli.buffer_size {
            self.buffer_size = buffer_size;
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
        if cli.no_progress {
            self.progress = false;
        }
        self
    }

    /// Scan configuration derived from these settings.
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig::default()
            .with_workers(self.threads)
            .with_buffer_size(self.buffer_size)
    }

    /// Write the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("serializing configuration")?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Platform-specific default configuration file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "dupescan", "dupescan")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
