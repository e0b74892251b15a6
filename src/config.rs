//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`--config PATH`, or `crossdupe/config.toml` in the
//!    platform config directory)
//! 3. Environment variables prefixed with `CROSSDUPE_` (e.g. `CROSSDUPE_IO_THREADS=8`)
//! 4. Flags given on the command line
//!
//! ```toml
//! recursive = true
//! io_threads = 2
//! output = "json"
//! cross_tree_only = false
//! progress = true
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, OutputFormat};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "CROSSDUPE_";

/// Errors raised while loading configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigFileError {
    /// A file passed with `--config` does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// A file or environment override could not be parsed.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] figment::Error),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Walk full subtrees instead of direct children only.
    pub recursive: bool,
    /// I/O threads for hashing and verification.
    pub io_threads: usize,
    /// Report format.
    pub output: OutputFormat,
    /// Only report groups spanning both roots.
    pub cross_tree_only: bool,
    /// Show progress bars for text output.
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recursive: false,
            io_threads: 4,
            output: OutputFormat::Text,
            cross_tree_only: false,
            progress: true,
        }
    }
}

impl Config {
    /// Load configuration, optionally from an explicit file.
    ///
    /// An explicit file must exist and parse. A broken file at the default
    /// location is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigFileError`] if `explicit` is missing or invalid, or
    /// if an environment override has the wrong type.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigFileError> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigFileError::NotFound(path.to_path_buf()));
            }
            return Ok(Self::figment(Some(path)).extract()?);
        }

        if let Some(path) = Self::default_path().filter(|p| p.is_file()) {
            match Self::figment(Some(&path)).extract() {
                Ok(config) => {
                    log::debug!("Loaded config from {}", path.display());
                    return Ok(config);
                }
                Err(e) => {
                    log::warn!(
                        "Ignoring invalid config file {}: {}",
                        path.display(),
                        e
                    );
                }
            }
        }

        Ok(Self::figment(None).extract()?)
    }

    /// The provider stack: defaults, then `file` if given, then environment.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Get the default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "crossdupe").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Apply flags given on the command line.
    ///
    /// Switches only ever turn a setting on; valued options replace the
    /// configured value when present.
    #[must_use]
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        self.recursive |= cli.recursive;
        self.cross_tree_only |= cli.cross_only;
        if cli.no_progress || cli.quiet {
            self.progress = false;
        }
        if let Some(threads) = cli.io_threads {
            self.io_threads = threads;
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
        self
    }
}
