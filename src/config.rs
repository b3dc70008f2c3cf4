//! Configuration
//!
//! Read from `--config <path>` or, by default, from
//! `<config dir>/tokenkit/config.toml` (`~/.config/tokenkit/config.toml` on Linux).
//! A missing default file yields the default configuration.
//!
//! ```toml
//! [scan]
//! stop_markers = ["?>"]
//!
//! [detect]
//! candidates = ["c", "ini"]
//!
//! [output]
//! format = "json"
//! color = false
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::output::OutputMode;

/// Directory holding the configuration file, under the user config dir
pub const CONFIG_DIR: &str = "tokenkit";

/// Configuration file name
pub const CONFIG_FILE: &str = "config.toml";

/// Errors loading the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// The file is not valid TOML for this configuration
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        /// File that was parsed
        path: PathBuf,
        /// Underlying error
        source: toml::de::Error,
    },
}

/// tokenkit configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Scanning defaults
    #[serde(default)]
    pub scan: ScanConfig,
    /// Auto-detection settings
    #[serde(default)]
    pub detect: DetectConfig,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Scanning defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Stop markers applied to every scan, before any given on the command line
    #[serde(default)]
    pub stop_markers: Vec<String>,
}

/// Auto-detection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectConfig {
    /// Grammar names tried, in preference order; empty means every grammar
    #[serde(default)]
    pub candidates: Vec<String>,
}

/// Output settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format, `--json` overrides it
    #[serde(default)]
    pub format: OutputMode,
    /// Color human output
    #[serde(default = "default_color")]
    pub color: bool,
}

const fn default_color() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputMode::default(),
            color: default_color(),
        }
    }
}

impl Config {
    /// Default config file path, if the platform has a config directory
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, or from the default path when `None`
    ///
    /// An explicit path must exist; a missing default file gives the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                },
            },
        }
    }

    /// Load from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }
}
