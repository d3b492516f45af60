//! Configuration System
//!
//! TOML config file plus environment variable overrides.

use fi_dashboard_core::models::targets::FiTargets;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("failed to parse config {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    /// FI goals; any field left out keeps its default
    #[serde(default)]
    pub targets: FiTargets,

    #[serde(default)]
    pub display: DisplayConfig,

    /// Manual exchange-rate overrides: code → units per 1 SGD
    #[serde(default)]
    pub rates: BTreeMap<String, f64>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("fi-dash").to_string_lossy().to_string())
        .unwrap_or_else(|| "./fi_dash_data".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayConfig {
    /// Currency to show when `--currency` isn't given; the stored
    /// preference is used if this is unset too
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    pub fn parse(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Explicit path if given, else the per-user config file if present,
    /// else defaults. Environment overrides are applied last.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::load(&path)?,
                None => Config::default(),
            },
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fi-dash").join("config.toml"))
    }

    /// Apply `FIDASH_*` overrides, reading variables through `lookup`.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("FIDASH_DATA_DIR") {
            self.storage.data_dir = dir;
        }
        if let Some(level) = lookup("FIDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(currency) = lookup("FIDASH_CURRENCY") {
            self.display.currency = Some(currency);
        }
    }
}
