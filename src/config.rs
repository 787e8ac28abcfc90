//! Configuration module for zeno
//!
//! Settings live in `<config dir>/zeno/config.toml`, which is written with
//! defaults on first run. Environment variables prefixed with `ZENO_`
//! override the file, e.g. `ZENO_PREVIEW_MAX_LINES=40` or
//! `ZENO_LOGGING__LEVEL=debug`.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Smallest and largest share of the width the list pane may take
const LIST_WIDTH_RANGE: (u16, u16) = (10, 90);

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ZenoConfig {
    /// Database directory; `<data dir>/zeno/db` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Code lines shown in the preview before it is truncated
    pub preview_max_lines: usize,

    /// Share of the terminal width given to the snippet list, in percent
    pub list_width_percent: u16,

    /// syntect theme used for the preview
    pub highlight_theme: String,

    /// Title-case new snippet titles in `zeno add`
    pub title_case: bool,

    pub logging: LoggingConfig,
}

impl Default for ZenoConfig {
    fn default() -> Self {
        Self {
            database: None,
            preview_max_lines: 20,
            list_width_percent: 40,
            highlight_theme: "base16-ocean.dark".to_string(),
            title_case: false,
            logging: LoggingConfig::default(),
        }
    }
}

/// File logging settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    /// Default filter directive; `RUST_LOG` takes precedence
    pub level: String,
    /// Log directory; `<data dir>/zeno/logs` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
            dir: None,
        }
    }
}

fn data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_local_dir()
        .map(|dir| dir.join("zeno"))
        .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))
}

impl ZenoConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                ConfigError::Message("Could not determine config directory".to_string())
            })?;

        Ok(config_dir.join("zeno").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, creating it with defaults if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::default().save_to(path)?;
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(
                Environment::with_prefix("ZENO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Write the configuration as TOML to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| {
                    ConfigError::Message(format!("Failed to create config directory: {e}"))
                })?;
        }

        fs::write(path, self.to_toml()?)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))
    }

    /// Effective settings rendered as TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }

    /// Database directory, falling back to the platform data directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the data directory
    /// cannot be determined.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("db")),
        }
    }

    /// Log directory, falling back to the platform data directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no directory is configured and the data
    /// directory cannot be determined.
    pub fn log_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.logging.dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(data_dir()?.join("logs")),
        }
    }

    /// List pane width, clamped to a usable range
    #[must_use]
    pub fn list_width_percent(&self) -> u16 {
        self.list_width_percent
            .clamp(LIST_WIDTH_RANGE.0, LIST_WIDTH_RANGE.1)
    }
}
