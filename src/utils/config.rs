//! Application configuration module.
//!
//! Configuration is loaded from a JSON file; every field has a sensible
//! default so the server can run without one.

use super::error::ConfigError;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/app_config.json";

/// Global configuration instance
static CONFIG_INSTANCE: OnceCell<AppConfig> = OnceCell::new();

fn default_max_file_size() -> u64 {
    50 * 1024 * 1024 // 50 MB
}

fn default_temp_directory() -> Box<str> {
    "temp".into()
}

fn default_host_url() -> Box<str> {
    "0.0.0.0:3000".into()
}

fn default_max_report_rows() -> usize {
    20
}

/// Application configuration structure.
///
/// String fields use `Box<str>` since they are set once and never modified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Maximum allowed upload size in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Directory path for finished archives awaiting download
    #[serde(default = "default_temp_directory")]
    pub temp_directory: Box<str>,

    /// Host URL for the server
    #[serde(default = "default_host_url")]
    pub host_url: Box<str>,

    /// Extraction cap: maximum number of valid report rows read per document
    #[serde(default = "default_max_report_rows")]
    pub max_report_rows: usize,
}

impl AppConfig {
    /// Load configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Initialize the global configuration instance from the default path,
    /// falling back to defaults when the file does not exist.
    pub fn init() -> Result<&'static Self, ConfigError> {
        CONFIG_INSTANCE.get_or_try_init(|| {
            if Path::new(DEFAULT_CONFIG_PATH).exists() {
                Self::from_file(DEFAULT_CONFIG_PATH)
            } else {
                Ok(Self::default())
            }
        })
    }

    /// Get the global configuration instance.
    ///
    /// If the configuration hasn't been initialized, returns default values.
    #[must_use]
    pub fn get() -> &'static Self {
        CONFIG_INSTANCE.get_or_init(Self::default)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            temp_directory: default_temp_directory(),
            host_url: default_host_url(),
            max_report_rows: default_max_report_rows(),
        }
    }
}
