//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (CASEFETCH_*)
//! 2. TOML config file (if CASEFETCH_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (CASEFETCH_*)
/// 2. TOML config file (if CASEFETCH_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite case store.
    ///
    /// Set via CASEFETCH_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for document downloads.
    ///
    /// Court sites reject unknown agents, so this defaults to a desktop browser string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via CASEFETCH_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes accepted for a downloaded document.
    ///
    /// Set via CASEFETCH_MAX_DOCUMENT_BYTES environment variable.
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: usize,

    /// Simulated network delay of the mock court source, in milliseconds.
    ///
    /// Set via CASEFETCH_MOCK_LATENCY_MS environment variable.
    #[serde(default = "default_mock_latency_ms")]
    pub mock_latency_ms: u64,

    /// Default number of entries returned by query history.
    ///
    /// Set via CASEFETCH_HISTORY_LIMIT environment variable.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Directory downloaded documents are written to.
    ///
    /// Set via CASEFETCH_DOWNLOAD_DIR environment variable.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Directory database backups are written to.
    ///
    /// Set via CASEFETCH_BACKUP_DIR environment variable.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./data/court_data.db")
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/91.0.4472.124 Safari/537.36"
        .into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_document_bytes() -> usize {
    20 * 1024 * 1024 // 20MB
}

fn default_mock_latency_ms() -> u64 {
    2_000
}

fn default_history_limit() -> usize {
    50
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("./downloads")
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from("./backups")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_document_bytes: default_max_document_bytes(),
            mock_latency_ms: default_mock_latency_ms(),
            history_limit: default_history_limit(),
            download_dir: default_download_dir(),
            backup_dir: default_backup_dir(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Mock source delay as Duration.
    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `CASEFETCH_`
    /// 2. TOML file from `CASEFETCH_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("CASEFETCH_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("CASEFETCH_")
                .ignore(&["config_file"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
