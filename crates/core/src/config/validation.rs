//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `max_document_bytes` is 0 or exceeds 50MB
    /// - `mock_latency_ms` exceeds one minute
    /// - `history_limit` is 0 or exceeds 1000
    /// - `user_agent` or `db_path` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.max_document_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "max_document_bytes".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.max_document_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid {
                field: "max_document_bytes".into(),
                reason: "must not exceed 50MB".into(),
            });
        }

        if self.mock_latency_ms > 60_000 {
            return Err(ConfigError::Invalid {
                field: "mock_latency_ms".into(),
                reason: "must not exceed 1 minute (60000ms)".into(),
            });
        }

        if self.history_limit == 0 || self.history_limit > 1000 {
            return Err(ConfigError::Invalid { field: "history_limit".into(), reason: "must be between 1 and 1000".into() });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid { field: "db_path".into(), reason: "must not be empty".into() });
        }

        if self.mock_latency_ms > self.timeout_ms {
            tracing::warn!(
                mock_latency_ms = self.mock_latency_ms,
                timeout_ms = self.timeout_ms,
                "mock latency exceeds the request timeout"
            );
        }

        Ok(())
    }
}
