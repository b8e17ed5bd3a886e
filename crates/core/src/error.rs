//! Unified error types for casefetch.
//!
//! Every variant carries a stable code prefix in its display form. The
//! conversion into MCP errors replaces internal detail with a caller-facing
//! message so store faults never leak table or driver information.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the casefetch workspace.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., a missing case number).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// The case source could not locate the requested case.
    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    /// The case source could not reach the upstream court system.
    #[error("SOURCE_UNAVAILABLE: {0}")]
    SourceUnavailable(String),

    /// Any other failure reported by the case source.
    #[error("UPSTREAM_ERROR: {0}")]
    Upstream(String),

    /// Database operation failed.
    #[error("STORE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Filesystem work around the database (backup directory) failed.
    #[error("STORE_ERROR: storage failed: {0}")]
    Storage(String),

    /// A stored column could not be encoded or decoded.
    #[error("STORE_ERROR: serialization failed: {0}")]
    Serialization(String),

    /// Invalid document URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// SSRF blocked - private/internal address not allowed.
    #[error("SSRF_BLOCKED: {0}")]
    SsrfBlocked(String),

    /// Document retrieval failed (network fault or non-success status).
    #[error("DOCUMENT_FETCH_FAILED: {0}")]
    DocumentFetch(String),

    /// Document body exceeds the configured limit.
    #[error("DOCUMENT_TOO_LARGE: {0}")]
    DocumentTooLarge(String),
}

impl Error {
    /// Stable, caller-facing error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) | Error::InvalidUrl(_) | Error::SsrfBlocked(_) => "VALIDATION_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
            Error::SourceUnavailable(_) => "SOURCE_UNAVAILABLE",
            Error::Upstream(_) => "UNKNOWN",
            Error::Database(_) | Error::MigrationFailed(_) | Error::Storage(_) | Error::Serialization(_) => {
                "STORE_ERROR"
            }
            Error::DocumentFetch(_) | Error::DocumentTooLarge(_) => "RETRIEVAL_ERROR",
        }
    }

    /// Human-readable message safe to show to a caller.
    pub fn user_message(&self) -> String {
        match self {
            Error::InvalidInput(msg) | Error::InvalidUrl(msg) | Error::SsrfBlocked(msg) => msg.clone(),
            Error::NotFound(_) => "Case not found. Please verify the case number and try again.".to_string(),
            Error::SourceUnavailable(_) => {
                "Court website is currently unavailable. Please try again later.".to_string()
            }
            Error::Upstream(_) => "Failed to fetch case data. Please try again.".to_string(),
            Error::Database(_) | Error::MigrationFailed(_) | Error::Storage(_) | Error::Serialization(_) => {
                "Database operation failed".to_string()
            }
            Error::DocumentFetch(msg) | Error::DocumentTooLarge(msg) => format!("Failed to download PDF: {msg}"),
        }
    }

    /// Whether this error originates in the persistence layer.
    pub fn is_store_error(&self) -> bool {
        self.kind() == "STORE_ERROR"
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidInput(_) | Error::InvalidUrl(_) | Error::SsrfBlocked(_) => -32602,
            Error::Upstream(_) => -32000,
            Error::Database(_) | Error::MigrationFailed(_) | Error::Storage(_) | Error::Serialization(_) => -32002,
            Error::SourceUnavailable(_) => -32003,
            Error::NotFound(_) => -32004,
            Error::DocumentFetch(_) | Error::DocumentTooLarge(_) => -32005,
        };

        if err.is_store_error() {
            tracing::error!(error = %err, "store failure surfaced to caller");
        }

        McpError {
            code: ErrorCode(code),
            message: err.user_message().into(),
            data: Some(serde_json::json!({ "kind": err.kind() })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NotFound("Case not found".to_string());
        assert!(err.to_string().contains("NOT_FOUND"));
        assert!(err.to_string().contains("Case not found"));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::SourceUnavailable("Court website unavailable".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32003);
        assert_eq!(mcp_err.data.unwrap()["kind"], "SOURCE_UNAVAILABLE");
    }

    #[test]
    fn test_store_error_hides_detail() {
        let err = Error::MigrationFailed("no such table: _migrations".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32002);
        assert_eq!(mcp_err.message, "Database operation failed");
    }

    #[test]
    fn test_kinds_are_distinct() {
        assert_eq!(Error::InvalidInput(String::new()).kind(), "VALIDATION_ERROR");
        assert_eq!(Error::NotFound(String::new()).kind(), "NOT_FOUND");
        assert_eq!(Error::SourceUnavailable(String::new()).kind(), "SOURCE_UNAVAILABLE");
        assert_eq!(Error::Upstream(String::new()).kind(), "UNKNOWN");
        assert_eq!(Error::DocumentFetch(String::new()).kind(), "RETRIEVAL_ERROR");
    }
}
