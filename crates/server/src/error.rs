//! Structured errors raised by the server itself.
//!
//! Domain failures arrive as [`casefetch_core::Error`] and convert on their
//! own; these cover the filesystem and encoding work done around them.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Errors produced while assembling a tool response.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Writing a downloaded document or backup location failed.
    #[error("IO_ERROR: {0}")]
    Io(String),

    /// The tool output could not be encoded.
    #[error("SERIALIZATION_FAILED: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for ToolError {
    fn from(err: std::io::Error) -> Self {
        ToolError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::Serialization(err.to_string())
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        tracing::error!(error = %err, "tool failed");

        let (code, message) = match &err {
            ToolError::Io(_) => (-32006, "Failed to write file"),
            ToolError::Serialization(_) => (-32000, "Failed to encode tool output"),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
