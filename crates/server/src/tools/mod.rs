//! MCP tool implementations.
//!
//! This module contains all tools exposed by the casefetch server. Each
//! tool has a params type, an output type and an `*_impl` function that
//! returns pretty-printed JSON text content.

pub mod admin;
pub mod document;
pub mod fetch_case;
pub mod history;
pub mod reference;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

use crate::error::ToolError;

pub use admin::{backup_impl, clear_cache_impl, clear_queries_impl, export_impl, stats_impl};
pub use document::{DownloadDocumentParams, download_impl};
pub use fetch_case::{FetchCaseParams, fetch_case_impl};
pub use history::{QueryHistoryParams, history_impl};
pub use reference::{ListCaseTypesParams, case_types_impl, courts_impl};

/// Encode a tool output as a successful text result.
pub(crate) fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output).map_err(ToolError::from)?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}
