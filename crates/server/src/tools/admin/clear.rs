//! clear_queries and clear_cache tool implementations.

use casefetch_core::Store;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::json_result;

/// Output from the clear tools.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClearOutput {
    /// Human-readable summary.
    pub message: String,
    /// Number of rows deleted.
    pub cleared: u64,
}

/// Delete every query log entry.
pub async fn clear_queries_impl(store: &Store) -> Result<CallToolResult, McpError> {
    let cleared = store.clear_query_logs().await?;
    tracing::info!(cleared, "query history cleared");
    json_result(&ClearOutput { message: format!("Cleared {cleared} query records"), cleared })
}

/// Delete every cached case record.
pub async fn clear_cache_impl(store: &Store) -> Result<CallToolResult, McpError> {
    let cleared = store.clear_cases().await?;
    tracing::info!(cleared, "case cache cleared");
    json_result(&ClearOutput { message: format!("Cleared {cleared} cached cases"), cleared })
}
