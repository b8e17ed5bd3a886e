//! export_data tool implementation.

use casefetch_core::Store;
use rmcp::{ErrorData as McpError, model::CallToolResult};

use crate::tools::json_result;

/// Export the query history and every cached case as one JSON document.
pub async fn export_impl(store: &Store) -> Result<CallToolResult, McpError> {
    let bundle = store.export_all().await?;
    tracing::info!(queries = bundle.queries.len(), cases = bundle.cases.len(), "data exported");
    json_result(&bundle)
}
