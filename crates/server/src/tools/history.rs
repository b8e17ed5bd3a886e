//! query_history tool implementation.

use casefetch_core::{QueryLogEntry, Store};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Parameters for the query_history tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct QueryHistoryParams {
    /// Maximum number of entries to return (default from configuration).
    pub limit: Option<usize>,
}

/// Output from the query_history tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QueryHistoryOutput {
    /// Newest first.
    pub queries: Vec<QueryLogEntry>,
}

/// Implementation of the query_history tool.
pub async fn history_impl(
    store: &Store, default_limit: usize, params: QueryHistoryParams,
) -> Result<CallToolResult, McpError> {
    let limit = params.limit.unwrap_or(default_limit);
    let queries = store.list_recent_query_logs(limit).await?;
    json_result(&QueryHistoryOutput { queries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::parse_output;
    use casefetch_core::CaseIdentity;
    use casefetch_core::store::NewQueryLog;

    async fn store_with_logs(n: usize) -> Store {
        let store = Store::open_in_memory().await.unwrap();
        for i in 0..n {
            let identity = CaseIdentity::new("Writ Petition", i.to_string(), "2024");
            store
                .append_query_log(&NewQueryLog::new(&identity, true, "ok", 100))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_history_uses_default_limit() {
        let store = store_with_logs(5).await;
        let result = history_impl(&store, 3, QueryHistoryParams::default()).await.unwrap();
        let output: QueryHistoryOutput = parse_output(&result);
        assert_eq!(output.queries.len(), 3);
    }

    #[tokio::test]
    async fn test_history_newest_first() {
        let store = store_with_logs(3).await;
        let result = history_impl(&store, 50, QueryHistoryParams { limit: Some(10) }).await.unwrap();
        let output: QueryHistoryOutput = parse_output(&result);
        assert_eq!(output.queries.len(), 3);
        assert_eq!(output.queries[0].case_number, "2");
    }

    #[tokio::test]
    async fn test_history_empty() {
        let store = Store::open_in_memory().await.unwrap();
        let result = history_impl(&store, 50, QueryHistoryParams::default()).await.unwrap();
        let output: QueryHistoryOutput = parse_output(&result);
        assert!(output.queries.is_empty());
    }
}
