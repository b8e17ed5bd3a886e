//! stats tool implementation.

use casefetch_core::Store;
use rmcp::{ErrorData as McpError, model::CallToolResult};

use crate::tools::json_result;

/// Implementation of the stats tool.
pub async fn stats_impl(store: &Store) -> Result<CallToolResult, McpError> {
    let stats = store.stats().await?;
    json_result(&stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::parse_output;
    use casefetch_core::store::NewQueryLog;
    use casefetch_core::{CaseIdentity, StoreStats};

    #[tokio::test]
    async fn test_stats_empty_store() {
        let store = Store::open_in_memory().await.unwrap();
        let result = stats_impl(&store).await.unwrap();
        let stats: StoreStats = parse_output(&result);
        assert_eq!(stats.total_queries, 0);
        assert_eq!(stats.success_rate, 0.0);
        assert_eq!(stats.avg_response_time_ms, 0);
    }

    #[tokio::test]
    async fn test_stats_counts_add_up() {
        let store = Store::open_in_memory().await.unwrap();
        let identity = CaseIdentity::new("Writ Petition", "1234", "2024");
        for success in [true, true, false] {
            store
                .append_query_log(&NewQueryLog::new(&identity, success, "detail", 300))
                .await
                .unwrap();
        }

        let result = stats_impl(&store).await.unwrap();
        let value: serde_json::Value = parse_output(&result);
        assert_eq!(value["totalQueries"], 3);
        assert_eq!(value["successfulQueries"], 2);
        assert_eq!(value["failedQueries"], 1);
        assert_eq!(value["successRate"], 66.7);
        assert_eq!(value["avgResponseTimeMs"], 300);
    }
}
