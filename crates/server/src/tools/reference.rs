//! Court reference tools: list_courts and list_case_types.

use casefetch_core::Store;
use casefetch_core::store::{CaseTypeDefinition, Court};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Output from the list_courts tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CourtsOutput {
    pub courts: Vec<Court>,
}

/// Parameters for the list_case_types tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListCaseTypesParams {
    /// Court id as returned by list_courts.
    pub court_id: i64,
}

/// Output from the list_case_types tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseTypesOutput {
    pub case_types: Vec<CaseTypeDefinition>,
}

/// Implementation of the list_courts tool.
pub async fn courts_impl(store: &Store) -> Result<CallToolResult, McpError> {
    let courts = store.list_courts().await?;
    json_result(&CourtsOutput { courts })
}

/// Implementation of the list_case_types tool.
pub async fn case_types_impl(store: &Store, params: ListCaseTypesParams) -> Result<CallToolResult, McpError> {
    let case_types = store.list_case_types(params.court_id).await?;
    json_result(&CaseTypesOutput { case_types })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::parse_output;

    #[tokio::test]
    async fn test_courts_seeded() {
        let store = Store::open_in_memory().await.unwrap();
        let result = courts_impl(&store).await.unwrap();
        let output: CourtsOutput = parse_output(&result);
        assert_eq!(output.courts.len(), 5);
        assert!(output.courts.iter().any(|c| c.name == "Delhi High Court"));
    }

    #[tokio::test]
    async fn test_case_types_for_delhi() {
        let store = Store::open_in_memory().await.unwrap();
        let courts = store.list_courts().await.unwrap();
        let delhi = courts.iter().find(|c| c.name == "Delhi High Court").unwrap();

        let result = case_types_impl(&store, ListCaseTypesParams { court_id: delhi.id }).await.unwrap();
        let output: CaseTypesOutput = parse_output(&result);
        assert_eq!(output.case_types.len(), 10);
        assert!(output.case_types.iter().all(|t| t.court_id == delhi.id));
    }

    #[tokio::test]
    async fn test_case_types_unknown_court() {
        let store = Store::open_in_memory().await.unwrap();
        let result = case_types_impl(&store, ListCaseTypesParams { court_id: 999 }).await.unwrap();
        let output: CaseTypesOutput = parse_output(&result);
        assert!(output.case_types.is_empty());
    }
}
