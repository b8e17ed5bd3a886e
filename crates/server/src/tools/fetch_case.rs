//! fetch_case tool implementation.
//!
//! Looks a case up through the cache, falling back to the court source.

use casefetch_core::{CaseFetcher, CaseIdentity};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Input parameters for the fetch_case tool.
///
/// Missing fields deserialize as empty so the caller gets the validation
/// message instead of a decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FetchCaseParams {
    /// Case type, e.g. "Writ Petition".
    #[serde(default)]
    pub case_type: String,

    /// Case number as filed, e.g. "1234".
    #[serde(default)]
    pub case_number: String,

    /// Filing year, e.g. "2024".
    #[serde(default)]
    pub filing_year: String,
}

impl From<FetchCaseParams> for CaseIdentity {
    fn from(params: FetchCaseParams) -> Self {
        CaseIdentity::new(params.case_type, params.case_number, params.filing_year)
    }
}

/// Implementation of the fetch_case tool.
pub async fn fetch_case_impl(fetcher: &CaseFetcher, params: FetchCaseParams) -> Result<CallToolResult, McpError> {
    let identity = CaseIdentity::from(params);
    let outcome = fetcher.fetch(&identity).await?;
    tracing::info!(case = %identity, from_cache = outcome.from_cache, "case fetched");
    json_result(&outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::parse_output;
    use casefetch_client::MockCourtSource;
    use casefetch_core::{CacheGateway, FetchOutcome, Store};
    use rmcp::model::ErrorCode;
    use std::sync::Arc;
    use std::time::Duration;

    async fn make_fetcher() -> CaseFetcher {
        let store = Store::open_in_memory().await.unwrap();
        CaseFetcher::new(CacheGateway::new(store), Arc::new(MockCourtSource::new(Duration::ZERO)))
    }

    fn params(case_type: &str, case_number: &str, filing_year: &str) -> FetchCaseParams {
        FetchCaseParams {
            case_type: case_type.to_string(),
            case_number: case_number.to_string(),
            filing_year: filing_year.to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch_then_cache_hit() {
        let fetcher = make_fetcher().await;

        let first = fetch_case_impl(&fetcher, params("Writ Petition", "1234", "2024")).await.unwrap();
        let first: FetchOutcome = parse_output(&first);
        assert!(!first.from_cache);
        assert_eq!(first.data.id, "Writ Petition-1234-2024");

        let second = fetch_case_impl(&fetcher, params("Writ Petition", "1234", "2024")).await.unwrap();
        let second: FetchOutcome = parse_output(&second);
        assert!(second.from_cache);
        assert_eq!(second.data, first.data);
    }

    #[tokio::test]
    async fn test_output_uses_camel_case() {
        let fetcher = make_fetcher().await;
        let result = fetch_case_impl(&fetcher, params("Civil Appeal", "7", "2023")).await.unwrap();
        let value: serde_json::Value = parse_output(&result);
        assert_eq!(value["fromCache"], false);
        assert!(value["data"]["nextHearingDate"].is_string());
        assert!(value["data"]["orders"][0]["pdfUrl"].is_string());
    }

    #[tokio::test]
    async fn test_not_found_maps_to_error_code() {
        let fetcher = make_fetcher().await;
        let err = fetch_case_impl(&fetcher, params("Writ Petition", "9999", "2024")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode(-32004));
        assert_eq!(err.message, "Case not found. Please verify the case number and try again.");
    }

    #[tokio::test]
    async fn test_unavailable_maps_to_error_code() {
        let fetcher = make_fetcher().await;
        let err = fetch_case_impl(&fetcher, params("Writ Petition", "0000", "2024")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode(-32003));
    }

    #[tokio::test]
    async fn test_missing_field_is_invalid_params() {
        let fetcher = make_fetcher().await;
        let params: FetchCaseParams = serde_json::from_str(r#"{"caseType":"Writ Petition"}"#).unwrap();
        let err = fetch_case_impl(&fetcher, params).await.unwrap_err();
        assert_eq!(err.code, ErrorCode(-32602));

        let history = fetcher.gateway().store().list_recent_query_logs(10).await.unwrap();
        assert!(history.is_empty());
    }
}
