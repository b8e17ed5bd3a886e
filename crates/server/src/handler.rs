//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.

use std::path::PathBuf;
use std::sync::Arc;

use casefetch_client::DocumentClient;
use casefetch_core::{AppConfig, CaseFetcher, Store};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

use crate::tools::{
    DownloadDocumentParams, FetchCaseParams, ListCaseTypesParams, QueryHistoryParams, backup_impl, case_types_impl,
    clear_cache_impl, clear_queries_impl, courts_impl, download_impl, export_impl, fetch_case_impl, history_impl,
    stats_impl,
};

/// The main MCP server handler for casefetch.
#[derive(Clone)]
pub struct CasefetchServer {
    tool_router: ToolRouter<Self>,
    fetcher: CaseFetcher,
    documents: Arc<DocumentClient>,
    history_limit: usize,
    download_dir: PathBuf,
    backup_dir: PathBuf,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl CasefetchServer {
    /// Create a new server handler.
    pub fn new(config: &AppConfig, fetcher: CaseFetcher, documents: DocumentClient) -> Self {
        Self {
            tool_router: Self::tool_router(),
            fetcher,
            documents: Arc::new(documents),
            history_limit: config.history_limit,
            download_dir: config.download_dir.clone(),
            backup_dir: config.backup_dir.clone(),
        }
    }

    fn store(&self) -> &Store {
        self.fetcher.gateway().store()
    }

    /// Look up a case by type, number and filing year.
    ///
    /// Served from the local cache when the stored record is under 24 hours old.
    #[tool(
        description = "Fetch case details (parties, dates, status, orders) by case type, case number and filing year. Returns {data, fromCache}."
    )]
    async fn fetch_case(&self, params: Parameters<FetchCaseParams>) -> Result<CallToolResult, McpError> {
        fetch_case_impl(&self.fetcher, params.0).await
    }

    #[tool(description = "List recent case lookups, newest first.")]
    async fn query_history(&self, params: Parameters<QueryHistoryParams>) -> Result<CallToolResult, McpError> {
        history_impl(self.store(), self.history_limit, params.0).await
    }

    #[tool(description = "Aggregate statistics: query counts, success rate, cached cases and average response time.")]
    async fn stats(&self) -> Result<CallToolResult, McpError> {
        stats_impl(self.store()).await
    }

    #[tool(description = "List the active courts.")]
    async fn list_courts(&self) -> Result<CallToolResult, McpError> {
        courts_impl(self.store()).await
    }

    #[tool(description = "List the active case types for a court.")]
    async fn list_case_types(&self, params: Parameters<ListCaseTypesParams>) -> Result<CallToolResult, McpError> {
        case_types_impl(self.store(), params.0).await
    }

    #[tool(description = "Delete the entire query history.")]
    async fn clear_queries(&self) -> Result<CallToolResult, McpError> {
        clear_queries_impl(self.store()).await
    }

    #[tool(description = "Delete every cached case record. The next lookup of any case goes to the court source.")]
    async fn clear_cache(&self) -> Result<CallToolResult, McpError> {
        clear_cache_impl(self.store()).await
    }

    #[tool(description = "Export the most recent 1000 queries and all cached cases as JSON.")]
    async fn export_data(&self) -> Result<CallToolResult, McpError> {
        export_impl(self.store()).await
    }

    #[tool(description = "Write a consistent copy of the database into the backup directory.")]
    async fn backup_database(&self) -> Result<CallToolResult, McpError> {
        backup_impl(self.store(), &self.backup_dir).await
    }

    /// Download an order or judgment PDF.
    ///
    /// Only public http(s) hosts are contacted.
    #[tool(
        description = "Download an order or judgment PDF and save it under the download directory with a filename derived from the title."
    )]
    async fn download_document(&self, params: Parameters<DownloadDocumentParams>) -> Result<CallToolResult, McpError> {
        download_impl(&self.documents, &self.download_dir, params.0).await
    }
}

impl ServerHandler for CasefetchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "casefetch".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Indian court case lookup. Use list_courts and list_case_types to discover valid inputs, then fetch_case."
                    .into(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
