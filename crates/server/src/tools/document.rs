//! download_document tool implementation.
//!
//! Retrieves an order or judgment PDF and saves it under the download
//! directory with a filename derived from its title.

use std::path::Path;

use casefetch_client::DocumentClient;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;
use crate::error::ToolError;

/// Input parameters for the download_document tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DownloadDocumentParams {
    /// Document URL, typically an order's `pdfUrl`.
    pub url: String,

    /// Display title used to name the saved file.
    #[serde(default)]
    pub title: String,
}

/// Output from the download_document tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadDocumentOutput {
    /// Where the document was written.
    pub path: String,
    pub filename: String,
    pub content_type: String,
    /// Size in bytes.
    pub size: usize,
    pub fetch_ms: u64,
}

/// Implementation of the download_document tool.
pub async fn download_impl(
    client: &DocumentClient, download_dir: &Path, params: DownloadDocumentParams,
) -> Result<CallToolResult, McpError> {
    let document = client.download(&params.url, &params.title).await?;

    tokio::fs::create_dir_all(download_dir).await.map_err(ToolError::from)?;
    let path = download_dir.join(&document.filename);
    tokio::fs::write(&path, &document.bytes).await.map_err(ToolError::from)?;

    tracing::info!(path = %path.display(), bytes = document.bytes.len(), "document saved");

    json_result(&DownloadDocumentOutput {
        path: path.display().to_string(),
        filename: document.filename,
        content_type: document.content_type,
        size: document.bytes.len(),
        fetch_ms: document.fetch_ms,
    })
}
