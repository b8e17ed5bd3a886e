//! backup_database tool implementation.

use std::path::Path;

use casefetch_core::Store;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::json_result;

/// Output from the backup_database tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackupOutput {
    pub message: String,
    /// Path of the written backup file.
    pub backup_path: String,
}

/// Write `backup-{millis}.db` into `backup_dir`.
pub async fn backup_impl(store: &Store, backup_dir: &Path) -> Result<CallToolResult, McpError> {
    let target = backup_dir.join(format!("backup-{}.db", chrono::Utc::now().timestamp_millis()));
    let written = store.backup_to(&target).await?;

    json_result(&BackupOutput {
        message: "Backup created successfully".to_string(),
        backup_path: written.display().to_string(),
    })
}
