//! Administrative export and backup.

use std::path::{Path, PathBuf};

use super::cases::{CASE_COLUMNS, CaseRecord, case_from_row};
use super::connection::Store;
use super::queries::{QUERY_COLUMNS, QueryLogEntry, query_from_row};
use crate::Error;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;

/// Maximum number of query log entries included in an export.
pub const EXPORT_QUERY_LIMIT: i64 = 1000;

/// Snapshot of the query history and case cache.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    /// Newest first, capped at [`EXPORT_QUERY_LIMIT`].
    pub queries: Vec<QueryLogEntry>,
    /// Newest first by creation time.
    pub cases: Vec<CaseRecord>,
    pub exported_at: String,
}

impl Store {
    /// Export the query history and every cached case.
    ///
    /// Both reads run in one transaction so the bundle is consistent.
    pub async fn export_all(&self) -> Result<ExportBundle, Error> {
        self.conn
            .call(|conn| -> Result<ExportBundle, Error> {
                let tx = conn.transaction()?;
                let queries = {
                    let mut stmt = tx.prepare(&format!(
                        "SELECT {QUERY_COLUMNS} FROM queries ORDER BY timestamp DESC, id DESC LIMIT ?1"
                    ))?;
                    stmt.query_map(params![EXPORT_QUERY_LIMIT], query_from_row)?
                        .collect::<Result<Vec<_>, _>>()?
                };
                let cases = {
                    let mut stmt = tx.prepare(&format!("SELECT {CASE_COLUMNS} FROM cases ORDER BY created_at DESC"))?;
                    stmt.query_map([], case_from_row)?
                        .collect::<Result<Vec<_>, _>>()?
                };
                tx.commit()?;

                Ok(ExportBundle { queries, cases, exported_at: chrono::Utc::now().to_rfc3339() })
            })
            .await
            .map_err(Error::from)
    }

    /// Write a consistent copy of the database to `target`.
    ///
    /// Fails with `InvalidInput` if the target file already exists.
    pub async fn backup_to(&self, target: impl AsRef<Path>) -> Result<PathBuf, Error> {
        let target = target.as_ref().to_path_buf();
        if target.exists() {
            return Err(Error::InvalidInput(format!("backup target {} already exists", target.display())));
        }
        if let Some(parent) = target.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("cannot create backup directory: {}", e.kind())))?;
        }

        let path_str = target.to_string_lossy().into_owned();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute("VACUUM INTO ?1", params![path_str])?;
                Ok(())
            })
            .await
            .map_err(Error::from)?;

        tracing::info!(path = %target.display(), "database backup written");
        Ok(target)
    }
}
