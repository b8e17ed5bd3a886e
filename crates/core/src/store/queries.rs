//! Query history operations.
//!
//! Every lookup attempt appends one immutable row. Rows are only removed by
//! the bulk clear.

use super::connection::Store;
use crate::{CaseIdentity, Error};
use serde::{Deserialize, Serialize};
use tokio_rusqlite::{params, rusqlite};

/// A logged lookup attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryLogEntry {
    pub id: i64,
    pub case_type: String,
    pub case_number: String,
    pub filing_year: String,
    pub timestamp: String,
    pub success: bool,
    /// Serialized record, cache-hit marker or error message.
    pub raw_response: Option<String>,
    pub response_time_ms: Option<i64>,
}

/// A lookup attempt about to be logged.
#[derive(Debug, Clone)]
pub struct NewQueryLog {
    pub identity: CaseIdentity,
    pub timestamp: String,
    pub success: bool,
    pub detail: String,
    pub response_time_ms: i64,
}

impl NewQueryLog {
    /// Build a log entry stamped with the current time.
    pub fn new(identity: &CaseIdentity, success: bool, detail: impl Into<String>, response_time_ms: i64) -> Self {
        Self {
            identity: identity.clone(),
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            success,
            detail: detail.into(),
            response_time_ms,
        }
    }
}

pub(crate) const QUERY_COLUMNS: &str =
    "id, case_type, case_number, filing_year, timestamp, success, raw_response, response_time_ms";

pub(crate) fn query_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<QueryLogEntry> {
    Ok(QueryLogEntry {
        id: row.get(0)?,
        case_type: row.get(1)?,
        case_number: row.get(2)?,
        filing_year: row.get(3)?,
        timestamp: row.get(4)?,
        success: row.get(5)?,
        raw_response: row.get(6)?,
        response_time_ms: row.get(7)?,
    })
}

impl Store {
    /// Append a lookup attempt to the query history.
    ///
    /// Returns the row id of the new entry.
    pub async fn append_query_log(&self, entry: &NewQueryLog) -> Result<i64, Error> {
        let entry = entry.clone();
        self.conn
            .call(move |conn| -> Result<i64, Error> {
                conn.execute(
                    "INSERT INTO queries (
                    case_type, case_number, filing_year, timestamp, success, raw_response, response_time_ms
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        &entry.identity.case_type,
                        &entry.identity.case_number,
                        &entry.identity.filing_year,
                        &entry.timestamp,
                        entry.success,
                        &entry.detail,
                        entry.response_time_ms,
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(Error::from)
    }

    /// List the most recent query log entries, newest first.
    ///
    /// Entries sharing a timestamp are ordered by insertion, newest first.
    pub async fn list_recent_query_logs(&self, limit: usize) -> Result<Vec<QueryLogEntry>, Error> {
        let limit = limit as i64;
        self.conn
            .call(move |conn| -> Result<Vec<QueryLogEntry>, Error> {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {QUERY_COLUMNS} FROM queries ORDER BY timestamp DESC, id DESC LIMIT ?1"
                ))?;
                let rows = stmt
                    .query_map(params![limit], query_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete every query log entry.
    ///
    /// Returns the number of deleted entries.
    pub async fn clear_query_logs(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM queries", [])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_at(case_number: &str, success: bool, timestamp: &str) -> NewQueryLog {
        NewQueryLog {
            identity: CaseIdentity::new("Civil Appeal", case_number, "2024"),
            timestamp: timestamp.to_string(),
            success,
            detail: if success { "{}".to_string() } else { "Case not found".to_string() },
            response_time_ms: 100,
        }
    }

    #[tokio::test]
    async fn test_append_and_list_newest_first() {
        let store = Store::open_in_memory().await.unwrap();
        store
            .append_query_log(&entry_at("1", true, "2024-01-01T00:00:00.000Z"))
            .await
            .unwrap();
        store
            .append_query_log(&entry_at("2", false, "2024-01-03T00:00:00.000Z"))
            .await
            .unwrap();
        store
            .append_query_log(&entry_at("3", true, "2024-01-02T00:00:00.000Z"))
            .await
            .unwrap();

        let history = store.list_recent_query_logs(50).await.unwrap();
        let numbers: Vec<&str> = history.iter().map(|e| e.case_number.as_str()).collect();
        assert_eq!(numbers, vec!["2", "3", "1"]);
        assert!(!history[0].success);
        assert_eq!(history[0].raw_response.as_deref(), Some("Case not found"));
    }

    #[tokio::test]
    async fn test_list_respects_limit() {
        let store = Store::open_in_memory().await.unwrap();
        for n in 0..5 {
            let entry = NewQueryLog::new(&CaseIdentity::new("Civil Appeal", n.to_string(), "2024"), true, "ok", 5);
            store.append_query_log(&entry).await.unwrap();
        }

        let history = store.list_recent_query_logs(3).await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].case_number, "4");
    }

    #[tokio::test]
    async fn test_clear_query_logs() {
        let store = Store::open_in_memory().await.unwrap();
        store
            .append_query_log(&entry_at("1", true, "2024-01-01T00:00:00.000Z"))
            .await
            .unwrap();

        assert_eq!(store.clear_query_logs().await.unwrap(), 1);
        assert!(store.list_recent_query_logs(50).await.unwrap().is_empty());
    }
}
