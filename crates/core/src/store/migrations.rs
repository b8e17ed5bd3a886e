//! Versioned schema for the case store.
//!
//! `_migrations` records the highest applied version. Pending scripts run in
//! ascending order, each inside its own transaction together with its
//! version row, so a failed script leaves the store at the previous version.

use super::Error;
use tokio_rusqlite::{Connection, params, rusqlite};

/// Schema scripts keyed by version, ascending.
const MIGRATIONS: &[(i64, &str)] = &[
    (1, include_str!("../../migrations/001_reference.sql")),
    (2, include_str!("../../migrations/002_cases.sql")),
    (3, include_str!("../../migrations/003_queries.sql")),
];

fn current_version(conn: &rusqlite::Connection) -> Result<i64, Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        )",
    )?;
    let version = conn.query_row("SELECT COALESCE(MAX(version), 0) FROM _migrations", [], |row| row.get(0))?;
    Ok(version)
}

fn apply(conn: &mut rusqlite::Connection, version: i64, sql: &str) -> Result<(), Error> {
    let tx = conn.transaction()?;
    tx.execute_batch(sql)
        .map_err(|e| Error::MigrationFailed(format!("version {version}: {e}")))?;
    tx.execute(
        "INSERT INTO _migrations (version, applied_at) VALUES (?1, ?2)",
        params![version, chrono::Utc::now().to_rfc3339()],
    )?;
    tx.commit()?;
    Ok(())
}

/// Bring the schema up to the latest version.
pub async fn run(conn: &Connection) -> Result<(), Error> {
    conn.call(|conn| -> Result<(), Error> {
        let current = current_version(conn)?;
        for &(version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
            apply(conn, version, sql)?;
            tracing::debug!(version, "applied migration");
        }
        Ok(())
    })
    .await
    .map_err(Error::from)
}
