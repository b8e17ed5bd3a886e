//! Subcommand implementations.
//!
//! Each command writes its result to `out` so it can be exercised without a
//! terminal.

use std::io::Write;
use std::path::Path;

use anyhow::{Result, anyhow};
use casefetch_core::{CaseFetcher, CaseIdentity, Error, Store};

const DEFAULT_COURT: &str = "Delhi High Court";

fn print_json<W: Write, T: serde::Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Open (and if needed create, migrate and seed) the store, then summarize it.
pub async fn setup<W: Write>(store: &Store, out: &mut W) -> Result<()> {
    writeln!(out, "Database initialized")?;

    let stats = store.stats().await?;
    writeln!(out, "Statistics:")?;
    writeln!(out, "  Total queries:      {}", stats.total_queries)?;
    writeln!(out, "  Successful queries: {}", stats.successful_queries)?;
    writeln!(out, "  Cached cases:       {}", stats.cached_cases)?;
    writeln!(out, "  Success rate:       {}%", stats.success_rate)?;

    let courts = store.list_courts().await?;
    writeln!(out, "Courts: {}", courts.len())?;
    for court in &courts {
        writeln!(out, "  {} ({})", court.name, court.court_type.as_deref().unwrap_or("-"))?;
    }

    if let Some(court) = courts.iter().find(|c| c.name == DEFAULT_COURT) {
        let case_types = store.list_case_types(court.id).await?;
        writeln!(out, "Case types for {}: {}", court.name, case_types.len())?;
        for case_type in &case_types {
            writeln!(out, "  {} ({})", case_type.type_name, case_type.type_code.as_deref().unwrap_or("-"))?;
        }
    }

    Ok(())
}

/// Look a case up and print `{data, fromCache}`.
///
/// Domain failures are reported with their caller-facing message.
pub async fn fetch<W: Write>(fetcher: &CaseFetcher, identity: &CaseIdentity, out: &mut W) -> Result<()> {
    match fetcher.fetch(identity).await {
        Ok(outcome) => print_json(out, &outcome),
        Err(err) => {
            tracing::debug!(error = %err, "lookup failed");
            Err(user_facing(err))
        }
    }
}

fn user_facing(err: Error) -> anyhow::Error {
    anyhow!("{} ({})", err.user_message(), err.kind())
}

pub async fn history<W: Write>(store: &Store, limit: usize, out: &mut W) -> Result<()> {
    print_json(out, &store.list_recent_query_logs(limit).await?)
}

pub async fn stats<W: Write>(store: &Store, out: &mut W) -> Result<()> {
    print_json(out, &store.stats().await?)
}

pub async fn courts<W: Write>(store: &Store, out: &mut W) -> Result<()> {
    print_json(out, &store.list_courts().await?)
}

pub async fn case_types<W: Write>(store: &Store, court_id: i64, out: &mut W) -> Result<()> {
    print_json(out, &store.list_case_types(court_id).await?)
}

pub async fn clear_queries<W: Write>(store: &Store, out: &mut W) -> Result<()> {
    let cleared = store.clear_query_logs().await?;
    writeln!(out, "Cleared {cleared} query records")?;
    Ok(())
}

pub async fn clear_cache<W: Write>(store: &Store, out: &mut W) -> Result<()> {
    let cleared = store.clear_cases().await?;
    writeln!(out, "Cleared {cleared} cached cases")?;
    Ok(())
}

pub async fn export<W: Write>(store: &Store, out: &mut W) -> Result<()> {
    print_json(out, &store.export_all().await?)
}

/// Write `backup-{millis}.db` into `backup_dir` and print its path.
pub async fn backup<W: Write>(store: &Store, backup_dir: &Path, out: &mut W) -> Result<()> {
    let target = backup_dir.join(format!("backup-{}.db", chrono::Utc::now().timestamp_millis()));
    let written = store.backup_to(&target).await?;
    writeln!(out, "Backup created: {}", written.display())?;
    Ok(())
}
