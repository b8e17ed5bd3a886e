//! casefetch command line.
//!
//! Runs the same lookups and maintenance operations as the MCP server
//! against the local case store. Results go to stdout, logs to stderr.

mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use casefetch_client::MockCourtSource;
use casefetch_core::{AppConfig, CacheGateway, CaseFetcher, CaseIdentity, Store};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "casefetch")]
#[command(about = "Indian court case lookup with a local cache")]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Database path (overrides configuration)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize the database and print a summary
    Setup,

    /// Look up a case by type, number and filing year
    Fetch {
        /// Case type, e.g. "Writ Petition"
        #[arg(long = "type")]
        case_type: String,

        /// Case number
        #[arg(long = "number")]
        case_number: String,

        /// Filing year
        #[arg(long = "year")]
        filing_year: String,
    },

    /// Show recent lookups, newest first
    History {
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show aggregate statistics
    Stats,

    /// List active courts
    Courts,

    /// List active case types for a court
    CaseTypes {
        #[arg(long)]
        court_id: i64,
    },

    /// Delete the query history
    ClearQueries,

    /// Delete every cached case
    ClearCache,

    /// Export queries and cases as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a copy of the database into the backup directory
    Backup,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let mut config = AppConfig::load()?;
    if let Some(db) = args.db {
        config.db_path = db;
    }

    let store = Store::open(&config.db_path).await?;
    let mut out = std::io::stdout().lock();

    match args.command {
        Command::Setup => commands::setup(&store, &mut out).await?,
        Command::Fetch { case_type, case_number, filing_year } => {
            let fetcher = CaseFetcher::new(CacheGateway::new(store), Arc::new(MockCourtSource::from_config(&config)));
            let identity = CaseIdentity::new(case_type, case_number, filing_year);
            commands::fetch(&fetcher, &identity, &mut out).await?
        }
        Command::History { limit } => {
            commands::history(&store, limit.unwrap_or(config.history_limit), &mut out).await?
        }
        Command::Stats => commands::stats(&store, &mut out).await?,
        Command::Courts => commands::courts(&store, &mut out).await?,
        Command::CaseTypes { court_id } => commands::case_types(&store, court_id, &mut out).await?,
        Command::ClearQueries => commands::clear_queries(&store, &mut out).await?,
        Command::ClearCache => commands::clear_cache(&store, &mut out).await?,
        Command::Export { output } => match output {
            Some(path) => {
                let mut file = std::fs::File::create(&path)?;
                commands::export(&store, &mut file).await?;
                tracing::info!(path = %path.display(), "export written");
            }
            None => commands::export(&store, &mut out).await?,
        },
        Command::Backup => commands::backup(&store, &config.backup_dir, &mut out).await?,
    }

    Ok(())
}
