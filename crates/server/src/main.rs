//! casefetch server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use casefetch_client::{DocumentClient, DocumentConfig, MockCourtSource};
use casefetch_core::{AppConfig, CacheGateway, CaseFetcher, CaseSource, Store};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod error;
mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let store = Store::open(&config.db_path).await?;

    let source = MockCourtSource::from_config(&config);
    tracing::info!(
        source = source.name(),
        latency_ms = config.mock_latency_ms,
        db = %config.db_path.display(),
        "case source ready"
    );

    let fetcher = CaseFetcher::new(CacheGateway::new(store), Arc::new(source));
    let documents = DocumentClient::new(DocumentConfig::from(&config))?;
    let handler = handler::CasefetchServer::new(&config, fetcher, documents);

    tracing::info!("Starting casefetch server on stdio transport");

    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
