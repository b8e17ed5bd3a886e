//! Core types and shared functionality for casefetch.
//!
//! This crate provides:
//! - Case store implementation with SQLite backend
//! - Cache gateway and fetch orchestration over a pluggable case source
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod fetcher;
pub mod gateway;
pub mod identity;
pub mod source;
pub mod store;

pub use config::AppConfig;
pub use error::Error;
pub use fetcher::{CaseFetcher, Clock, FRESHNESS_WINDOW, FetchOutcome, SystemClock};
pub use gateway::CacheGateway;
pub use identity::CaseIdentity;
pub use source::CaseSource;
pub use store::{CaseRecord, Order, Parties, QueryLogEntry, Store, StoreStats};
