//! SQLite-backed store for cached case records, query history and court
//! reference data.
//!
//! This module provides a persistent store using SQLite with async access via
//! tokio-rusqlite. It supports:
//!
//! - Automatic schema migrations and one-time reference data seeding
//! - WAL mode for concurrent access
//! - Upsert semantics keyed by the case identity triple
//! - Administrative clearing, export and backup

pub mod admin;
pub mod cases;
pub mod connection;
pub mod migrations;
pub mod queries;
pub mod reference;
pub mod seed;
pub mod stats;

pub use crate::Error;

pub use admin::ExportBundle;
pub use cases::{CaseRecord, Order, Parties};
pub use connection::Store;
pub use queries::{NewQueryLog, QueryLogEntry};
pub use reference::{CaseTypeDefinition, Court};
pub use stats::StoreStats;
