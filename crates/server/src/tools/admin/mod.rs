//! Administrative MCP tools.
//!
//! Statistics, bulk clears, export and backup over the case store.

pub mod backup;
pub mod clear;
pub mod export;
pub mod stats;

pub use backup::{BackupOutput, backup_impl};
pub use clear::{ClearOutput, clear_cache_impl, clear_queries_impl};
pub use export::export_impl;
pub use stats::stats_impl;
