//! Aggregate statistics over the query history and case cache.

use super::connection::Store;
use crate::Error;
use serde::{Deserialize, Serialize};

/// Store-wide statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total_queries: u64,
    pub successful_queries: u64,
    pub failed_queries: u64,
    pub cached_cases: u64,
    /// Percentage of successful queries, rounded to one decimal.
    pub success_rate: f64,
    /// Mean latency over queries with a recorded latency, rounded to whole ms.
    pub avg_response_time_ms: u64,
}

impl StoreStats {
    fn from_counts(total: u64, successful: u64, cached: u64, avg_latency: Option<f64>) -> Self {
        let success_rate = if total > 0 {
            (successful as f64 / total as f64 * 1000.0).round() / 10.0
        } else {
            0.0
        };

        Self {
            total_queries: total,
            successful_queries: successful,
            failed_queries: total - successful,
            cached_cases: cached,
            success_rate,
            avg_response_time_ms: avg_latency.map(|avg| avg.round() as u64).unwrap_or(0),
        }
    }
}

impl Store {
    /// Compute query and cache statistics in one read.
    pub async fn stats(&self) -> Result<StoreStats, Error> {
        self.conn
            .call(|conn| -> Result<StoreStats, Error> {
                let (total, successful, cached, avg): (i64, i64, i64, Option<f64>) = conn.query_row(
                    "SELECT
                        (SELECT COUNT(*) FROM queries),
                        (SELECT COUNT(*) FROM queries WHERE success = 1),
                        (SELECT COUNT(*) FROM cases),
                        (SELECT AVG(response_time_ms) FROM queries WHERE response_time_ms > 0)",
                    [],
                    |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
                )?;

                Ok(StoreStats::from_counts(total as u64, successful as u64, cached as u64, avg))
            })
            .await
            .map_err(Error::from)
    }
}
