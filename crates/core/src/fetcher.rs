//! Cache-or-fetch orchestration.
//!
//! ### Lookup pass
//! - Validate the identity; blank fields fail before any store access.
//! - Serve the cached record when it is younger than [`FRESHNESS_WINDOW`].
//! - Otherwise call the case source, save the result and return it.
//!
//! Every pass past validation appends exactly one query log entry. Failed
//! fetches are never cached and never fall back to a stale record.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CacheGateway, CaseIdentity, CaseRecord, CaseSource, Error};

/// Age below which a cached record is served without refetching.
pub const FRESHNESS_WINDOW: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);

/// Detail logged for cache hits.
pub const CACHE_HIT_DETAIL: &str = "Returned from cache";

/// Time source for freshness decisions.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock using system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Result of a lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FetchOutcome {
    pub data: CaseRecord,
    pub from_cache: bool,
}

/// Fetch orchestrator over a cache gateway and a case source.
#[derive(Clone)]
pub struct CaseFetcher {
    gateway: CacheGateway,
    source: Arc<dyn CaseSource>,
    clock: Arc<dyn Clock>,
}

impl CaseFetcher {
    pub fn new(gateway: CacheGateway, source: Arc<dyn CaseSource>) -> Self {
        Self { gateway, source, clock: Arc::new(SystemClock) }
    }

    /// Replace the time source used for freshness decisions.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn gateway(&self) -> &CacheGateway {
        &self.gateway
    }

    /// Look up a case, serving a fresh cached record when one exists.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidInput` for blank identity fields (nothing is logged)
    /// - `Error::NotFound` / `Error::SourceUnavailable` from the case source
    /// - store errors from the lookup or save
    pub async fn fetch(&self, identity: &CaseIdentity) -> Result<FetchOutcome, Error> {
        identity.validate()?;
        let start = Instant::now();

        let cached = self.gateway.lookup(identity).await.inspect_err(|e| {
            tracing::error!(case = %identity, error = %e, "cache lookup failed");
        })?;

        if let Some(record) = cached {
            if self.is_fresh(&record) {
                let latency = elapsed_ms(start);
                self.gateway.log_attempt(identity, true, CACHE_HIT_DETAIL, latency).await;
                tracing::debug!(case = %identity, latency_ms = latency, "cache hit");
                return Ok(FetchOutcome { data: record, from_cache: true });
            }
            tracing::debug!(case = %identity, last_updated = %record.last_updated, "cached record is stale");
        }

        match self.fetch_and_save(identity).await {
            Ok(record) => {
                let latency = elapsed_ms(start);
                let detail = serde_json::to_string(&record)?;
                self.gateway.log_attempt(identity, true, &detail, latency).await;
                tracing::info!(case = %identity, source = self.source.name(), latency_ms = latency, "fetched case");
                Ok(FetchOutcome { data: record, from_cache: false })
            }
            Err(e) => {
                let latency = elapsed_ms(start);
                self.gateway.log_attempt(identity, false, &e.to_string(), latency).await;
                tracing::warn!(case = %identity, error = %e, latency_ms = latency, "case fetch failed");
                Err(e)
            }
        }
    }

    async fn fetch_and_save(&self, identity: &CaseIdentity) -> Result<CaseRecord, Error> {
        let record = self.source.fetch(identity).await?;
        self.gateway.save(&record).await?;
        Ok(record)
    }

    /// Unparseable timestamps count as stale.
    fn is_fresh(&self, record: &CaseRecord) -> bool {
        match DateTime::parse_from_rfc3339(&record.last_updated) {
            Ok(updated) => {
                let age = self.clock.now().signed_duration_since(updated.with_timezone(&Utc));
                age.num_milliseconds() < FRESHNESS_WINDOW.as_millis() as i64
            }
            Err(_) => false,
        }
    }
}

fn elapsed_ms(start: Instant) -> i64 {
    start.elapsed().as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Store;
    use crate::store::Parties;
    use chrono::Duration;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and fails on the sentinel numbers the mock source uses.
    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    impl CountingSource {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl CaseSource for CountingSource {
        async fn fetch(&self, identity: &CaseIdentity) -> Result<CaseRecord, Error> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            match identity.case_number.as_str() {
                "9999" => return Err(Error::NotFound("Case not found".into())),
                "0000" => return Err(Error::SourceUnavailable("Court website unavailable".into())),
                _ => {}
            }
            Ok(CaseRecord {
                id: identity.id(),
                case_number: identity.case_number.clone(),
                case_type: identity.case_type.clone(),
                filing_year: identity.filing_year.clone(),
                parties: Parties { petitioner: format!("P{call}"), respondent: "R".into() },
                filing_date: "2024-01-10T00:00:00Z".into(),
                next_hearing_date: "2024-02-10T00:00:00Z".into(),
                status: "Active".into(),
                orders: Vec::new(),
                last_updated: Utc::now().to_rfc3339(),
            })
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn new() -> Self {
            Self(Mutex::new(Utc::now()))
        }

        fn advance(&self, by: Duration) {
            let mut now = self.0.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    async fn setup() -> (CaseFetcher, Arc<CountingSource>, Arc<ManualClock>) {
        let store = Store::open_in_memory().await.unwrap();
        let source = Arc::new(CountingSource::default());
        let clock = Arc::new(ManualClock::new());
        let fetcher = CaseFetcher::new(CacheGateway::new(store), source.clone()).with_clock(clock.clone());
        (fetcher, source, clock)
    }

    #[tokio::test]
    async fn test_first_fetch_misses_then_hits() {
        let (fetcher, source, _clock) = setup().await;
        let identity = CaseIdentity::new("Writ Petition", "1234", "2024");

        let first = fetcher.fetch(&identity).await.unwrap();
        assert!(!first.from_cache);
        assert_eq!(first.data.id, "Writ Petition-1234-2024");
        assert_eq!(source.calls(), 1);

        let second = fetcher.fetch(&identity).await.unwrap();
        assert!(second.from_cache);
        assert_eq!(second.data, first.data);
        assert_eq!(source.calls(), 1);

        let store = fetcher.gateway().store();
        let history = store.list_recent_query_logs(10).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|e| e.success));
        assert_eq!(history[0].raw_response.as_deref(), Some(CACHE_HIT_DETAIL));
        let logged: CaseRecord = serde_json::from_str(history[1].raw_response.as_deref().unwrap()).unwrap();
        assert_eq!(logged, first.data);
    }

    #[tokio::test]
    async fn test_stale_record_is_refetched_and_overwritten() {
        let (fetcher, source, clock) = setup().await;
        let identity = CaseIdentity::new("Civil Appeal", "55", "2023");

        let first = fetcher.fetch(&identity).await.unwrap();
        clock.advance(Duration::hours(25));

        let second = fetcher.fetch(&identity).await.unwrap();
        assert!(!second.from_cache);
        assert_eq!(source.calls(), 2);
        assert_ne!(second.data.parties.petitioner, first.data.parties.petitioner);

        let stored = fetcher.gateway().lookup(&identity).await.unwrap().unwrap();
        assert_eq!(stored, second.data);
    }

    #[tokio::test]
    async fn test_just_inside_window_is_fresh() {
        let (fetcher, source, clock) = setup().await;
        let identity = CaseIdentity::new("Civil Appeal", "56", "2023");

        fetcher.fetch(&identity).await.unwrap();
        clock.advance(Duration::hours(23));

        assert!(fetcher.fetch(&identity).await.unwrap().from_cache);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_not_found_logs_one_failure() {
        let (fetcher, _source, _clock) = setup().await;
        let identity = CaseIdentity::new("Criminal Appeal", "9999", "2024");

        let err = fetcher.fetch(&identity).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let history = fetcher.gateway().store().list_recent_query_logs(10).await.unwrap();
        assert_eq!(history.len(), 1);
        assert!(!history[0].success);
        assert_eq!(history[0].case_number, "9999");
        assert_eq!(history[0].case_type, "Criminal Appeal");
        assert!(history[0].raw_response.as_deref().unwrap().contains("Case not found"));
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let (fetcher, source, _clock) = setup().await;
        let identity = CaseIdentity::new("Writ Petition", "0000", "2024");

        for _ in 0..2 {
            let err = fetcher.fetch(&identity).await.unwrap_err();
            assert!(matches!(err, Error::SourceUnavailable(_)));
        }
        assert_eq!(source.calls(), 2);
        assert!(fetcher.gateway().lookup(&identity).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_no_stale_fallback_on_failure() {
        let (fetcher, _source, clock) = setup().await;
        let identity = CaseIdentity::new("Writ Petition", "9999", "2024");
        let mut stale = CountingSource::default()
            .fetch(&CaseIdentity::new("Writ Petition", "1", "2024"))
            .await
            .unwrap();
        stale.case_number = "9999".into();
        stale.id = identity.id();
        fetcher.gateway().save(&stale).await.unwrap();
        clock.advance(Duration::hours(48));

        let err = fetcher.fetch(&identity).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_save_failure_is_logged_and_returned() {
        let (fetcher, source, _clock) = setup().await;
        fetcher
            .gateway()
            .store()
            .conn
            .call(|conn| {
                conn.execute_batch(
                    "CREATE TRIGGER reject_cases BEFORE INSERT ON cases
                     BEGIN SELECT RAISE(ABORT, 'cases are read-only'); END;",
                )
            })
            .await
            .unwrap();
        let identity = CaseIdentity::new("Writ Petition", "4321", "2024");

        let err = fetcher.fetch(&identity).await.unwrap_err();
        assert!(matches!(err, Error::Database(_)));
        assert_eq!(source.calls(), 1);
        assert!(fetcher.gateway().lookup(&identity).await.unwrap().is_none());

        let history = fetcher.gateway().store().list_recent_query_logs(10).await.unwrap();
        assert_eq!(history.len(), 1);
        assert!(!history[0].success);
        assert_eq!(history[0].case_number, "4321");
        assert!(history[0].raw_response.as_deref().unwrap().starts_with("STORE_ERROR"));
    }

    #[tokio::test]
    async fn test_validation_skips_store() {
        let (fetcher, source, _clock) = setup().await;
        let err = fetcher
            .fetch(&CaseIdentity::new("Writ Petition", "", "2024"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(source.calls(), 0);
        assert!(fetcher.gateway().store().list_recent_query_logs(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_timestamp_is_stale() {
        let (fetcher, source, _clock) = setup().await;
        let identity = CaseIdentity::new("Civil Suit", "7", "2022");
        fetcher.fetch(&identity).await.unwrap();

        let mut broken = fetcher.gateway().lookup(&identity).await.unwrap().unwrap();
        broken.last_updated = "yesterday".into();
        fetcher.gateway().save(&broken).await.unwrap();

        assert!(!fetcher.fetch(&identity).await.unwrap().from_cache);
        assert_eq!(source.calls(), 2);
    }
}
