//! Cache gateway between the fetch orchestrator and the store.

use crate::store::NewQueryLog;
use crate::{CaseIdentity, CaseRecord, Error, Store};

/// Read/write accessors for cached cases plus best-effort attempt logging.
///
/// Holds no state besides the store handle; every call goes to the store.
#[derive(Clone, Debug)]
pub struct CacheGateway {
    store: Store,
}

impl CacheGateway {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The most recently saved record for an identity, if any.
    pub async fn lookup(&self, identity: &CaseIdentity) -> Result<Option<CaseRecord>, Error> {
        self.store.get_case(identity).await
    }

    /// Save a record, replacing any previous record for the same identity.
    pub async fn save(&self, record: &CaseRecord) -> Result<(), Error> {
        self.store.upsert_case(record).await
    }

    /// Append a lookup attempt to the query history.
    ///
    /// Failures are reported and swallowed.
    pub async fn log_attempt(&self, identity: &CaseIdentity, success: bool, detail: &str, latency_ms: i64) {
        let entry = NewQueryLog::new(identity, success, detail, latency_ms);
        if let Err(e) = self.store.append_query_log(&entry).await {
            tracing::warn!(case = %identity, error = %e, "failed to log query attempt");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::cases::tests::make_test_case;

    #[tokio::test]
    async fn test_lookup_after_save() {
        let gateway = CacheGateway::new(Store::open_in_memory().await.unwrap());
        let record = make_test_case("1234", "Active");

        assert!(gateway.lookup(&record.identity()).await.unwrap().is_none());
        gateway.save(&record).await.unwrap();
        assert_eq!(gateway.lookup(&record.identity()).await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_log_attempt_swallows_store_errors() {
        let store = Store::open_in_memory().await.unwrap();
        store
            .conn
            .call(|conn| conn.execute_batch("DROP TABLE queries"))
            .await
            .unwrap();
        let gateway = CacheGateway::new(store);

        gateway
            .log_attempt(&CaseIdentity::new("Civil Appeal", "1", "2024"), true, "ok", 1)
            .await;
    }

    #[tokio::test]
    async fn test_log_attempt_appends() {
        let gateway = CacheGateway::new(Store::open_in_memory().await.unwrap());
        let identity = CaseIdentity::new("Civil Appeal", "1", "2024");

        gateway.log_attempt(&identity, false, "Case not found", 30).await;

        let history = gateway.store().list_recent_query_logs(10).await.unwrap();
        assert_eq!(history.len(), 1);
        assert!(!history[0].success);
        assert_eq!(history[0].response_time_ms, Some(30));
    }
}
