//! Synthetic court source.
//!
//! Produces case records without contacting any court website. Values are
//! derived from a SHA-256 of the identity, so repeated fetches of the same
//! case agree on parties, filing date, status and orders. Two case numbers
//! simulate upstream failures:
//!
//! - `9999`: the case does not exist
//! - `0000`: the court website is down

use std::time::Duration;

use async_trait::async_trait;
use casefetch_core::{AppConfig, CaseIdentity, CaseRecord, CaseSource, Error, Order, Parties};
use chrono::{Datelike, Days, NaiveDate, SecondsFormat, TimeZone, Utc};
use sha2::{Digest, Sha256};

/// Case number that always fails with `NotFound`.
pub const NOT_FOUND_CASE_NUMBER: &str = "9999";

/// Case number that always fails with `SourceUnavailable`.
pub const UNAVAILABLE_CASE_NUMBER: &str = "0000";

/// Filing year used when the requested year is not a number.
const FALLBACK_YEAR: i32 = 2000;

const ORDERS_BASE_URL: &str = "https://delhihighcourt.nic.in";

/// Mock implementation of [`CaseSource`].
#[derive(Debug, Clone, Default)]
pub struct MockCourtSource {
    latency: Duration,
}

impl MockCourtSource {
    /// Create a mock source that waits `latency` before answering.
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Build the mock source with the configured simulated latency.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.mock_latency())
    }

    /// Simulated latency applied to each fetch.
    pub fn latency(&self) -> Duration {
        self.latency
    }

    fn seed(identity: &CaseIdentity) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(identity.case_type.as_bytes());
        hasher.update(b"\n");
        hasher.update(identity.case_number.as_bytes());
        hasher.update(b"\n");
        hasher.update(identity.filing_year.as_bytes());
        hasher.finalize().into()
    }

    fn generate(identity: &CaseIdentity) -> CaseRecord {
        let seed = Self::seed(identity);
        let now = Utc::now();
        let today = now.date_naive();
        let number = &identity.case_number;

        let year = identity.filing_year.trim().parse::<i32>().unwrap_or(FALLBACK_YEAR);
        let month = u32::from(seed[0] % 12) + 1;
        let day = u32::from(seed[1] % 28) + 1;
        let filing_date = NaiveDate::from_ymd_opt(year, month, day)
            .or_else(|| NaiveDate::from_ymd_opt(FALLBACK_YEAR, month, day))
            .unwrap_or_default();

        let next_hearing = today + Days::new(u64::from(seed[2] % 30));
        let status = if seed[3] % 10 < 7 { "Active" } else { "Disposed" };

        let order_date = today - Days::new(u64::from(seed[4] % 30));
        let notice_date = today - Days::new(u64::from(seed[5] % 60));

        CaseRecord {
            id: identity.id(),
            case_number: number.clone(),
            case_type: identity.case_type.clone(),
            filing_year: identity.filing_year.clone(),
            parties: Parties {
                petitioner: format!("Petitioner Name for Case {number}"),
                respondent: format!("Respondent Name for Case {number}"),
            },
            filing_date: to_timestamp(filing_date),
            next_hearing_date: to_timestamp(next_hearing),
            status: status.to_string(),
            orders: vec![
                Order {
                    date: to_timestamp(order_date),
                    title: format!("Order dated {}", display_date(order_date)),
                    pdf_url: format!("{ORDERS_BASE_URL}/orders/{number}_order.pdf"),
                },
                Order {
                    date: to_timestamp(notice_date),
                    title: format!("Notice dated {}", display_date(notice_date)),
                    pdf_url: format!("{ORDERS_BASE_URL}/notices/{number}_notice.pdf"),
                },
            ],
            last_updated: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

fn to_timestamp(date: NaiveDate) -> String {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn display_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{}", date.day(), date.month(), date.year())
}

#[async_trait]
impl CaseSource for MockCourtSource {
    async fn fetch(&self, identity: &CaseIdentity) -> Result<CaseRecord, Error> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match identity.case_number.trim() {
            NOT_FOUND_CASE_NUMBER => Err(Error::NotFound("Case not found".into())),
            UNAVAILABLE_CASE_NUMBER => Err(Error::SourceUnavailable("Court website unavailable".into())),
            _ => Ok(Self::generate(identity)),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
