//! Case record CRUD operations.
//!
//! A case record is stored as one row keyed by its identity triple, with the
//! ordered list of orders embedded as a JSON array.

use super::connection::Store;
use crate::{CaseIdentity, Error};
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// Parties to a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Parties {
    pub petitioner: String,
    pub respondent: String,
}

/// An order, judgment or notice issued in a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub date: String,
    pub title: String,
    pub pdf_url: String,
}

/// A cached court case record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub id: String,
    pub case_number: String,
    pub case_type: String,
    pub filing_year: String,
    pub parties: Parties,
    pub filing_date: String,
    pub next_hearing_date: String,
    pub status: String,
    pub orders: Vec<Order>,
    /// RFC 3339 timestamp of the fetch that produced this record.
    pub last_updated: String,
}

impl CaseRecord {
    pub fn identity(&self) -> CaseIdentity {
        CaseIdentity::new(&self.case_type, &self.case_number, &self.filing_year)
    }
}

pub(crate) const CASE_COLUMNS: &str = "id, case_number, case_type, filing_year, petitioner, respondent,
    filing_date, next_hearing_date, status, orders_json, last_updated";

pub(crate) fn case_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CaseRecord> {
    let orders_json: String = row.get(9)?;
    let orders = serde_json::from_str(&orders_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, Box::new(e)))?;

    Ok(CaseRecord {
        id: row.get(0)?,
        case_number: row.get(1)?,
        case_type: row.get(2)?,
        filing_year: row.get(3)?,
        parties: Parties {
            petitioner: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            respondent: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        },
        filing_date: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        next_hearing_date: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
        status: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
        orders,
        last_updated: row.get(10)?,
    })
}

impl Store {
    /// Insert or replace a cached case record.
    ///
    /// Uses UPSERT semantics keyed by the identity triple: every column of an
    /// existing row is overwritten, orders included. The first creation
    /// time is kept.
    pub async fn upsert_case(&self, record: &CaseRecord) -> Result<(), Error> {
        let record = record.clone();
        let orders_json = serde_json::to_string(&record.orders)?;
        let created_at = chrono::Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO cases (
                    id, case_number, case_type, filing_year, petitioner, respondent,
                    filing_date, next_hearing_date, status, orders_json, last_updated, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                ON CONFLICT(case_type, case_number, filing_year) DO UPDATE SET
                    id = excluded.id,
                    petitioner = excluded.petitioner,
                    respondent = excluded.respondent,
                    filing_date = excluded.filing_date,
                    next_hearing_date = excluded.next_hearing_date,
                    status = excluded.status,
                    orders_json = excluded.orders_json,
                    last_updated = excluded.last_updated",
                    params![
                        &record.id,
                        &record.case_number,
                        &record.case_type,
                        &record.filing_year,
                        &record.parties.petitioner,
                        &record.parties.respondent,
                        &record.filing_date,
                        &record.next_hearing_date,
                        &record.status,
                        &orders_json,
                        &record.last_updated,
                        &created_at,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Get a cached case by its identity triple.
    ///
    /// Returns None if no record exists for the identity.
    pub async fn get_case(&self, identity: &CaseIdentity) -> Result<Option<CaseRecord>, Error> {
        let identity = identity.clone();
        self.conn
            .call(move |conn| -> Result<Option<CaseRecord>, Error> {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {CASE_COLUMNS} FROM cases
                     WHERE case_type = ?1 AND case_number = ?2 AND filing_year = ?3"
                ))?;

                let result = stmt.query_row(
                    params![identity.case_type, identity.case_number, identity.filing_year],
                    case_from_row,
                );

                match result {
                    Ok(record) => Ok(Some(record)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Delete every cached case.
    ///
    /// Returns the number of deleted records.
    pub async fn clear_cases(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM cases", [])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}
