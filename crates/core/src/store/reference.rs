//! Read-only court reference data.

use super::connection::Store;
use crate::Error;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;

/// A court whose case records can be looked up.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub location: Option<String>,
    /// High Court, Supreme Court, District Court, ...
    pub court_type: Option<String>,
    pub active: bool,
}

/// A case type accepted by a court.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseTypeDefinition {
    pub id: i64,
    pub court_id: i64,
    pub type_name: String,
    pub type_code: Option<String>,
    pub description: Option<String>,
    pub active: bool,
}

impl Store {
    /// List active courts ordered by name.
    pub async fn list_courts(&self) -> Result<Vec<Court>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<Court>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, name, url, location, court_type, active
                     FROM courts WHERE active = 1 ORDER BY name",
                )?;
                let courts = stmt
                    .query_map([], |row| {
                        Ok(Court {
                            id: row.get(0)?,
                            name: row.get(1)?,
                            url: row.get(2)?,
                            location: row.get(3)?,
                            court_type: row.get(4)?,
                            active: row.get(5)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(courts)
            })
            .await
            .map_err(Error::from)
    }

    /// List active case types for a court, ordered by type name.
    ///
    /// An unknown court id yields an empty list.
    pub async fn list_case_types(&self, court_id: i64) -> Result<Vec<CaseTypeDefinition>, Error> {
        self.conn
            .call(move |conn| -> Result<Vec<CaseTypeDefinition>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, court_id, type_name, type_code, description, active
                     FROM case_types WHERE court_id = ?1 AND active = 1 ORDER BY type_name",
                )?;
                let types = stmt
                    .query_map(params![court_id], |row| {
                        Ok(CaseTypeDefinition {
                            id: row.get(0)?,
                            court_id: row.get(1)?,
                            type_name: row.get(2)?,
                            type_code: row.get(3)?,
                            description: row.get(4)?,
                            active: row.get(5)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(types)
            })
            .await
            .map_err(Error::from)
    }
}
