//! One-time seeding of court reference data.

use super::Error;
use tokio_rusqlite::{Connection, params};

/// (name, url, location, court type)
const COURTS: &[(&str, &str, &str, &str)] = &[
    ("Delhi High Court", "https://delhihighcourt.nic.in/", "New Delhi", "High Court"),
    ("Supreme Court of India", "https://main.sci.gov.in/", "New Delhi", "Supreme Court"),
    ("Bombay High Court", "https://bombayhighcourt.nic.in/", "Mumbai", "High Court"),
    ("Madras High Court", "https://hcmadras.tn.nic.in/", "Chennai", "High Court"),
    ("Calcutta High Court", "https://calcuttahighcourt.nic.in/", "Kolkata", "High Court"),
];

/// Court whose case types are seeded.
const CASE_TYPE_COURT: &str = "Delhi High Court";

/// (type name, type code, description)
const CASE_TYPES: &[(&str, &str, &str)] = &[
    ("Civil Appeal", "CA", "Civil Appeals"),
    ("Criminal Appeal", "CRL.A", "Criminal Appeals"),
    ("Writ Petition", "W.P.(C)", "Writ Petitions (Civil)"),
    ("Civil Suit", "CS(OS)", "Civil Suits (Original Side)"),
    ("Criminal Case", "CRL.M.C", "Criminal Miscellaneous Cases"),
    ("Company Petition", "CP", "Company Petitions"),
    ("Arbitration Petition", "ARB.P", "Arbitration Petitions"),
    ("Contempt Petition", "CONT.CAS(C)", "Contempt Cases (Civil)"),
    ("Criminal Writ", "W.P.(CRL)", "Writ Petitions (Criminal)"),
    ("Bail Application", "BAIL APPLN", "Bail Applications"),
];

/// Seed courts and case types if the courts table is empty.
///
/// Returns true when seed rows were written.
pub async fn run(conn: &Connection) -> Result<bool, Error> {
    conn.call(|conn| -> Result<bool, Error> {
        let existing: i64 = conn.query_row("SELECT COUNT(*) FROM courts", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(false);
        }

        let now = chrono::Utc::now().to_rfc3339();
        let tx = conn.transaction()?;
        {
            let mut insert_court = tx.prepare(
                "INSERT INTO courts (name, url, location, court_type, active, created_at)
                 VALUES (?1, ?2, ?3, ?4, 1, ?5)",
            )?;
            for (name, url, location, court_type) in COURTS {
                insert_court.execute(params![name, url, location, court_type, now])?;
            }

            let court_id: i64 =
                tx.query_row("SELECT id FROM courts WHERE name = ?1", params![CASE_TYPE_COURT], |row| row.get(0))?;

            let mut insert_type = tx.prepare(
                "INSERT INTO case_types (court_id, type_name, type_code, description, active)
                 VALUES (?1, ?2, ?3, ?4, 1)",
            )?;
            for (type_name, type_code, description) in CASE_TYPES {
                insert_type.execute(params![court_id, type_name, type_code, description])?;
            }
        }
        tx.commit()?;

        tracing::info!(courts = COURTS.len(), case_types = CASE_TYPES.len(), "seeded court reference data");
        Ok(true)
    })
    .await
    .map_err(Error::from)
}
