//! Case identity triple.

use serde::{Deserialize, Serialize};

use crate::Error;

/// The natural key of a case record: case type, case number and filing year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseIdentity {
    pub case_type: String,
    pub case_number: String,
    pub filing_year: String,
}

impl CaseIdentity {
    pub fn new(case_type: impl Into<String>, case_number: impl Into<String>, filing_year: impl Into<String>) -> Self {
        Self { case_type: case_type.into(), case_number: case_number.into(), filing_year: filing_year.into() }
    }

    /// Globally unique record id, formed by joining the triple with `-`.
    pub fn id(&self) -> String {
        format!("{}-{}-{}", self.case_type, self.case_number, self.filing_year)
    }

    /// Reject identities with any blank field.
    pub fn validate(&self) -> Result<(), Error> {
        let missing: Vec<&str> = [
            ("caseType", &self.case_type),
            ("caseNumber", &self.case_number),
            ("filingYear", &self.filing_year),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidInput(format!("Missing required fields: {}", missing.join(", "))))
        }
    }
}

impl std::fmt::Display for CaseIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id())
    }
}
