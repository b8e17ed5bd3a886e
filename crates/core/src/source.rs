//! Case source abstraction.
//!
//! The integration boundary to a court's case-status system. The fetch
//! orchestrator only talks to this trait, so a mock generator and a real
//! website integration are interchangeable.

use crate::{CaseIdentity, CaseRecord, Error};

/// A source of authoritative case records.
#[async_trait::async_trait]
pub trait CaseSource: Send + Sync {
    /// Fetch the current record for a case.
    ///
    /// # Errors
    ///
    /// - `Error::NotFound` when the case cannot be located
    /// - `Error::SourceUnavailable` when the upstream system cannot be reached
    async fn fetch(&self, identity: &CaseIdentity) -> Result<CaseRecord, Error>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
