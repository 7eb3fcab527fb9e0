use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Training, UdemyLicense};

/// Failure of one adapter call. The reason is surfaced verbatim in the
/// per-source status block; it never propagates past the orchestrator.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RevokeOutcome {
    pub revoked: usize,
}

/// A platform that can report training activity. Implementations must return
/// only records attributable to their own platform; the orchestrator merges
/// blindly and relies on each record's `source` field for provenance.
#[async_trait]
pub trait TrainingProvider {
    async fn fetch_trainings(&self) -> Result<Vec<Training>, SourceError>;
}

/// A platform that manages per-seat licenses. Revocation is all-or-nothing
/// at this boundary; a live backend should upgrade it to per-email outcomes.
#[async_trait]
pub trait LicenseProvider {
    async fn fetch_licenses(&self) -> Result<Vec<UdemyLicense>, SourceError>;

    async fn revoke_licenses(&self, emails: &[String]) -> Result<RevokeOutcome, SourceError>;
}
