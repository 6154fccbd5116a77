// Error taxonomy. Display strings end up in {"error": ...} response payloads.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UsageError {
    /// Host metrics facility unreachable (no cores reported, poisoned state).
    #[error("host metrics unavailable: {0}")]
    MetricsUnavailable(String),

    /// Sample store unreadable or unwritable, including first-run schema
    /// creation failure.
    #[error("sample store: {0}")]
    Persistence(String),

    /// A stored sample's core count does not match the width established by
    /// the first sample of the scan.
    #[error("inconsistent core count: expected {expected} cores, got {got}")]
    InconsistentCoreCount { expected: usize, got: usize },

    /// Docker daemon unreachable (e.g. no socket).
    #[error("container runtime unavailable: {0}")]
    RuntimeUnavailable(bollard::errors::Error),

    /// Reading stats for one container failed; aborts the whole listing.
    #[error("container stats for {name}: {reason}")]
    ContainerStats { name: String, reason: String },
}

impl From<sqlx::Error> for UsageError {
    fn from(e: sqlx::Error) -> Self {
        UsageError::Persistence(e.to_string())
    }
}
