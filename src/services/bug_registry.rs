//! Domain service for bug reports.

use thiserror::Error;

use crate::models::{Bug, BugId, NewBug, UserId};

/// Longest title the `bugs` table accepts.
pub const MAX_TITLE_LEN: usize = 200;

/// Longest tag the `bugs` table accepts.
pub const MAX_TAG_LEN: usize = 50;

#[derive(Debug, Error)]
pub enum BugError {
    /// The session's user id no longer resolves to a username.
    #[error("Reporter {0} does not exist")]
    MissingReporter(UserId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<anyhow::Error> for BugError {
    fn from(err: anyhow::Error) -> Self {
        Self::Store(format!("{err:#}"))
    }
}

impl From<crate::services::CredentialError> for BugError {
    fn from(err: crate::services::CredentialError) -> Self {
        Self::Store(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait BugRegistry: Send + Sync {
    /// Stores a report attributed to `reporter`, with status "Open".
    ///
    /// # Errors
    ///
    /// Returns [`BugError::MissingReporter`] when `reporter` cannot be
    /// resolved to a username; the report is never stored unattributed.
    async fn create_bug(&self, bug: NewBug, reporter: UserId) -> Result<BugId, BugError>;

    /// All bugs in insertion order.
    async fn list_bugs(&self) -> Result<Vec<Bug>, BugError>;
}
