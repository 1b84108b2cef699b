//! Domain service owning usernames and password hashes.
//!
//! Handles registration and credential verification. Session handling lives in
//! [`crate::services::session`].

use thiserror::Error;

use crate::models::UserId;

/// Longest username the `users` table accepts.
pub const MAX_USERNAME_LEN: usize = 80;

/// Errors specific to credential operations.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Username is already taken")]
    UsernameTaken,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<anyhow::Error> for CredentialError {
    fn from(err: anyhow::Error) -> Self {
        Self::Store(format!("{err:#}"))
    }
}

/// Domain service trait for the credential store.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Creates a user with a salted hash of `password`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::UsernameTaken`] on an exact (case-sensitive)
    /// match with an existing username. Nothing is written in that case.
    async fn register(&self, username: &str, password: &str) -> Result<UserId, CredentialError>;

    /// Returns the user's id when the password verifies.
    ///
    /// An unknown username and a wrong password both yield `Ok(None)` after
    /// the same amount of hashing work.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserId>, CredentialError>;

    /// Resolves a user id to its username.
    async fn username_of(&self, user_id: UserId) -> Result<Option<String>, CredentialError>;
}
