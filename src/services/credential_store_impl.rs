//! `SeaORM` implementation of the `CredentialStore` trait.

use anyhow::Context;
use async_trait::async_trait;
use tokio::task;
use tracing::{debug, info};

use crate::config::SecurityConfig;
use crate::db::{Store, hash_password, verify_password};
use crate::models::UserId;
use crate::services::credential_store::{CredentialError, CredentialStore, MAX_USERNAME_LEN};

/// Password verified against when the username does not exist, so that
/// lookups of unknown users cost the same as wrong passwords.
const DUMMY_PASSWORD: &str = "bugdesk-timing-equalizer";

pub struct SeaOrmCredentialStore {
    store: Store,
    security: SecurityConfig,
    dummy_hash: String,
}

impl SeaOrmCredentialStore {
    pub async fn new(store: Store, security: SecurityConfig) -> anyhow::Result<Self> {
        let params = security.clone();
        let dummy_hash = task::spawn_blocking(move || hash_password(DUMMY_PASSWORD, &params))
            .await
            .context("Password hashing task panicked")??;

        Ok(Self {
            store,
            security,
            dummy_hash,
        })
    }

    fn validate(&self, username: &str, password: &str) -> Result<(), CredentialError> {
        if username.is_empty() {
            return Err(CredentialError::Validation(
                "Username is required".to_string(),
            ));
        }

        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(CredentialError::Validation(format!(
                "Username must be {MAX_USERNAME_LEN} characters or less"
            )));
        }

        if password.chars().count() < self.security.min_password_length.max(1) {
            return Err(CredentialError::Validation(format!(
                "Password must be at least {} characters",
                self.security.min_password_length.max(1)
            )));
        }

        Ok(())
    }
}

async fn verify_blocking(password_hash: String, password: &str) -> anyhow::Result<bool> {
    let password = password.to_string();

    // Argon2 is CPU bound; keep it off the async workers
    task::spawn_blocking(move || verify_password(&password_hash, &password))
        .await
        .context("Password verification task panicked")?
}

#[async_trait]
impl CredentialStore for SeaOrmCredentialStore {
    async fn register(&self, username: &str, password: &str) -> Result<UserId, CredentialError> {
        self.validate(username, password)?;

        if self.store.username_exists(username).await? {
            return Err(CredentialError::UsernameTaken);
        }

        let password = password.to_string();
        let params = self.security.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, &params))
            .await
            .context("Password hashing task panicked")??;

        let user_id = self
            .store
            .insert_user(username, &password_hash)
            .await?
            .ok_or(CredentialError::UsernameTaken)?;

        info!(user_id = %user_id, "Registered user {username}");
        metrics::counter!("users_registered_total").increment(1);

        Ok(user_id)
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserId>, CredentialError> {
        let Some(credentials) = self.store.get_user_credentials(username).await? else {
            verify_blocking(self.dummy_hash.clone(), password).await?;
            debug!("Login attempt for unknown user");
            return Ok(None);
        };

        if verify_blocking(credentials.password_hash, password).await? {
            Ok(Some(credentials.user.id))
        } else {
            debug!(user_id = %credentials.user.id, "Password mismatch");
            Ok(None)
        }
    }

    async fn username_of(&self, user_id: UserId) -> Result<Option<String>, CredentialError> {
        let user = self.store.get_user(user_id).await?;
        Ok(user.map(|u| u.username))
    }
}
