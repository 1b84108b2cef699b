//! Session authority: binds browser sessions to authenticated users.
//!
//! Sessions live in a `tower-sessions` [`MemoryStore`]. The opaque token is the
//! session [`Id`] carried in the session cookie, so a process restart ends
//! every session.
//!
//! Expired records are never swept from the store; they are ignored on lookup
//! and only a process restart clears them.

use std::sync::Arc;

use thiserror::Error;
use time::OffsetDateTime;
use tower_sessions::cookie::SameSite;
use tower_sessions::session::Id;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer, SessionStore};

use crate::models::UserId;

pub const SESSION_COOKIE_NAME: &str = "bugdesk_session";

const USER_ID_KEY: &str = "user_id";
const FLASH_KEY: &str = "flash";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Session store error: {0}")]
    Store(#[from] tower_sessions::session_store::Error),

    #[error("Session was not persisted")]
    NotPersisted,
}

/// Opaque handle for one authenticated browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Id);

impl SessionToken {
    /// The token of the session attached to the current request, if the
    /// browser presented one.
    #[must_use]
    pub fn of(session: &Session) -> Option<Self> {
        session.id().map(Self)
    }
}

#[derive(Clone)]
pub struct SessionAuthority {
    store: MemoryStore,
    idle_timeout: time::Duration,
    secure_cookies: bool,
}

impl SessionAuthority {
    #[must_use]
    pub fn new(idle_timeout: time::Duration, secure_cookies: bool) -> Self {
        Self {
            store: MemoryStore::default(),
            idle_timeout,
            secure_cookies,
        }
    }

    /// Cookie layer sharing this authority's store.
    #[must_use]
    pub fn layer(&self) -> SessionManagerLayer<MemoryStore> {
        SessionManagerLayer::new(self.store.clone())
            .with_name(SESSION_COOKIE_NAME)
            .with_secure(self.secure_cookies)
            .with_same_site(SameSite::Lax)
            .with_expiry(Expiry::OnInactivity(self.idle_timeout))
    }

    /// A detached session on this authority's store, for callers outside the
    /// HTTP layer.
    #[must_use]
    pub fn detached_session(&self) -> Session {
        Session::new(
            None,
            Arc::new(self.store.clone()),
            Some(Expiry::OnInactivity(self.idle_timeout)),
        )
    }

    /// Binds `session` to `user_id` and persists it.
    ///
    /// The browser's previous session id is rotated away; sessions held by
    /// other browsers, including ones for the same user, are untouched.
    pub async fn start_session(
        &self,
        session: &Session,
        user_id: UserId,
    ) -> Result<SessionToken, SessionError> {
        session.cycle_id().await?;
        session.insert(USER_ID_KEY, user_id).await?;
        session.save().await?;

        SessionToken::of(session).ok_or(SessionError::NotPersisted)
    }

    pub async fn current_user(&self, token: &SessionToken) -> Result<Option<UserId>, SessionError> {
        let Some(record) = self.store.load(&token.0).await? else {
            return Ok(None);
        };

        if record.expiry_date <= OffsetDateTime::now_utc() {
            return Ok(None);
        }

        Ok(record
            .data
            .get(USER_ID_KEY)
            .and_then(|value| serde_json::from_value(value.clone()).ok()))
    }

    /// Ending an unknown or already ended session is not an error.
    pub async fn end_session(&self, token: &SessionToken) -> Result<(), SessionError> {
        self.store.delete(&token.0).await?;
        Ok(())
    }

    /// Resolves the user behind the request's session cookie.
    pub async fn session_user(&self, session: &Session) -> Result<Option<UserId>, SessionError> {
        match SessionToken::of(session) {
            Some(token) => self.current_user(&token).await,
            None => Ok(None),
        }
    }

    /// Ends the request's session and clears its data so the cookie is dropped.
    pub async fn end_request_session(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(token) = SessionToken::of(session) {
            self.end_session(&token).await?;
        }
        session.clear().await;
        Ok(())
    }

    /// Stores a one-shot message shown on the next rendered page.
    pub async fn set_flash(&self, session: &Session, message: &str) -> Result<(), SessionError> {
        session.insert(FLASH_KEY, message).await?;
        Ok(())
    }

    pub async fn take_flash(&self, session: &Session) -> Result<Option<String>, SessionError> {
        Ok(session.remove::<String>(FLASH_KEY).await?)
    }
}
