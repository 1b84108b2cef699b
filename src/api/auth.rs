use axum::{
    Form,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::validation::{self, FieldError};
use super::views::{self, Notice};
use super::{ApiError, AppState};
use crate::models::UserId;
use crate::services::CredentialError;
use crate::services::credential_store::MAX_USERNAME_LEN;

const LOGIN_FAILED: &str = "Invalid username or password";

// ============================================================================
// Request Types
// ============================================================================

/// Body of `POST /login` and `POST /register`. Missing fields arrive empty
/// and are rejected by [`CredentialsForm::validate`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

impl CredentialsForm {
    fn validate(&self) -> Result<(&str, &str), FieldError> {
        let username = validation::required("Username", &self.username)?;
        let username = validation::max_len("Username", username, MAX_USERNAME_LEN)?;
        let password = validation::non_empty("Password", &self.password)?;
        Ok((username, password))
    }
}

/// The authenticated user, inserted by [`require_login`].
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

// ============================================================================
// Middleware
// ============================================================================

/// Lets the request through only with a live session; otherwise redirects
/// to the login page before any handler runs.
pub async fn require_login(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(user_id) = state.sessions().session_user(&session).await? else {
        tracing::debug!("No session, redirecting to login");
        return Err(ApiError::Unauthorized);
    };

    tracing::Span::current().record("user_id", user_id.0);
    request.extensions_mut().insert(CurrentUser(user_id));
    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /register
pub async fn register_form(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, ApiError> {
    let flash = state.sessions().take_flash(&session).await?;
    Ok(Html(views::register_page(
        Notice::flash(flash.as_deref()),
        "",
    )))
}

/// POST /register
pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, ApiError> {
    let (username, password) = match form.validate() {
        Ok(fields) => fields,
        Err(err) => {
            return Ok(register_rejected(StatusCode::BAD_REQUEST, &err.0, &form.username));
        }
    };

    match state.credentials().register(username, password).await {
        Ok(_) => {
            state
                .sessions()
                .set_flash(&session, "Registration successful. Please log in.")
                .await?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(CredentialError::UsernameTaken) => Ok(register_rejected(
            StatusCode::CONFLICT,
            "Username already exists",
            username,
        )),
        Err(CredentialError::Validation(msg)) => Ok(register_rejected(
            StatusCode::BAD_REQUEST,
            &msg,
            username,
        )),
        Err(err) => Err(err.into()),
    }
}

fn register_rejected(status: StatusCode, message: &str, username: &str) -> Response {
    (
        status,
        Html(views::register_page(Notice::error(message), username)),
    )
        .into_response()
}

/// GET /login
pub async fn login_form(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, ApiError> {
    let flash = state.sessions().take_flash(&session).await?;
    Ok(Html(views::login_page(Notice::flash(flash.as_deref()), "")))
}

/// POST /login
/// One generic message covers unknown users and wrong passwords.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, ApiError> {
    let (username, password) = match form.validate() {
        Ok(fields) => fields,
        Err(err) => {
            return Ok(login_rejected(StatusCode::BAD_REQUEST, &err.0, &form.username));
        }
    };

    let Some(user_id) = state.credentials().authenticate(username, password).await? else {
        tracing::warn!("Failed login attempt");
        metrics::counter!("logins_failed_total").increment(1);
        return Ok(login_rejected(StatusCode::UNAUTHORIZED, LOGIN_FAILED, username));
    };

    state.sessions().start_session(&session, user_id).await?;
    tracing::Span::current().record("user_id", user_id.0);
    tracing::info!("User {user_id} logged in");

    Ok(Redirect::to("/").into_response())
}

fn login_rejected(status: StatusCode, message: &str, username: &str) -> Response {
    (
        status,
        Html(views::login_page(Notice::error(message), username)),
    )
        .into_response()
}

/// GET /logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Redirect, ApiError> {
    state.sessions().end_request_session(&session).await?;
    Ok(Redirect::to("/login"))
}

/// Username for the navigation bar.
pub(super) async fn display_name(
    state: &AppState,
    CurrentUser(user_id): CurrentUser,
) -> Result<Option<String>, ApiError> {
    Ok(state.credentials().username_of(user_id).await?)
}
