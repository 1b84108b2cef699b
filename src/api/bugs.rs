use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::{CurrentUser, display_name};
use super::validation::{self, FieldError};
use super::views::{self, Notice};
use super::{ApiError, AppState};
use crate::models::NewBug;
use crate::services::BugError;
use crate::services::bug_registry::{MAX_TAG_LEN, MAX_TITLE_LEN};

/// Body of `POST /report`. `tag` may be left blank.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReportForm {
    pub title: String,
    pub description: String,
    pub tag: String,
}

impl ReportForm {
    fn validate(&self) -> Result<NewBug, FieldError> {
        let title = validation::required("Title", &self.title)?.trim();
        let title = validation::max_len("Title", title, MAX_TITLE_LEN)?;
        let description = validation::required("Description", &self.description)?;
        let tag = validation::optional(&self.tag);
        if let Some(tag) = &tag {
            validation::max_len("Tag", tag, MAX_TAG_LEN)?;
        }

        Ok(NewBug {
            title: title.to_string(),
            description: description.to_string(),
            tag,
        })
    }
}

/// GET /
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
) -> Result<Html<String>, ApiError> {
    let bugs = state.bugs().list_bugs().await?;
    let username = display_name(&state, user).await?;
    let flash = state.sessions().take_flash(&session).await?;

    Ok(Html(views::dashboard_page(
        username.as_deref(),
        Notice::flash(flash.as_deref()),
        &bugs,
    )))
}

/// GET /report
pub async fn report_form(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Html<String>, ApiError> {
    let username = display_name(&state, user).await?;
    Ok(Html(views::report_page(
        username.as_deref(),
        Notice::default(),
        "",
        "",
        "",
    )))
}

/// POST /report
pub async fn submit_report(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
    Form(form): Form<ReportForm>,
) -> Result<Response, ApiError> {
    let bug = match form.validate() {
        Ok(bug) => bug,
        Err(err) => return report_rejected(&state, user, &err.0, &form).await,
    };

    match state.bugs().create_bug(bug, user.0).await {
        Ok(id) => {
            tracing::info!(bug_id = %id, "Bug reported");
            state.sessions().set_flash(&session, "Bug reported.").await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(BugError::Validation(msg)) => report_rejected(&state, user, &msg, &form).await,
        Err(err @ BugError::MissingReporter(_)) => {
            tracing::warn!("{err}; ending session");
            state.sessions().end_request_session(&session).await?;
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

async fn report_rejected(
    state: &AppState,
    user: CurrentUser,
    message: &str,
    form: &ReportForm,
) -> Result<Response, ApiError> {
    let username = display_name(state, user).await?;
    let page = views::report_page(
        username.as_deref(),
        Notice::error(message),
        &form.title,
        &form.description,
        &form.tag,
    );
    Ok((StatusCode::BAD_REQUEST, Html(page)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, description: &str, tag: &str) -> ReportForm {
        ReportForm {
            title: title.to_string(),
            description: description.to_string(),
            tag: tag.to_string(),
        }
    }

    #[test]
    fn test_report_form_validation() {
        let bug = form(" Crash on save ", "App crashes when save is pressed", "Backend")
            .validate()
            .unwrap();
        assert_eq!(bug.title, "Crash on save");
        assert_eq!(bug.tag.as_deref(), Some("Backend"));

        let bug = form("Crash", "Boom", "  ").validate().unwrap();
        assert_eq!(bug.tag, None);

        assert!(form("", "Boom", "").validate().is_err());
        assert!(form("Crash", " ", "").validate().is_err());
        assert!(form("Crash", "Boom", &"t".repeat(51)).validate().is_err());
    }
}
