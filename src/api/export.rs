use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::services::export::{EXPORT_CONTENT_TYPE, EXPORT_FILENAME, export_csv};

/// GET /export
/// The whole bug list as a CSV attachment.
pub async fn export_bugs(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let bugs = state.bugs().list_bugs().await?;
    let csv = export_csv(&bugs);

    tracing::debug!(rows = bugs.len(), bytes = csv.len(), "Exported bug list");

    Ok((
        [
            (header::CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        csv,
    )
        .into_response())
}
