use axum::{Router, http::Uri, middleware, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

pub mod auth;
mod bugs;
mod error;
mod export;
mod observability;
mod validation;
pub mod views;

pub use error::ApiError;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn credentials(&self) -> &Arc<dyn crate::services::CredentialStore> {
        &self.shared.credentials
    }

    #[must_use]
    pub fn bugs(&self) -> &Arc<dyn crate::services::BugRegistry> {
        &self.shared.bugs
    }

    #[must_use]
    pub fn sessions(&self) -> &crate::services::SessionAuthority {
        &self.shared.sessions
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let export_requires_login = state.config().server.export_requires_login;
    let session_layer = state.sessions().layer();

    let mut public_routes = Router::new()
        .route(
            "/register",
            get(auth::register_form).post(auth::register),
        )
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/health", get(observability::health));

    let mut protected_routes = Router::new()
        .route("/", get(bugs::dashboard))
        .route("/report", get(bugs::report_form).post(bugs::submit_report))
        .route("/metrics", get(observability::get_metrics));

    if export_requires_login {
        protected_routes = protected_routes.route("/export", get(export::export_bugs));
    } else {
        public_routes = public_routes.route("/export", get(export::export_bugs));
    }

    let protected_routes = protected_routes.route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::require_login,
    ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(session_layer)
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(uri.path())
}
