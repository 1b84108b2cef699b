pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use cli::{Cli, Commands};
pub use config::Config;
use metrics_exporter_prometheus::PrometheusHandle;
use state::SharedState;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    match cli.command() {
        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!(
                    "Config file created at {}. Edit it and run `bugdesk serve`.",
                    Config::default_config_path().display()
                );
            } else {
                println!(
                    "{} already exists, leaving it untouched.",
                    Config::default_config_path().display()
                );
            }
            Ok(())
        }
        Commands::Serve => {
            config.validate()?;
            init_tracing(&config)?;
            let prometheus_handle = init_metrics(&config)?;
            run_server(config, prometheus_handle).await
        }
        Commands::Export { output } => {
            config.validate()?;
            init_tracing(&config)?;
            run_export(config, output).await
        }
    }
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if config.general.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.context("Failed to initialize tracing subscriber")
}

fn init_metrics(config: &Config) -> anyhow::Result<Option<PrometheusHandle>> {
    if !config.observability.metrics_enabled {
        return Ok(None);
    }

    use metrics_exporter_prometheus::PrometheusBuilder;
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics recorder initialized");
    Ok(Some(handle))
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    info!("Bugdesk v{} starting...", env!("CARGO_PKG_VERSION"));

    if !config.server.export_requires_login {
        warn!("/export is public: anyone who can reach the server can download every bug");
    }
    if !config.server.secure_cookies {
        warn!("Session cookies are sent without the Secure flag");
    }

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let shared = SharedState::new(config).await?;
    let app = api::router(api::create_app_state(
        Arc::new(shared.clone()),
        prometheus_handle,
    ));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error")?;

    shared.shutdown().await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}

async fn run_export(config: Config, output: Option<PathBuf>) -> anyhow::Result<()> {
    let shared = SharedState::new(config).await?;
    let bugs = shared.bugs.list_bugs().await?;
    let csv = services::export_csv(&bugs);

    match output {
        Some(path) => {
            std::fs::write(&path, &csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Exported {} bugs to {}", bugs.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&csv)?;
            stdout.flush()?;
        }
    }

    shared.shutdown().await
}
