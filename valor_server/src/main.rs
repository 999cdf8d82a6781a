//! Valor Terrenos: official land value lookup API.
//!
//! Serves the MEF "valores arancelarios" district summary as a read-only JSON
//! API: department and district listings, district detail, and min/max value
//! estimates for a given land area. The CSV is loaded once at startup and
//! never modified.

mod config;
mod dataset;
mod error;
mod metrics;
mod models;
mod routes;
mod services;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{Method, StatusCode};
use clap::Parser;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::dataset::Dataset;

#[derive(Parser)]
#[command(name = "valor-terrenos", about = "Official land value lookup API")]
struct Cli {
    /// Server port
    #[arg(short, long, env = "VALOR_PORT", default_value = "8000")]
    port: u16,

    /// Path to the district summary CSV
    #[arg(long, env = "VALOR_DATA_PATH", default_value = "data/resumen_distrito.csv")]
    data: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .init();
    }

    let cli = Cli::parse();
    let config = config::ValorConfig::from_env();

    tracing::info!("Starting Valor Terrenos API...");

    let dataset = Dataset::from_path(&cli.data)?;
    if dataset.is_empty() {
        tracing::warn!("Dataset {} has no usable rows", cli.data.display());
    }

    if config.metrics_port != 0 {
        metrics::init_metrics(config.metrics_port);
    }
    metrics::dataset_rows(dataset.len());

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let state = routes::ValorRouterState {
        dataset: Arc::new(dataset),
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    let app = routes::valor_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                timeout,
            ))
            .layer(CompressionLayer::new())
            .layer(cors),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    tracing::info!("Valor Terrenos API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
