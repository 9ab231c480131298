use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use analyze::BatchOrchestrator;
use api::{AppConfig, AppState};
use detect::HttpDetectionClient;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Detection backend client
    let client = HttpDetectionClient::new(&config.detector)
        .context("Failed to create detection client")?;

    let orchestrator = BatchOrchestrator::new(Arc::new(client), &config.analysis)
        .context("Invalid analysis configuration")?;

    let state = AppState::new(orchestrator, config.upload.clone());
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %config.bind_addr,
        detector = %config.detector.base_url,
        max_concurrency = config.analysis.max_concurrency,
        "Server listening"
    );

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// `RUST_LOG` filter (default `info`); JSON lines when
/// `TEXTLENS_LOG_FORMAT=json`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("TEXTLENS_LOG_FORMAT").is_ok_and(|format| format == "json");

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
