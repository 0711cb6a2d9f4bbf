use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use aq_core::FileProvider;
use aq_server::ServiceSettings;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    // Observability
    aq_obs::init("aqd");

    // Config
    let cfg = aq_config::AppConfig::load().unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to load config, using defaults");
        aq_config::AppConfig::default()
    });
    let http_bind = cfg.http_bind();
    let sites_file = cfg.sites_file();

    let settings = ServiceSettings {
        pollutant: cfg.pollutant(),
        zero_reading: cfg.zero_reading(),
        organization: cfg.standards(),
        node_type: cfg.node_type(),
    };
    tracing::info!(?settings, sites_file = %sites_file.display(), "loaded configuration");

    // Build app and state
    let provider = Arc::new(FileProvider::new(&sites_file));
    let (app, state) = aq_server::build_app(provider, settings)?;

    // Start HTTP server
    let addr: SocketAddr = http_bind
        .parse()
        .with_context(|| format!("invalid HTTP bind address {http_bind}"))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    // Mark ready just before serving
    aq_server::set_ready(&state, true);

    tracing::info!(%addr, "HTTP server listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
