pub mod api; // Local HTTP API
pub mod catalog;
pub mod config;
pub mod core_state; // Transport-agnostic state
pub mod coverage; // Classification + ranking
pub mod db;
pub mod directory;
pub mod map;
pub mod models;
pub mod readiness; // Pre-authorization readiness
pub mod state;
pub mod theme;

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Start the backend and serve the local API until Ctrl-C.
pub async fn run() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let core = Arc::new(core_state::CoreState::from_env().map_err(|e| e.to_string())?);
    tracing::info!(
        hospitals = core.directory().len(),
        analyzer = core.analyzer_name(),
        theme = core.theme().as_str(),
        "Core state ready"
    );

    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, config::api_port()));
    let server = api::start_local_api_server(core, addr).await?;
    tracing::info!(addr = %server.session.server_addr, "Serving local API");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }

    server.stop().await;
    tracing::info!("{} stopped", config::APP_NAME);
    Ok(())
}
