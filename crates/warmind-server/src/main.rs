//! Entry point for the Warmind opponent server.
//!
//! Loads configuration, initializes structured logging, and serves the
//! control API. Workers are spawned on demand by `POST /activate`, one
//! per faction; the process itself carries no game state beyond the
//! run registry.

use tracing::info;
use tracing_subscriber::EnvFilter;
use warmind_server::config::ServerConfig;
use warmind_server::server::start_server;
use warmind_server::state::AppState;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the server fails to
/// bind.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("warmind-server starting");

    let config = ServerConfig::load()?;
    info!(
        host = config.host,
        port = config.port,
        locations = config.locations.len(),
        call_timeout_ms = config.call_timeout_ms,
        fetch_timeout_ms = config.fetch_timeout_ms,
        "configuration loaded"
    );

    let state = AppState::from_config(&config);
    start_server(&config, state).await?;

    Ok(())
}
