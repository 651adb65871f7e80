//! Shared application state for the control API and workers.

use std::sync::Arc;

use warmind_client::LocationClient;
use warmind_engine::{DecisionWeights, EngineConfig};

use crate::config::ServerConfig;
use crate::registry::Registry;

/// Everything the handlers and worker tasks share.
///
/// Wrapped in [`Arc`] and cloned into each worker. The registry is the
/// only mutable part; the client and the tunables are fixed at startup.
#[derive(Debug)]
pub struct AppState {
    /// The run registry.
    pub registry: Registry,
    /// HTTP client over the location roster.
    pub client: LocationClient,
    /// Analysis and pacing tunables.
    pub engine: EngineConfig,
    /// Per-phase action weight table.
    pub weights: DecisionWeights,
}

impl AppState {
    /// Build the shared state from validated configuration.
    pub fn from_config(config: &ServerConfig) -> Arc<Self> {
        Arc::new(Self {
            registry: Registry::new(),
            client: LocationClient::new(
                config.locations.clone(),
                config.call_timeout(),
                config.fetch_timeout(),
            ),
            engine: config.engine.clone(),
            weights: config.weights.clone(),
        })
    }
}
