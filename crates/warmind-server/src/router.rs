//! Axum router construction for the control API.
//!
//! Assembles all routes into a single [`Router`] with permissive CORS
//! (the game dashboard runs on a different origin) and request
//! tracing.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete control API router.
///
/// - `POST /activate` -- start a faction's run
/// - `POST /deactivate` -- stop a faction's run (idempotent)
/// - `GET /status` -- all faction statuses
/// - `GET /status/{faction}` -- one faction's status
/// - `GET /health` -- liveness probe
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/activate", post(handlers::activate))
        .route("/deactivate", post(handlers::deactivate))
        .route("/status", get(handlers::status))
        .route("/status/{faction}", get(handlers::status_of))
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
