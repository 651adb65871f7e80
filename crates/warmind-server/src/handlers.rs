//! Control API request handlers.
//!
//! Thin translation between HTTP and the registry: parse the faction,
//! delegate, shape the JSON reply. User errors (unknown faction,
//! double activation) never change any state.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use warmind_types::{Faction, RunStatus};

use crate::error::ApiError;
use crate::state::AppState;
use crate::worker::run_worker;

/// Request body naming a faction.
#[derive(Debug, Deserialize)]
pub struct FactionRequest {
    /// The faction to act on, `"northern"` or `"southern"`.
    pub faction: String,
}

/// `POST /activate` -- start a run for a faction.
///
/// Spawns the worker task only after the registry insert succeeds, so
/// a losing concurrent activation never spawns anything.
pub async fn activate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FactionRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let faction: Faction = request.faction.parse()?;
    let run = state
        .registry
        .activate(faction)
        .await
        .map_err(ApiError::AlreadyActive)?;

    tokio::spawn(run_worker(Arc::clone(&state), faction, run));

    Ok(Json(serde_json::json!({
        "status": "activated",
        "faction": faction,
    })))
}

/// `POST /deactivate` -- stop a faction's run if one exists.
///
/// Idempotent: deactivating an inactive faction still answers 200.
pub async fn deactivate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FactionRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let faction: Faction = request.faction.parse()?;
    state.registry.deactivate(faction).await;

    Ok(Json(serde_json::json!({
        "status": "deactivated",
        "faction": faction,
    })))
}

/// `GET /status` -- run status for every faction.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let runs = state.registry.statuses().await;
    Json(serde_json::json!({ "runs": runs }))
}

/// `GET /status/{faction}` -- run status for one faction.
pub async fn status_of(
    State(state): State<Arc<AppState>>,
    Path(faction): Path<String>,
) -> Result<Json<RunStatus>, ApiError> {
    let faction: Faction = faction.parse()?;
    Ok(Json(state.registry.status_of(faction).await))
}

/// `GET /health` -- liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}
