//! The per-faction decision loop.
//!
//! One worker task exists per activated faction. Each cycle it fetches
//! fresh state, derives threats and opportunities, draws one action,
//! executes it, updates the shared run status, and pauses for a random
//! interval. Nothing a single cycle does can kill the run: fetch and
//! action failures are recorded and the loop moves on. Only
//! deactivation, a finished game, or a registry race stop the worker.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::Rng;
use tracing::{debug, info, warn};
use warmind_engine::{DecisionEngine, opportunity, phase_at, threat};
use warmind_types::{Faction, Phase};

use crate::registry::ActiveRun;
use crate::state::AppState;

/// Run the decision loop for one activation until it stops.
///
/// The worker deregisters itself via [`Registry::finish`] on the way
/// out, so a game-over exit leaves the faction activatable again.
///
/// [`Registry::finish`]: crate::registry::Registry::finish
pub async fn run_worker(state: Arc<AppState>, faction: Faction, run: ActiveRun) {
    let started = tokio::time::Instant::now();
    let mut engine = DecisionEngine::new(
        state.weights.clone(),
        state.engine.clone(),
        SmallRng::from_os_rng(),
    );
    let mut pause_rng = SmallRng::from_os_rng();

    info!(%faction, run_id = %run.run_id, "worker started");

    loop {
        if run.stop.is_stopped() {
            break;
        }

        let phase = phase_at(started.elapsed());

        let snapshot = match state.client.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(%faction, %error, "cycle skipped: no game state");
                record_error(&run, phase, error.to_string()).await;
                if pause(&state, &run, &mut pause_rng).await {
                    break;
                }
                continue;
            }
        };

        // Victory is only judged on complete snapshots; a partial
        // fetch that dropped a capital must not end the game.
        if snapshot.len() == state.client.roster().len()
            && let Some(winner) = snapshot.victor()
        {
            info!(%faction, %winner, "game over, run ends");
            break;
        }

        let threats = threat::analyze(&snapshot, faction, state.engine.threat_radius);
        let opportunities = opportunity::find(
            &snapshot,
            faction,
            state.engine.attack_ratio,
            state.engine.distance_penalty,
        );

        let decision = engine.decide(phase, &snapshot, faction, &threats, &opportunities);

        let failure = match &decision {
            Some(action) => {
                debug!(
                    %faction,
                    %action,
                    threats = threats.len(),
                    opportunities = opportunities.len(),
                    "action chosen"
                );
                state
                    .client
                    .execute(faction, action)
                    .await
                    .err()
                    .map(|e| e.to_string())
            }
            None => {
                debug!(%faction, "idle cycle: nothing worth doing");
                None
            }
        };
        if let Some(reason) = &failure {
            warn!(%faction, %reason, "action failed");
        }

        {
            let mut status = run.status.write().await;
            status.phase = Some(phase);
            status.last_decision_time = Some(Utc::now());
            if failure.is_none()
                && let Some(action) = decision
            {
                status.last_action = Some(action);
            }
            status.last_error = failure;
            status.cycles_completed = status.cycles_completed.saturating_add(1);
        }

        if pause(&state, &run, &mut pause_rng).await {
            break;
        }
    }

    state.registry.finish(faction, run.run_id).await;
    info!(%faction, run_id = %run.run_id, "worker stopped");
}

/// Record a cycle failure without advancing the cycle counter.
async fn record_error(run: &ActiveRun, phase: Phase, message: String) {
    let mut status = run.status.write().await;
    status.phase = Some(phase);
    status.last_error = Some(message);
}

/// Pause for a uniform draw from the configured window.
///
/// Returns `true` if the worker should stop.
async fn pause(state: &AppState, run: &ActiveRun, rng: &mut SmallRng) -> bool {
    let secs = rng.random_range(state.engine.pause_min_secs..=state.engine.pause_max_secs);
    run.stop
        .sleep_cancellable(Duration::from_secs(secs))
        .await
}
