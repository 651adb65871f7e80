//! Run registry and cooperative stop signalling.
//!
//! The registry is the single arbiter of the one-run-per-faction
//! invariant: activation is a check-and-insert under one lock
//! acquisition, so two concurrent activations for the same faction can
//! never both succeed. Workers hold a [`StopSignal`] and check it at
//! every cycle boundary, including mid-pause, so deactivation takes
//! effect within milliseconds rather than at the end of a sleep.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, Notify, RwLock};
use tracing::{error, info};
use uuid::Uuid;
use warmind_types::{Faction, RunStatus};

/// A one-shot cooperative stop flag that can interrupt sleeps.
#[derive(Debug, Default)]
pub struct StopSignal {
    stopped: AtomicBool,
    notify: Notify,
}

impl StopSignal {
    /// Create a signal in the not-stopped state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop and wake every waiter.
    pub fn request_stop(&self) {
        self.stopped.store(true, Ordering::Release);
        self.notify.notify_waiters();
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Wait until a stop is requested. Returns immediately if one
    /// already was.
    pub async fn stopped(&self) {
        // Register the waiter before re-checking the flag so a stop
        // between the check and the await cannot be missed.
        loop {
            let notified = self.notify.notified();
            if self.is_stopped() {
                return;
            }
            notified.await;
        }
    }

    /// Sleep for `duration` unless a stop arrives first.
    ///
    /// Returns `true` if the run should stop, whether the request came
    /// mid-sleep or before it.
    pub async fn sleep_cancellable(&self, duration: Duration) -> bool {
        tokio::select! {
            () = tokio::time::sleep(duration) => self.is_stopped(),
            () = self.stopped() => true,
        }
    }
}

/// Registry entry for one live run.
#[derive(Debug, Clone)]
pub struct ActiveRun {
    /// Unique id of this activation.
    pub run_id: Uuid,
    /// The worker's stop signal.
    pub stop: Arc<StopSignal>,
    /// Shared run status, written by the worker and read by `/status`.
    pub status: Arc<RwLock<RunStatus>>,
}

/// Lock-guarded map of live runs, at most one per faction.
#[derive(Debug, Default)]
pub struct Registry {
    runs: Mutex<BTreeMap<Faction, ActiveRun>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new run for `faction`.
    ///
    /// The existence check and the insert happen under the same lock
    /// acquisition, so of any number of concurrent activations for one
    /// faction exactly one wins.
    ///
    /// # Errors
    ///
    /// Returns the faction back if it already has a live run.
    pub async fn activate(&self, faction: Faction) -> Result<ActiveRun, Faction> {
        let mut runs = self.runs.lock().await;
        if runs.contains_key(&faction) {
            return Err(faction);
        }
        let run_id = Uuid::now_v7();
        let run = ActiveRun {
            run_id,
            stop: Arc::new(StopSignal::new()),
            status: Arc::new(RwLock::new(RunStatus::activated(faction, run_id))),
        };
        runs.insert(faction, run.clone());
        info!(%faction, run_id = %run.run_id, "run activated");
        Ok(run)
    }

    /// Remove `faction`'s run, if any, and signal its worker to stop.
    ///
    /// Idempotent: deactivating an inactive faction is a no-op.
    /// Returns whether a run was actually stopped.
    pub async fn deactivate(&self, faction: Faction) -> bool {
        let removed = self.runs.lock().await.remove(&faction);
        match removed {
            Some(run) => {
                run.stop.request_stop();
                info!(%faction, run_id = %run.run_id, "run deactivated");
                true
            }
            None => false,
        }
    }

    /// Worker self-removal at the end of a run.
    ///
    /// Only removes the entry if it still belongs to the finishing
    /// worker. A different `run_id` in the slot means another
    /// activation happened after this worker was deactivated; touching
    /// it would kill a stranger's run, so the mismatch is logged as a
    /// registry race and left alone.
    pub async fn finish(&self, faction: Faction, run_id: Uuid) {
        let mut runs = self.runs.lock().await;
        match runs.get(&faction) {
            Some(run) if run.run_id == run_id => {
                runs.remove(&faction);
                info!(%faction, %run_id, "run finished");
            }
            Some(run) => {
                error!(
                    %faction,
                    finishing = %run_id,
                    registered = %run.run_id,
                    "registry race: finishing run does not own its slot"
                );
            }
            None => {}
        }
    }

    /// The current status of `faction`'s run, or the inactive marker.
    pub async fn status_of(&self, faction: Faction) -> RunStatus {
        let run = self.runs.lock().await.get(&faction).cloned();
        match run {
            Some(run) => run.status.read().await.clone(),
            None => RunStatus::inactive(faction),
        }
    }

    /// Statuses for every faction, in [`Faction::ALL`] order.
    pub async fn statuses(&self) -> Vec<RunStatus> {
        let mut out = Vec::with_capacity(Faction::ALL.len());
        for faction in Faction::ALL {
            out.push(self.status_of(faction).await);
        }
        out
    }
}
