//! Snapshot assembly by concurrent fan-out.
//!
//! Every decision cycle starts here: one GET per roster entry, all in
//! flight at once, each with its own per-call timeout, the whole batch
//! bounded by an overall deadline. Locations that fail or time out are
//! simply absent from the snapshot; the cycle proceeds on whatever
//! arrived. Only a snapshot with zero locations is an error.

use std::collections::BTreeMap;
use std::time::Duration;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use tracing::{debug, warn};
use warmind_types::{GameSnapshot, LocationId, LocationState};

use crate::error::ClientError;
use crate::roster::Roster;

/// HTTP client over the roster of location servers.
///
/// Cheap to clone in the sense that it is built once per process and
/// shared by reference; the inner `reqwest::Client` pools connections
/// across all locations.
#[derive(Debug, Clone)]
pub struct LocationClient {
    pub(crate) http: reqwest::Client,
    pub(crate) roster: Roster,
    pub(crate) call_timeout: Duration,
    fetch_timeout: Duration,
}

impl LocationClient {
    /// Build a client over `roster` with the given per-call and
    /// overall fetch timeouts.
    pub fn new(roster: Roster, call_timeout: Duration, fetch_timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            roster,
            call_timeout,
            fetch_timeout,
        }
    }

    /// The roster this client was built over.
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Fetch the current state of every reachable location.
    ///
    /// Slow and broken locations are logged and skipped; the snapshot
    /// contains whatever arrived before the overall deadline. The
    /// caller can compare `snapshot.len()` against `roster().len()` to
    /// tell a complete snapshot from a partial one.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::FetchTotalFailure`] only when not a
    /// single location produced a usable response.
    pub async fn fetch_snapshot(&self) -> Result<GameSnapshot, ClientError> {
        let deadline = tokio::time::Instant::now() + self.fetch_timeout;

        let mut pending: FuturesUnordered<_> = self
            .roster
            .iter()
            .map(|(id, base)| self.fetch_one(id.clone(), base.to_owned()))
            .collect();

        let mut locations = BTreeMap::new();
        loop {
            match tokio::time::timeout_at(deadline, pending.next()).await {
                Ok(Some(Ok(state))) => {
                    locations.insert(state.id.clone(), state);
                }
                Ok(Some(Err((id, reason)))) => {
                    warn!(location = %id, %reason, "location fetch failed");
                }
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        outstanding = pending.len(),
                        "fetch deadline reached with responses outstanding"
                    );
                    break;
                }
            }
        }

        if locations.is_empty() {
            return Err(ClientError::FetchTotalFailure);
        }
        debug!(
            locations = locations.len(),
            configured = self.roster.len(),
            "snapshot assembled"
        );
        Ok(GameSnapshot::new(locations))
    }

    /// Fetch one location's state, bounded by the per-call timeout.
    ///
    /// Failures come back as `(id, reason)` so the caller can log them
    /// without aborting the rest of the fan-out.
    async fn fetch_one(
        &self,
        id: LocationId,
        base: String,
    ) -> Result<LocationState, (LocationId, String)> {
        let url = format!("{base}/state");
        let request = async {
            let response = self
                .http
                .get(&url)
                .send()
                .await
                .map_err(|e| e.to_string())?;
            let status = response.status();
            if !status.is_success() {
                return Err(format!("server returned {status}"));
            }
            response
                .json::<LocationState>()
                .await
                .map_err(|e| format!("bad state body: {e}"))
        };

        match tokio::time::timeout(self.call_timeout, request).await {
            Ok(Ok(state)) => Ok(state),
            Ok(Err(reason)) => Err((id, reason)),
            Err(_) => Err((id, "request timed out".to_owned())),
        }
    }
}
