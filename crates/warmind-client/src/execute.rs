//! Turning a decided action into exactly one remote call.
//!
//! Each action maps to a single POST against one location server, with
//! no retry on failure: the next cycle fetches fresh state and decides
//! again, which is a better recovery than replaying a stale intent.
//! Resource and army mutation stays entirely on the server side; this
//! module only reports what the engine wants done.

use serde::Deserialize;
use tracing::info;
use warmind_types::{Action, Faction, LocationId};

use crate::error::ClientError;
use crate::fetch::LocationClient;

/// The single HTTP call an action translates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPlan {
    /// The location server that receives the call.
    pub location: LocationId,
    /// Path below that location's base URL.
    pub path: &'static str,
    /// JSON request body.
    pub body: serde_json::Value,
}

/// Map an action to the location, path, and body of its one call.
///
/// Collection and army building go to the acting location. Captures,
/// attacks, and reinforcements go to the target location with the
/// acting faction in the body. Transfers go to the source location
/// naming the destination.
pub fn plan_request(faction: Faction, action: &Action) -> RequestPlan {
    match action {
        Action::CollectResources { location } => RequestPlan {
            location: location.clone(),
            path: "collect_resources",
            body: serde_json::json!({ "faction": faction }),
        },
        Action::BuildArmy { location } => RequestPlan {
            location: location.clone(),
            path: "create_army",
            body: serde_json::json!({ "faction": faction }),
        },
        Action::CaptureVillage { target } => RequestPlan {
            location: target.clone(),
            path: "capture",
            body: serde_json::json!({ "faction": faction }),
        },
        Action::TransferResources { from, to } => RequestPlan {
            location: from.clone(),
            path: "send_resources_to_capital",
            body: serde_json::json!({ "faction": faction, "to": to }),
        },
        Action::Reinforce { target } => RequestPlan {
            location: target.clone(),
            path: "reinforce",
            body: serde_json::json!({ "faction": faction }),
        },
        Action::Attack { target } => RequestPlan {
            location: target.clone(),
            path: "attack",
            body: serde_json::json!({ "faction": faction }),
        },
    }
}

/// A location server's reply to an action call.
///
/// The servers answer `{"success": bool, ...}`; an absent field on a
/// 2xx response counts as success.
#[derive(Debug, Deserialize)]
struct ActionReply {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

impl LocationClient {
    /// Execute one action: one POST, one outcome, no retry.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnknownLocation`] if the action targets
    /// a location missing from the roster, [`ClientError::Http`] if
    /// the call never produced a response, and
    /// [`ClientError::ActionFailed`] on a non-2xx status, a timeout,
    /// or a `{"success": false}` reply.
    pub async fn execute(&self, faction: Faction, action: &Action) -> Result<(), ClientError> {
        let plan = plan_request(faction, action);
        let base = self
            .roster
            .url_of(&plan.location)
            .ok_or_else(|| ClientError::UnknownLocation {
                id: plan.location.clone(),
            })?;
        let url = format!("{base}/{}", plan.path);

        let call = async {
            let response = self
                .http
                .post(&url)
                .json(&plan.body)
                .send()
                .await
                .map_err(|source| ClientError::Http {
                    url: url.clone(),
                    source,
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(ClientError::ActionFailed {
                    id: plan.location.clone(),
                    kind: action.kind(),
                    reason: format!("server returned {status}"),
                });
            }

            let reply: ActionReply =
                response.json().await.map_err(|source| ClientError::Http {
                    url: url.clone(),
                    source,
                })?;
            if reply.success == Some(false) {
                return Err(ClientError::ActionFailed {
                    id: plan.location.clone(),
                    kind: action.kind(),
                    reason: reply.message.unwrap_or_else(|| "reported failure".to_owned()),
                });
            }
            Ok(())
        };

        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(Ok(())) => {
                info!(%faction, %action, "action executed");
                Ok(())
            }
            Ok(Err(error)) => Err(error),
            Err(_) => Err(ClientError::ActionFailed {
                id: plan.location,
                kind: action.kind(),
                reason: "request timed out".to_owned(),
            }),
        }
    }
}
