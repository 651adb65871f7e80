//! Game phases, per-cycle tactical derivations, and run status.
//!
//! [`Threat`] and [`Opportunity`] are derived from one snapshot and
//! discarded at the end of the cycle that produced them. [`RunStatus`]
//! is the only state that outlives a cycle; it backs the `/status`
//! endpoint and is overwritten in place each cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::Action;
use crate::faction::Faction;
use crate::location::LocationId;

/// Coarse classification of the match by elapsed activation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// The opening minutes: expand and gather.
    Early,
    /// The middle game: consolidate and probe.
    Mid,
    /// The late game: press for the win.
    Late,
}

impl Phase {
    /// Lowercase name as served by the status endpoint.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Early => "early",
            Self::Mid => "mid",
            Self::Late => "late",
        }
    }
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An enemy force within range of an owned location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threat {
    /// The owned location being threatened.
    pub location_id: LocationId,
    /// The enemy location the threat originates from.
    pub enemy_id: LocationId,
    /// Strength of the threatening army.
    pub enemy_strength: u64,
    /// Distance between the two locations.
    pub distance: f64,
}

/// Whether an opportunity is an unclaimed village or a weak enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityKind {
    /// An unclaimed village, always worth considering.
    Neutral,
    /// An enemy location we outmatch by the configured attack ratio.
    WeakEnemy,
}

/// A capturable or attackable target derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    /// The location to capture or attack.
    pub target_id: LocationId,
    /// Neutral capture or weak-enemy attack.
    pub kind: OpportunityKind,
    /// Resources minus distance penalty; higher is better.
    pub value_score: f64,
    /// Distance from the nearest owned location.
    pub distance: f64,
}

/// Externally visible state of one faction's run.
///
/// Served by `GET /status`. `active: false` with the remaining fields
/// empty is the inactive marker for a faction with no run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStatus {
    /// The faction this run plays.
    pub faction: Faction,
    /// Whether the worker is currently running.
    pub active: bool,
    /// Unique id of this activation (changes on every activate).
    pub run_id: Option<Uuid>,
    /// When the run was activated.
    pub started_at: Option<DateTime<Utc>>,
    /// Phase as of the most recent cycle.
    pub phase: Option<Phase>,
    /// The most recently executed action, if any.
    pub last_action: Option<Action>,
    /// When the most recent decision was made.
    pub last_decision_time: Option<DateTime<Utc>>,
    /// The most recent per-cycle failure, cleared on the next success.
    pub last_error: Option<String>,
    /// Number of completed decision cycles.
    pub cycles_completed: u64,
}

impl RunStatus {
    /// The inactive marker for a faction with no run.
    pub const fn inactive(faction: Faction) -> Self {
        Self {
            faction,
            active: false,
            run_id: None,
            started_at: None,
            phase: None,
            last_action: None,
            last_decision_time: None,
            last_error: None,
            cycles_completed: 0,
        }
    }

    /// A freshly activated run's status.
    pub fn activated(faction: Faction, run_id: Uuid) -> Self {
        Self {
            faction,
            active: true,
            run_id: Some(run_id),
            started_at: Some(Utc::now()),
            phase: Some(Phase::Early),
            last_action: None,
            last_decision_time: None,
            last_error: None,
            cycles_completed: 0,
        }
    }
}
