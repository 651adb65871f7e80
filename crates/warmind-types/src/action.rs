//! The engine's action vocabulary.
//!
//! An [`ActionKind`] is what the weighted draw selects; an [`Action`]
//! is a kind bound to concrete targets, ready for the executor to turn
//! into exactly one remote call.

use serde::{Deserialize, Serialize};

use crate::location::LocationId;

/// The kinds of action the engine can take, without targets.
///
/// The declaration order is load-bearing: the weighted draw walks kinds
/// in this order, which fixes how ties in cumulative weight resolve and
/// keeps seeded draws reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Collect resources at an owned location.
    CollectResources,
    /// Spend resources to raise army strength at an owned location.
    BuildArmy,
    /// Take an unclaimed village.
    CaptureVillage,
    /// Ship resources from an owned village to the faction capital.
    TransferResources,
    /// Move strength toward a threatened owned location.
    Reinforce,
    /// Strike a weak enemy location.
    Attack,
}

impl ActionKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::CollectResources,
        Self::BuildArmy,
        Self::CaptureVillage,
        Self::TransferResources,
        Self::Reinforce,
        Self::Attack,
    ];

    /// Stable snake-case name, matching the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CollectResources => "collect_resources",
            Self::BuildArmy => "build_army",
            Self::CaptureVillage => "capture_village",
            Self::TransferResources => "transfer_resources",
            Self::Reinforce => "reinforce",
            Self::Attack => "attack",
        }
    }
}

impl core::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chosen action with its concrete targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Collect resources at the given owned location.
    CollectResources {
        /// Where to collect.
        location: LocationId,
    },
    /// Build army strength at the given owned location.
    BuildArmy {
        /// Where to build.
        location: LocationId,
    },
    /// Capture the given neutral village.
    CaptureVillage {
        /// The village to take.
        target: LocationId,
    },
    /// Move resources from an owned village to the faction capital.
    TransferResources {
        /// Source location.
        from: LocationId,
        /// Destination capital.
        to: LocationId,
    },
    /// Reinforce the given threatened owned location.
    Reinforce {
        /// The location under threat.
        target: LocationId,
    },
    /// Attack the given weak enemy location.
    Attack {
        /// The location to strike.
        target: LocationId,
    },
}

impl Action {
    /// The kind of this action.
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::CollectResources { .. } => ActionKind::CollectResources,
            Self::BuildArmy { .. } => ActionKind::BuildArmy,
            Self::CaptureVillage { .. } => ActionKind::CaptureVillage,
            Self::TransferResources { .. } => ActionKind::TransferResources,
            Self::Reinforce { .. } => ActionKind::Reinforce,
            Self::Attack { .. } => ActionKind::Attack,
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::CollectResources { location } => write!(f, "collect_resources at {location}"),
            Self::BuildArmy { location } => write!(f, "build_army at {location}"),
            Self::CaptureVillage { target } => write!(f, "capture_village {target}"),
            Self::TransferResources { from, to } => {
                write!(f, "transfer_resources {from} -> {to}")
            }
            Self::Reinforce { target } => write!(f, "reinforce {target}"),
            Self::Attack { target } => write!(f, "attack {target}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn kind_order_matches_declaration() {
        assert_eq!(
            ActionKind::ALL,
            [
                ActionKind::CollectResources,
                ActionKind::BuildArmy,
                ActionKind::CaptureVillage,
                ActionKind::TransferResources,
                ActionKind::Reinforce,
                ActionKind::Attack,
            ]
        );
    }

    #[test]
    fn action_reports_its_kind() {
        let action = Action::TransferResources {
            from: LocationId::from("village_1"),
            to: LocationId::from("southern_capital"),
        };
        assert_eq!(action.kind(), ActionKind::TransferResources);
    }

    #[test]
    fn action_serializes_tagged() {
        let action = Action::Attack {
            target: LocationId::from("northern_capital"),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["kind"], "attack");
        assert_eq!(json["target"], "northern_capital");
    }

    #[test]
    fn kind_name_matches_serde() {
        for kind in ActionKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }
}
