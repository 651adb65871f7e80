//! The per-phase base weight table.
//!
//! One base weight per [`ActionKind`] per [`Phase`], populated at
//! startup from configuration and never mutated afterwards. The
//! situational gates in [`crate::decision`] start from these numbers.
//!
//! The default temperament: greedy expansion early, balanced
//! consolidation in the mid game, and open aggression late.

use serde::Deserialize;
use warmind_types::{ActionKind, Phase};

use crate::config::ConfigError;

/// Base weights for the six action kinds within one phase.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhaseWeights {
    /// Base weight for collecting resources.
    pub collect_resources: f64,
    /// Base weight for building armies.
    pub build_army: f64,
    /// Base weight for capturing neutral villages.
    pub capture_village: f64,
    /// Base weight for shipping village resources to the capital.
    pub transfer_resources: f64,
    /// Base weight for reinforcing threatened holdings.
    pub reinforce: f64,
    /// Base weight for attacking weak enemy locations.
    pub attack: f64,
}

impl PhaseWeights {
    /// Look up the base weight for one action kind.
    pub const fn get(&self, kind: ActionKind) -> f64 {
        match kind {
            ActionKind::CollectResources => self.collect_resources,
            ActionKind::BuildArmy => self.build_army,
            ActionKind::CaptureVillage => self.capture_village,
            ActionKind::TransferResources => self.transfer_resources,
            ActionKind::Reinforce => self.reinforce,
            ActionKind::Attack => self.attack,
        }
    }

    /// All-zero weights; useful as a base for tests and overrides.
    pub const fn zero() -> Self {
        Self {
            collect_resources: 0.0,
            build_army: 0.0,
            capture_village: 0.0,
            transfer_resources: 0.0,
            reinforce: 0.0,
            attack: 0.0,
        }
    }

    fn validate(&self, phase: Phase) -> Result<(), ConfigError> {
        for kind in ActionKind::ALL {
            let weight = self.get(kind);
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::Invalid {
                    reason: format!("{phase} weight for {kind} must be non-negative and finite"),
                });
            }
        }
        Ok(())
    }
}

impl Default for PhaseWeights {
    /// Mid-game defaults; the phase-specific tables live on
    /// [`DecisionWeights::default`].
    fn default() -> Self {
        DecisionWeights::default().mid
    }
}

/// The full phase-by-kind weight table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DecisionWeights {
    /// Weights for the early game.
    pub early: PhaseWeights,
    /// Weights for the mid game.
    pub mid: PhaseWeights,
    /// Weights for the late game.
    pub late: PhaseWeights,
}

impl DecisionWeights {
    /// The base weights for one phase.
    pub const fn for_phase(&self, phase: Phase) -> &PhaseWeights {
        match phase {
            Phase::Early => &self.early,
            Phase::Mid => &self.mid,
            Phase::Late => &self.late,
        }
    }

    /// Validate every weight in the table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if any weight is negative,
    /// `NaN`, or infinite. An all-zero phase is allowed; the engine
    /// simply idles through it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.early.validate(Phase::Early)?;
        self.mid.validate(Phase::Mid)?;
        self.late.validate(Phase::Late)?;
        Ok(())
    }
}

impl Default for DecisionWeights {
    fn default() -> Self {
        Self {
            early: PhaseWeights {
                collect_resources: 40.0,
                build_army: 20.0,
                capture_village: 35.0,
                transfer_resources: 5.0,
                reinforce: 0.0,
                attack: 0.0,
            },
            mid: PhaseWeights {
                collect_resources: 25.0,
                build_army: 25.0,
                capture_village: 20.0,
                transfer_resources: 10.0,
                reinforce: 15.0,
                attack: 15.0,
            },
            late: PhaseWeights {
                collect_resources: 15.0,
                build_army: 20.0,
                capture_village: 10.0,
                transfer_resources: 10.0,
                reinforce: 20.0,
                attack: 35.0,
            },
        }
    }
}
