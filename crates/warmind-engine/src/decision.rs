//! Situational gating and the weighted draw.
//!
//! Each cycle the engine takes the base weights for the current phase,
//! adjusts them against the snapshot (zeroing the weight of any action
//! that has no valid target right now), draws one action kind from the
//! resulting distribution, and binds it to a concrete target. The PRNG
//! is injected so tests can seed it and replay a run.

use rand::Rng;
use warmind_types::{
    Action, ActionKind, Faction, GameSnapshot, LocationState, Opportunity, OpportunityKind, Phase,
    Threat,
};

use crate::config::EngineConfig;
use crate::weights::{DecisionWeights, PhaseWeights};

/// Picks one action per cycle via a gated weighted draw.
#[derive(Debug)]
pub struct DecisionEngine<R> {
    weights: DecisionWeights,
    config: EngineConfig,
    rng: R,
}

impl<R: Rng> DecisionEngine<R> {
    /// Build an engine from a validated weight table and configuration.
    pub const fn new(weights: DecisionWeights, config: EngineConfig, rng: R) -> Self {
        Self {
            weights,
            config,
            rng,
        }
    }

    /// Decide what to do this cycle, if anything.
    ///
    /// Returns `None` when every gated weight is zero, which happens
    /// when the faction holds nothing or the phase's base weights only
    /// cover actions without a valid target. A `None` cycle is a pass,
    /// not an error.
    pub fn decide(
        &mut self,
        phase: Phase,
        snapshot: &GameSnapshot,
        own_faction: Faction,
        threats: &[Threat],
        opportunities: &[Opportunity],
    ) -> Option<Action> {
        let gated = gate(
            self.weights.for_phase(phase),
            &self.config,
            snapshot,
            own_faction,
            threats,
            opportunities,
        );
        let kind = self.draw(&gated)?;
        bind(kind, snapshot, own_faction, threats, opportunities)
    }

    /// Sample one action kind from the gated weights.
    ///
    /// The draw is unnormalized: roll a point in `0..total` and walk
    /// the kinds in declaration order subtracting each weight until the
    /// roll goes negative.
    fn draw(&mut self, gated: &[(ActionKind, f64); 6]) -> Option<ActionKind> {
        let total: f64 = gated.iter().map(|(_, weight)| weight).sum();
        if total <= 0.0 || !total.is_finite() {
            return None;
        }

        let mut roll = self.rng.random_range(0.0..total);
        let mut last_positive = None;
        for (kind, weight) in gated {
            if *weight <= 0.0 {
                continue;
            }
            last_positive = Some(*kind);
            roll -= weight;
            if roll < 0.0 {
                return Some(*kind);
            }
        }
        // Float accumulation can leave a sliver of the roll unspent;
        // it belongs to the final positive-weight kind.
        last_positive
    }
}

/// Adjust one phase's base weights against the current situation.
///
/// Actions without a valid target are zeroed; the rest are scaled by
/// how urgent they are right now. The output preserves the kinds'
/// declaration order.
fn gate(
    base: &PhaseWeights,
    config: &EngineConfig,
    snapshot: &GameSnapshot,
    own_faction: Faction,
    threats: &[Threat],
    opportunities: &[Opportunity],
) -> [(ActionKind, f64); 6] {
    let owned: Vec<&LocationState> = snapshot.owned_by(own_faction).collect();

    let mut gated = ActionKind::ALL.map(|kind| (kind, 0.0));
    if owned.is_empty() {
        return gated;
    }

    let total_resources: u64 = owned.iter().map(|loc| loc.resources).sum();
    let surplus = as_f64(total_resources) / as_f64(config.surplus_reference);

    let village_resources: u64 = owned
        .iter()
        .filter(|loc| !loc.kind.is_capital())
        .map(|loc| loc.resources)
        .sum();
    let has_capital = owned.iter().any(|loc| loc.kind.is_capital());
    let has_village = owned.iter().any(|loc| !loc.kind.is_capital());

    let has_neutral = opportunities
        .iter()
        .any(|opp| opp.kind == OpportunityKind::Neutral);
    let has_weak_enemy = opportunities
        .iter()
        .any(|opp| opp.kind == OpportunityKind::WeakEnemy);

    for slot in &mut gated {
        slot.1 = match slot.0 {
            // Stockpiles dampen collection and feed army building.
            ActionKind::CollectResources => base.collect_resources / (1.0 + surplus),
            ActionKind::BuildArmy => base.build_army * (1.0 + surplus),
            ActionKind::CaptureVillage => {
                if has_neutral {
                    base.capture_village
                } else {
                    0.0
                }
            }
            ActionKind::TransferResources => {
                if has_capital && has_village {
                    base.transfer_resources
                        * (as_f64(village_resources) / as_f64(config.surplus_reference))
                } else {
                    0.0
                }
            }
            ActionKind::Reinforce => threats.first().map_or(0.0, |top| {
                let defender = snapshot
                    .get(&top.location_id)
                    .map_or(0, |loc| loc.army_strength);
                base.reinforce * (1.0 + as_f64(top.enemy_strength) / as_f64(defender.max(1)))
            }),
            ActionKind::Attack => {
                if has_weak_enemy {
                    base.attack
                } else {
                    0.0
                }
            }
        };
    }

    gated
}

/// Bind a drawn action kind to a concrete target.
///
/// Returns `None` only if the snapshot changed out from under the
/// gates, which cannot happen within one cycle; the fallbacks exist so
/// the binder never panics regardless.
fn bind(
    kind: ActionKind,
    snapshot: &GameSnapshot,
    own_faction: Faction,
    threats: &[Threat],
    opportunities: &[Opportunity],
) -> Option<Action> {
    match kind {
        ActionKind::CollectResources => {
            richest_owned(snapshot, own_faction).map(|loc| Action::CollectResources {
                location: loc.id.clone(),
            })
        }
        ActionKind::BuildArmy => richest_owned(snapshot, own_faction).map(|loc| Action::BuildArmy {
            location: loc.id.clone(),
        }),
        ActionKind::CaptureVillage => opportunities
            .iter()
            .find(|opp| opp.kind == OpportunityKind::Neutral)
            .map(|opp| Action::CaptureVillage {
                target: opp.target_id.clone(),
            }),
        ActionKind::TransferResources => {
            let from = snapshot
                .owned_by(own_faction)
                .filter(|loc| !loc.kind.is_capital())
                .max_by(|a, b| a.resources.cmp(&b.resources).then_with(|| b.id.cmp(&a.id)))?;
            let to = snapshot
                .owned_by(own_faction)
                .find(|loc| loc.kind.is_capital())?;
            Some(Action::TransferResources {
                from: from.id.clone(),
                to: to.id.clone(),
            })
        }
        ActionKind::Reinforce => threats.first().map(|top| Action::Reinforce {
            target: top.location_id.clone(),
        }),
        ActionKind::Attack => opportunities
            .iter()
            .find(|opp| opp.kind == OpportunityKind::WeakEnemy)
            .map(|opp| Action::Attack {
                target: opp.target_id.clone(),
            }),
    }
}

/// The owned location with the most resources, ties broken by the
/// smaller id.
fn richest_owned(snapshot: &GameSnapshot, own_faction: Faction) -> Option<&LocationState> {
    snapshot
        .owned_by(own_faction)
        .max_by(|a, b| a.resources.cmp(&b.resources).then_with(|| b.id.cmp(&a.id)))
}

/// Lossy-but-harmless conversion for scoring; game counters stay far
/// below 2^52.
#[allow(clippy::cast_precision_loss)]
fn as_f64(value: u64) -> f64 {
    value as f64
}
