//! Ranked expansion and attack targets.
//!
//! Neutral villages are always worth considering; enemy locations only
//! become opportunities once some owned army outmatches them by the
//! configured attack ratio. Scores trade raw resources against the
//! distance from our nearest holding.

use warmind_types::{Faction, GameSnapshot, LocationKind, LocationState, Opportunity, OpportunityKind};

/// Scan the snapshot for capturable neutral villages and attackable
/// weak enemy locations for `own_faction`.
///
/// `distance` for each opportunity is measured from the nearest owned
/// location; `value_score` is the target's resources minus
/// `distance_penalty * distance`. The result is ordered by descending
/// value score, ties broken by ascending distance, then by target id.
/// With no owned locations there is nothing to capture or attack from,
/// so the result is empty.
pub fn find(
    snapshot: &GameSnapshot,
    own_faction: Faction,
    attack_ratio: f64,
    distance_penalty: f64,
) -> Vec<Opportunity> {
    let owned: Vec<&LocationState> = snapshot.owned_by(own_faction).collect();
    if owned.is_empty() {
        return Vec::new();
    }

    let strongest_army = owned
        .iter()
        .map(|loc| loc.army_strength)
        .max()
        .unwrap_or(0);

    let mut opportunities = Vec::new();

    for target in snapshot.locations.values() {
        if target.owner.is_held_by(own_faction) {
            continue;
        }

        let kind = if target.owner.is_neutral() {
            if target.kind == LocationKind::Village {
                OpportunityKind::Neutral
            } else {
                continue;
            }
        } else if as_f64(strongest_army) >= attack_ratio * as_f64(target.army_strength) {
            OpportunityKind::WeakEnemy
        } else {
            continue;
        };

        let distance = owned
            .iter()
            .map(|loc| loc.position.distance_to(target.position))
            .fold(f64::INFINITY, f64::min);

        opportunities.push(Opportunity {
            target_id: target.id.clone(),
            kind,
            value_score: as_f64(target.resources) - distance_penalty * distance,
            distance,
        });
    }

    opportunities.sort_by(|a, b| {
        b.value_score
            .total_cmp(&a.value_score)
            .then_with(|| a.distance.total_cmp(&b.distance))
            .then_with(|| a.target_id.cmp(&b.target_id))
    });

    opportunities
}

/// Lossy-but-harmless conversion for scoring; game counters stay far
/// below 2^52.
#[allow(clippy::cast_precision_loss)]
fn as_f64(value: u64) -> f64 {
    value as f64
}
