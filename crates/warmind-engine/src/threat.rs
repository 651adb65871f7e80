//! Ranked threats against owned locations.
//!
//! A threat is an enemy-held location with a standing army within the
//! configured radius of something we own. Threats are derived fresh
//! from each snapshot and ranked so the strongest (and, among equals,
//! the closest) enemy force comes first.

use warmind_types::{Faction, GameSnapshot, Threat};

/// Scan the snapshot for enemy forces within `radius` of any location
/// owned by `own_faction`.
///
/// Emits one [`Threat`] per (owned, enemy) pair where the enemy's army
/// strength is greater than zero. The result is ordered by descending
/// enemy strength, ties broken by ascending distance, then by location
/// ids so equal inputs always produce identical output.
pub fn analyze(snapshot: &GameSnapshot, own_faction: Faction, radius: f64) -> Vec<Threat> {
    let mut threats = Vec::new();

    for owned in snapshot.owned_by(own_faction) {
        for enemy in snapshot
            .locations
            .values()
            .filter(|loc| loc.owner.is_enemy_of(own_faction))
        {
            if enemy.army_strength == 0 {
                continue;
            }
            let distance = owned.position.distance_to(enemy.position);
            if distance <= radius {
                threats.push(Threat {
                    location_id: owned.id.clone(),
                    enemy_id: enemy.id.clone(),
                    enemy_strength: enemy.army_strength,
                    distance,
                });
            }
        }
    }

    threats.sort_by(|a, b| {
        b.enemy_strength
            .cmp(&a.enemy_strength)
            .then_with(|| a.distance.total_cmp(&b.distance))
            .then_with(|| a.location_id.cmp(&b.location_id))
            .then_with(|| a.enemy_id.cmp(&b.enemy_id))
    });

    threats
}
