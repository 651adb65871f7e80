//! The per-cycle immutable view of the whole map.
//!
//! A [`GameSnapshot`] is assembled once at the top of every decision
//! cycle from whatever location servers responded in time, and is
//! discarded at the end of the cycle. No snapshot data survives into
//! the next cycle; the remote servers remain the single source of
//! truth.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::faction::Faction;
use crate::location::{LocationId, LocationKind, LocationState};

/// Immutable view of all reachable locations at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Reachable locations keyed by id.
    pub locations: BTreeMap<LocationId, LocationState>,
    /// When the fan-out fetch that produced this snapshot completed.
    pub fetched_at: DateTime<Utc>,
}

impl GameSnapshot {
    /// Build a snapshot from fetched location states, stamped now.
    pub fn new(locations: BTreeMap<LocationId, LocationState>) -> Self {
        Self {
            locations,
            fetched_at: Utc::now(),
        }
    }

    /// Look up one location.
    pub fn get(&self, id: &LocationId) -> Option<&LocationState> {
        self.locations.get(id)
    }

    /// Number of locations in the snapshot.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether the snapshot contains no locations at all.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Iterate over the locations held by `faction`.
    pub fn owned_by(&self, faction: Faction) -> impl Iterator<Item = &LocationState> {
        self.locations
            .values()
            .filter(move |loc| loc.owner.is_held_by(faction))
    }

    /// Number of locations held by `faction`.
    pub fn holdings_of(&self, faction: Faction) -> usize {
        self.owned_by(faction).count()
    }

    /// Iterate over all capitals in the snapshot.
    pub fn capitals(&self) -> impl Iterator<Item = &LocationState> {
        self.locations
            .values()
            .filter(|loc| loc.kind == LocationKind::Capital)
    }

    /// Determine whether the game is over, and who won.
    ///
    /// A faction has won when it holds every capital in the snapshot,
    /// or when its opponent holds zero locations while it still holds
    /// at least one. Returns `None` while the game is undecided.
    ///
    /// Callers should only trust this on a complete snapshot: a partial
    /// fetch that dropped a capital or an entire faction's holdings
    /// would otherwise look like a victory.
    pub fn victor(&self) -> Option<Faction> {
        let mut capital_holder: Option<Faction> = None;
        let mut all_capitals_one_side = true;
        let mut capital_count: usize = 0;

        for capital in self.capitals() {
            capital_count = capital_count.saturating_add(1);
            match capital.owner.faction() {
                Some(owner) => match capital_holder {
                    None => capital_holder = Some(owner),
                    Some(held) if held == owner => {}
                    Some(_) => all_capitals_one_side = false,
                },
                None => all_capitals_one_side = false,
            }
        }

        if capital_count > 0 && all_capitals_one_side {
            if let Some(winner) = capital_holder {
                return Some(winner);
            }
        }

        for faction in Faction::ALL {
            if self.holdings_of(faction) == 0 && self.holdings_of(faction.opponent()) > 0 {
                return Some(faction.opponent());
            }
        }

        None
    }
}
