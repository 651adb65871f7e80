//! Faction identity and location ownership.
//!
//! The game has exactly two competing sides. Locations are owned either
//! by one of them or by nobody, so ownership is modelled as a separate
//! [`Allegiance`] enum rather than an `Option<Faction>` -- the wire
//! format uses the literal string `"neutral"` and a dedicated variant
//! keeps serialization symmetric with the location servers.

use serde::{Deserialize, Serialize};

/// One of the two competing sides in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    /// The northern kingdom.
    Northern,
    /// The southern kingdom.
    Southern,
}

impl Faction {
    /// Both factions, in a fixed order.
    pub const ALL: [Self; 2] = [Self::Northern, Self::Southern];

    /// Return the opposing faction.
    pub const fn opponent(self) -> Self {
        match self {
            Self::Northern => Self::Southern,
            Self::Southern => Self::Northern,
        }
    }

    /// Lowercase name as used on the wire and in the control API.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Northern => "northern",
            Self::Southern => "southern",
        }
    }
}

impl core::fmt::Display for Faction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a faction name does not match a known side.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown faction: {name} (expected \"northern\" or \"southern\")")]
pub struct UnknownFactionError {
    /// The rejected input string.
    pub name: String,
}

impl core::str::FromStr for Faction {
    type Err = UnknownFactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "northern" => Ok(Self::Northern),
            "southern" => Ok(Self::Southern),
            other => Err(UnknownFactionError {
                name: other.to_owned(),
            }),
        }
    }
}

/// Ownership of a location: one of the factions, or nobody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Allegiance {
    /// Not yet claimed by either side.
    Neutral,
    /// Held by the northern kingdom.
    Northern,
    /// Held by the southern kingdom.
    Southern,
}

impl Allegiance {
    /// The owning faction, if any.
    pub const fn faction(self) -> Option<Faction> {
        match self {
            Self::Neutral => None,
            Self::Northern => Some(Faction::Northern),
            Self::Southern => Some(Faction::Southern),
        }
    }

    /// Whether the location is unclaimed.
    pub const fn is_neutral(self) -> bool {
        matches!(self, Self::Neutral)
    }

    /// Whether the location is held by `faction`.
    pub fn is_held_by(self, faction: Faction) -> bool {
        self.faction() == Some(faction)
    }

    /// Whether the location is held by the faction opposing `faction`.
    pub fn is_enemy_of(self, faction: Faction) -> bool {
        self.is_held_by(faction.opponent())
    }
}

impl From<Faction> for Allegiance {
    fn from(faction: Faction) -> Self {
        match faction {
            Faction::Northern => Self::Northern,
            Faction::Southern => Self::Southern,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_symmetric() {
        assert_eq!(Faction::Northern.opponent(), Faction::Southern);
        assert_eq!(Faction::Southern.opponent(), Faction::Northern);
        for faction in Faction::ALL {
            assert_eq!(faction.opponent().opponent(), faction);
        }
    }

    #[test]
    fn faction_parses_wire_names() {
        assert_eq!("northern".parse::<Faction>().unwrap(), Faction::Northern);
        assert_eq!("Southern".parse::<Faction>().unwrap(), Faction::Southern);
        assert!("eastern".parse::<Faction>().is_err());
    }

    #[test]
    fn faction_serde_is_lowercase() {
        let json = serde_json::to_string(&Faction::Northern).unwrap();
        assert_eq!(json, "\"northern\"");
        let back: Faction = serde_json::from_str("\"southern\"").unwrap();
        assert_eq!(back, Faction::Southern);
    }

    #[test]
    fn allegiance_ownership_checks() {
        assert!(Allegiance::Neutral.is_neutral());
        assert!(Allegiance::Northern.is_held_by(Faction::Northern));
        assert!(!Allegiance::Northern.is_held_by(Faction::Southern));
        assert!(Allegiance::Northern.is_enemy_of(Faction::Southern));
        assert!(!Allegiance::Neutral.is_enemy_of(Faction::Southern));
    }

    #[test]
    fn allegiance_from_faction() {
        assert_eq!(Allegiance::from(Faction::Southern).faction(), Some(Faction::Southern));
        assert_eq!(Allegiance::Neutral.faction(), None);
    }
}
