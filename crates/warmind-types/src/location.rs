//! Location identity, kind, position, and per-cycle wire state.
//!
//! Location servers are the owners of all mutable location state; this
//! process only ever deserializes a read response into a
//! [`LocationState`] and treats it as an immutable copy for one
//! decision cycle.

use serde::{Deserialize, Serialize};

use crate::faction::Allegiance;

/// Identifier of a location, as configured in the game map.
///
/// The map uses human-readable string ids such as `southern_capital`
/// and `village_3`; these double as service names for the per-location
/// servers, so the id is a string rather than a numeric key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    /// Create a location id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for LocationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for LocationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The kind of settlement at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    /// A faction seat. Losing every capital loses the game.
    Capital,
    /// An ordinary settlement that generates resources.
    Village,
}

impl LocationKind {
    /// Whether this is a faction capital.
    pub const fn is_capital(self) -> bool {
        matches!(self, Self::Capital)
    }
}

/// A point on the map, in percentage coordinates (0..=100 on each axis).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Euclidean distance to another position.
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// One location's state as reported by its server.
///
/// This is the read-endpoint response body. It is rebuilt from scratch
/// every cycle and never mutated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationState {
    /// Map id of the location.
    pub id: LocationId,
    /// Display name (e.g. `Southern Capital`).
    #[serde(default)]
    pub name: String,
    /// Current owner.
    pub owner: Allegiance,
    /// Capital or village.
    pub kind: LocationKind,
    /// Stockpiled resources.
    pub resources: u64,
    /// Stationed army strength.
    pub army_strength: u64,
    /// Map position.
    pub position: Position,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn location_id_is_transparent_in_json() {
        let id = LocationId::from("village_1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"village_1\"");
        let back: LocationId = serde_json::from_str("\"village_1\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Position { x: 0.0, y: 0.0 };
        let b = Position { x: 3.0, y: 4.0 };
        assert!((a.distance_to(b) - 5.0).abs() < f64::EPSILON);
        assert!((b.distance_to(a) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn location_state_round_trips_wire_format() {
        let json = serde_json::json!({
            "id": "village_2",
            "name": "Village 2",
            "owner": "neutral",
            "kind": "village",
            "resources": 50,
            "army_strength": 3,
            "position": {"x": 65.0, "y": 35.0}
        });
        let state: LocationState = serde_json::from_value(json).unwrap();
        assert_eq!(state.id.as_str(), "village_2");
        assert_eq!(state.kind, LocationKind::Village);
        assert!(state.owner.is_neutral());
        assert_eq!(state.army_strength, 3);
    }

    #[test]
    fn name_defaults_to_empty_when_absent() {
        let json = serde_json::json!({
            "id": "village_2",
            "owner": "northern",
            "kind": "village",
            "resources": 10,
            "army_strength": 0,
            "position": {"x": 1.0, "y": 2.0}
        });
        let state: LocationState = serde_json::from_value(json).unwrap();
        assert!(state.name.is_empty());
    }
}
