//! The location roster: which servers make up the game map.
//!
//! Each location in the map runs its own server; the roster maps
//! location ids to the base URLs those servers answer on. The default
//! roster mirrors the stock eight-location map on localhost.

use std::collections::BTreeMap;

use serde::Deserialize;
use warmind_types::LocationId;

/// Location ids mapped to the base URLs of their servers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Roster(BTreeMap<LocationId, String>);

impl Roster {
    /// Build a roster from an explicit id-to-URL map.
    pub const fn new(locations: BTreeMap<LocationId, String>) -> Self {
        Self(locations)
    }

    /// The base URL for one location, if it is in the roster.
    pub fn url_of(&self, id: &LocationId) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    /// Number of configured locations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(id, base_url)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&LocationId, &str)> {
        self.0.iter().map(|(id, url)| (id, url.as_str()))
    }
}

impl Default for Roster {
    /// The stock eight-location map: both capitals and six villages on
    /// consecutive localhost ports.
    fn default() -> Self {
        let stock = [
            ("southern_capital", 5001_u16),
            ("northern_capital", 5002),
            ("village_1", 5003),
            ("village_2", 5004),
            ("village_3", 5005),
            ("village_4", 5006),
            ("village_5", 5007),
            ("village_6", 5008),
        ];
        Self(
            stock
                .into_iter()
                .map(|(id, port)| (LocationId::from(id), format!("http://localhost:{port}")))
                .collect(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_covers_the_stock_map() {
        let roster = Roster::default();
        assert_eq!(roster.len(), 8);
        assert_eq!(
            roster.url_of(&LocationId::from("southern_capital")).unwrap(),
            "http://localhost:5001"
        );
        assert_eq!(
            roster.url_of(&LocationId::from("village_6")).unwrap(),
            "http://localhost:5008"
        );
    }

    #[test]
    fn unknown_location_resolves_to_none() {
        let roster = Roster::default();
        assert!(roster.url_of(&LocationId::from("atlantis")).is_none());
    }

    #[test]
    fn roster_deserializes_as_a_plain_map() {
        let roster: Roster = serde_json::from_value(serde_json::json!({
            "village_1": "http://village-1.game.svc:5000"
        }))
        .unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(
            roster.url_of(&LocationId::from("village_1")).unwrap(),
            "http://village-1.game.svc:5000"
        );
    }
}
