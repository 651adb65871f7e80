//! Tunable analysis and pacing constants.
//!
//! Threat radius, attack ratios, and surplus gating have no single
//! correct value, so all of them are configuration with defaults
//! rather than contractual constants. The defaults are tuned for the
//! stock eight-location map, whose positions are percentage
//! coordinates in 0..=100.

use serde::Deserialize;

/// Errors produced when validating engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A numeric field has a value outside its allowed range.
    #[error("invalid engine config: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Tunable constants for threat analysis, opportunity scoring, the
/// situational weight gates, and cycle pacing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Radius (in map units) within which an enemy army threatens an
    /// owned location.
    pub threat_radius: f64,

    /// An enemy location is attackable when some owned location's army
    /// is at least this multiple of the target's.
    pub attack_ratio: f64,

    /// Penalty subtracted from an opportunity's value score per map
    /// unit of distance.
    pub distance_penalty: f64,

    /// Resource total that counts as "one full surplus" when scaling
    /// the collect/build/transfer weights.
    pub surplus_reference: u64,

    /// Shortest inter-cycle pause, in seconds.
    pub pause_min_secs: u64,

    /// Longest inter-cycle pause, in seconds.
    pub pause_max_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threat_radius: 40.0,
            attack_ratio: 1.5,
            distance_penalty: 1.0,
            surplus_reference: 100,
            pause_min_secs: 15,
            pause_max_secs: 45,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if any field is out of range:
    /// non-positive radius or ratio, negative distance penalty, a zero
    /// surplus reference, or an empty or inverted pause window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threat_radius.is_finite() || self.threat_radius <= 0.0 {
            return Err(invalid("threat_radius must be positive and finite"));
        }
        if !self.attack_ratio.is_finite() || self.attack_ratio <= 0.0 {
            return Err(invalid("attack_ratio must be positive and finite"));
        }
        if !self.distance_penalty.is_finite() || self.distance_penalty < 0.0 {
            return Err(invalid("distance_penalty must be non-negative and finite"));
        }
        if self.surplus_reference == 0 {
            return Err(invalid("surplus_reference must be at least 1"));
        }
        if self.pause_min_secs == 0 {
            return Err(invalid("pause_min_secs must be at least 1"));
        }
        if self.pause_max_secs < self.pause_min_secs {
            return Err(invalid("pause_max_secs must be >= pause_min_secs"));
        }
        Ok(())
    }
}

/// Shorthand for an [`ConfigError::Invalid`] with a static reason.
fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.to_owned(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn default_values_match_the_stock_map() {
        let cfg = EngineConfig::default();
        assert!((cfg.attack_ratio - 1.5).abs() < f64::EPSILON);
        assert_eq!(cfg.surplus_reference, 100);
        assert_eq!(cfg.pause_min_secs, 15);
        assert_eq!(cfg.pause_max_secs, 45);
    }

    #[test]
    fn rejects_inverted_pause_window() {
        let cfg = EngineConfig {
            pause_min_secs: 45,
            pause_max_secs: 15,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_radius() {
        let cfg = EngineConfig {
            threat_radius: 0.0,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_surplus_reference() {
        let cfg = EngineConfig {
            surplus_reference: 0,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_yaml_style_input_fills_defaults() {
        let cfg: EngineConfig = serde_json::from_value(serde_json::json!({
            "attack_ratio": 2.0
        }))
        .unwrap();
        assert!((cfg.attack_ratio - 2.0).abs() < f64::EPSILON);
        assert_eq!(cfg.pause_max_secs, 45);
    }
}
