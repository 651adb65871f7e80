//! Elapsed activation time to game phase.
//!
//! The phase clock is the engine's only notion of game progress. It is
//! a pure function of the time since the run was activated, so two
//! workers activated at different moments can be in different phases
//! while observing the same map.

use std::time::Duration;

use warmind_types::Phase;

/// Elapsed time at which the early game ends (exclusive upper bound).
pub const EARLY_UNTIL: Duration = Duration::from_secs(300);

/// Elapsed time at which the mid game ends (exclusive upper bound).
pub const MID_UNTIL: Duration = Duration::from_secs(900);

/// Classify elapsed activation time into a game phase.
///
/// Boundaries are half-open on the lower bound: exactly 300 s is
/// [`Phase::Mid`] and exactly 900 s is [`Phase::Late`].
pub fn phase_at(elapsed: Duration) -> Phase {
    if elapsed < EARLY_UNTIL {
        Phase::Early
    } else if elapsed < MID_UNTIL {
        Phase::Mid
    } else {
        Phase::Late
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_starts_early() {
        assert_eq!(phase_at(Duration::ZERO), Phase::Early);
    }

    #[test]
    fn boundaries_are_half_open() {
        assert_eq!(phase_at(Duration::from_secs(299)), Phase::Early);
        assert_eq!(phase_at(Duration::from_secs(300)), Phase::Mid);
        assert_eq!(phase_at(Duration::from_secs(899)), Phase::Mid);
        assert_eq!(phase_at(Duration::from_secs(900)), Phase::Late);
    }

    #[test]
    fn sub_second_precision_respects_the_boundary() {
        assert_eq!(phase_at(Duration::from_millis(299_999)), Phase::Early);
        assert_eq!(phase_at(Duration::from_millis(300_001)), Phase::Mid);
    }

    #[test]
    fn late_phase_has_no_upper_bound() {
        assert_eq!(phase_at(Duration::from_secs(86_400)), Phase::Late);
    }
}
