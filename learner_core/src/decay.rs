//! Forgetting model.
//!
//! Mastery decays exponentially with elapsed days. The rate shrinks as
//! stability grows and reaches zero at stability 1. Decay never raises mastery
//! and never drops it below zero.
//!
//! Nothing here runs on a timer; a scheduler outside the core decides when to
//! ask for decayed values.

use serde::{Deserialize, Serialize};

use crate::state::{clamp_unit, ConceptLearningState, Timestamp};

/// Milliseconds in one day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Decay rate per day at stability 0.
pub const BASE_DECAY_RATE: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    pub base_rate: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            base_rate: BASE_DECAY_RATE,
        }
    }
}

/// Pure decay computations.
#[derive(Debug, Clone, Default)]
pub struct DecayModel {
    config: DecayConfig,
}

impl DecayModel {
    pub fn new(config: DecayConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(DecayConfig::default())
    }

    /// Mastery after `elapsed_ms` milliseconds without practice.
    ///
    /// Negative elapsed time counts as none. A zero rate keeps mastery even after
    /// unbounded time.
    pub fn decay(&self, mastery: f64, stability: f64, elapsed_ms: f64) -> f64 {
        let days = elapsed_ms.max(0.0) / MS_PER_DAY;
        let rate = self.config.base_rate.max(0.0) * (1.0 - clamp_unit(stability));
        if rate == 0.0 {
            return mastery.max(0.0);
        }
        let decayed = mastery * (-rate * days).exp();

        decayed.max(0.0)
    }

    /// Mastery of `state` as it would stand at `now`, without changing the state.
    ///
    /// A concept that was never seen has nothing to decay from.
    pub fn projected_mastery(&self, state: &ConceptLearningState, now: Timestamp) -> f64 {
        match state.last_seen_at {
            Some(last_seen) => {
                let elapsed_ms = (now - last_seen).num_milliseconds() as f64;
                self.decay(state.metrics.mastery, state.metrics.stability, elapsed_ms)
            }
            None => state.metrics.mastery,
        }
    }
}

/// Decay with the default base rate.
pub fn decay(mastery: f64, stability: f64, elapsed_ms: f64) -> f64 {
    DecayModel::with_defaults().decay(mastery, stability, elapsed_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CognitiveMetrics;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    #[test]
    fn test_no_elapsed_time_keeps_mastery() {
        assert_eq!(decay(0.7, 0.2, 0.0), 0.7);
    }

    #[test]
    fn test_full_stability_stops_decay() {
        assert_eq!(decay(0.7, 1.0, 365.0 * MS_PER_DAY), 0.7);
    }

    #[test]
    fn test_full_stability_survives_unbounded_time() {
        assert_eq!(decay(0.7, 1.0, f64::INFINITY), 0.7);
        assert_eq!(decay(0.7, 0.5, f64::INFINITY), 0.0);
    }

    #[test]
    fn test_zero_base_rate_never_decays() {
        let model = DecayModel::new(DecayConfig { base_rate: 0.0 });
        assert_eq!(model.decay(0.4, 0.0, f64::INFINITY), 0.4);
    }

    #[test]
    fn test_ten_days_at_zero_stability() {
        // rate 0.05/day for 10 days -> e^-0.5
        let expected = 0.8 * (-0.5f64).exp();
        assert!((decay(0.8, 0.0, 10.0 * MS_PER_DAY) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_stability_slows_decay() {
        let fragile = decay(0.8, 0.1, 30.0 * MS_PER_DAY);
        let sturdy = decay(0.8, 0.9, 30.0 * MS_PER_DAY);
        assert!(sturdy > fragile);
    }

    #[test]
    fn test_negative_elapsed_is_ignored() {
        assert_eq!(decay(0.5, 0.0, -MS_PER_DAY), 0.5);
    }

    #[test]
    fn test_projected_mastery() {
        let seen = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let state = ConceptLearningState::introduce("c", seen)
            .with_metrics(CognitiveMetrics::new(0.8, 0.3, 0.0))
            .with_last_seen_at(seen);

        let model = DecayModel::with_defaults();
        let projected = model.projected_mastery(&state, seen + Duration::days(10));

        assert!((projected - 0.8 * (-0.5f64).exp()).abs() < 1e-12);
        assert_eq!(state.metrics.mastery, 0.8);
    }

    #[test]
    fn test_projected_mastery_without_last_seen() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let state = ConceptLearningState::introduce("c", now)
            .with_metrics(CognitiveMetrics::new(0.4, 0.3, 0.0));

        let projected =
            DecayModel::with_defaults().projected_mastery(&state, now + Duration::days(90));
        assert_eq!(projected, 0.4);
    }

    proptest! {
        #[test]
        fn decay_is_monotone_in_elapsed_time(
            mastery in 0.0f64..=1.0,
            stability in 0.0f64..=1.0,
            earlier in 0.0f64..1.0e11,
            extra in 0.0f64..1.0e11,
        ) {
            let first = decay(mastery, stability, earlier);
            let second = decay(mastery, stability, earlier + extra);
            prop_assert!(second <= first);
            prop_assert!(second >= 0.0);
            prop_assert!(first <= mastery);
        }

        #[test]
        fn full_stability_never_decays(mastery in 0.0f64..=1.0, elapsed in 0.0f64..1.0e12) {
            prop_assert_eq!(decay(mastery, 1.0, elapsed), mastery);
        }
    }
}
