//! Cognitive metrics tracked per concept.

use serde::{Deserialize, Serialize};

/// Confidence a learner starts with on a newly introduced concept.
pub const INITIAL_CONFIDENCE: f64 = 0.3;

/// Stability a learner starts with on a newly introduced concept.
pub const INITIAL_STABILITY: f64 = 0.1;

/// Mastery, confidence and stability, each kept within 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CognitiveMetrics {
    /// Objective competence estimate.
    pub mastery: f64,
    /// Subjective belief estimate. Tracked for audit only.
    pub confidence: f64,
    /// Resistance to forgetting.
    pub stability: f64,
}

impl CognitiveMetrics {
    pub fn new(mastery: f64, confidence: f64, stability: f64) -> Self {
        Self {
            mastery,
            confidence,
            stability,
        }
        .clamped()
    }

    /// Metrics of a concept that was just introduced.
    pub fn initial() -> Self {
        Self {
            mastery: 0.0,
            confidence: INITIAL_CONFIDENCE,
            stability: INITIAL_STABILITY,
        }
    }

    /// Add a delta, then clamp every metric.
    pub fn apply(&self, delta: &MetricDelta) -> Self {
        Self {
            mastery: self.mastery + delta.mastery,
            confidence: self.confidence + delta.confidence,
            stability: self.stability + delta.stability,
        }
        .clamped()
    }

    pub fn clamped(self) -> Self {
        Self {
            mastery: clamp_unit(self.mastery),
            confidence: clamp_unit(self.confidence),
            stability: clamp_unit(self.stability),
        }
    }
}

impl Default for CognitiveMetrics {
    fn default() -> Self {
        Self::initial()
    }
}

/// Raw change requested for each metric, recorded before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MetricDelta {
    #[serde(default)]
    pub mastery: f64,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub stability: f64,
}

impl MetricDelta {
    pub const fn new(mastery: f64, confidence: f64, stability: f64) -> Self {
        Self {
            mastery,
            confidence,
            stability,
        }
    }

    /// A change to mastery only.
    pub const fn mastery(mastery: f64) -> Self {
        Self::new(mastery, 0.0, 0.0)
    }
}

/// Clamp into the unit interval. NaN collapses to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
