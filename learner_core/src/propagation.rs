//! Propagation Engine - credits prerequisite mastery onto dependent concepts.
//!
//! Each invocation walks the curriculum's dependency edges once, in declaration
//! order, folding every edge into a new snapshot that the next edge reads:
//! 1. **Eligibility**: both endpoints have state and the source is mastered enough
//! 2. **Influence**: source mastery scaled by the edge strength
//! 3. **Capping**: never more than the global cap, never past full mastery
//!
//! Effects travel one hop per call. Chains need repeated calls.

use serde::{Deserialize, Serialize};

use curriculum::{ConceptDependency, ValidatedCurriculum};

use crate::state::{LearnerState, LearningEvent, LearningEventKind, MetricDelta, Timestamp};

/// Configuration for mastery propagation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationConfig {
    /// Source mastery below this propagates nothing.
    pub min_source_mastery: f64,

    /// Influence multiplier for strengths 1, 2 and 3.
    pub strength_multipliers: [f64; 3],

    /// Hard cap on a single edge's contribution.
    pub max_delta: f64,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            min_source_mastery: 0.4,
            strength_multipliers: [0.05, 0.10, 0.15],
            max_delta: 0.15,
        }
    }
}

impl PropagationConfig {
    /// Multiplier for an edge strength. Anything but 2 or 3 uses the weakest.
    pub fn multiplier(&self, strength: u8) -> f64 {
        match strength {
            3 => self.strength_multipliers[2],
            2 => self.strength_multipliers[1],
            _ => self.strength_multipliers[0],
        }
    }
}

/// Spreads mastery one hop along dependency edges.
#[derive(Debug, Clone, Default)]
pub struct PropagationEngine {
    config: PropagationConfig,
}

impl PropagationEngine {
    pub fn new(config: PropagationConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(PropagationConfig::default())
    }

    pub fn config(&self) -> &PropagationConfig {
        &self.config
    }

    /// Apply every dependency edge once, in declaration order.
    pub fn propagate(
        &self,
        learner: &LearnerState,
        curriculum: &ValidatedCurriculum,
        now: Timestamp,
    ) -> LearnerState {
        curriculum
            .dependencies()
            .iter()
            .fold(learner.clone(), |state, dependency| {
                self.apply_edge(&state, dependency, now).unwrap_or(state)
            })
    }

    /// Mastery the edge would add to its target, if any.
    pub fn edge_delta(
        &self,
        learner: &LearnerState,
        dependency: &ConceptDependency,
    ) -> Option<f64> {
        let from_mastery = learner.mastery_of(&dependency.from)?;
        let to_mastery = learner.mastery_of(&dependency.to)?;

        if from_mastery < self.config.min_source_mastery {
            return None;
        }

        let influence = from_mastery * self.config.multiplier(dependency.strength);
        let delta = influence.min(self.config.max_delta).min(1.0 - to_mastery);

        (delta > 0.0).then_some(delta)
    }

    /// New snapshot with one edge applied, or `None` when the edge is a no-op.
    fn apply_edge(
        &self,
        learner: &LearnerState,
        dependency: &ConceptDependency,
        now: Timestamp,
    ) -> Option<LearnerState> {
        let delta = self.edge_delta(learner, dependency)?;
        let mut target = learner.concept(&dependency.to)?.clone();

        target.metrics = target.metrics.apply(&MetricDelta::mastery(delta));
        target.history.push(
            LearningEvent::new(LearningEventKind::Reinforced, now)
                .with_delta(MetricDelta::mastery(delta))
                .with_evidence(format!("Propagated from {}", dependency.from)),
        );

        tracing::debug!(
            learner = %learner.learner_id,
            from = %dependency.from,
            to = %dependency.to,
            strength = dependency.strength,
            delta,
            "Propagated mastery"
        );

        Some(learner.with_concept(target, now))
    }
}

/// Propagate with the default configuration.
pub fn propagate(
    learner: &LearnerState,
    curriculum: &ValidatedCurriculum,
    now: Timestamp,
) -> LearnerState {
    PropagationEngine::with_defaults().propagate(learner, curriculum, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CognitiveMetrics, ConceptLearningState};
    use chrono::{TimeZone, Utc};
    use curriculum::{validate, ConceptCurriculum, ConceptNode};
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    fn node(id: &str) -> ConceptNode {
        ConceptNode::new(id, id).with_outcome("o")
    }

    fn chain(strength_ab: u8, strength_bc: u8) -> ValidatedCurriculum {
        validate(
            ConceptCurriculum::new("chain", "science", "1.0.0")
                .with_concept(node("a"))
                .with_concept(node("b"))
                .with_concept(node("c"))
                .with_dependency(ConceptDependency::new("a", "b", strength_ab, "r"))
                .with_dependency(ConceptDependency::new("b", "c", strength_bc, "r")),
        )
        .unwrap()
    }

    fn learner_with(masteries: &[(&str, f64)]) -> LearnerState {
        masteries
            .iter()
            .fold(LearnerState::new("learner-1", now()), |learner, (id, mastery)| {
                learner.with_concept(
                    ConceptLearningState::introduce(*id, now())
                        .with_metrics(CognitiveMetrics::new(*mastery, 0.3, 0.1)),
                    now(),
                )
            })
    }

    #[test]
    fn test_strength_multipliers() {
        for (strength, expected) in [(1, 0.04), (2, 0.08), (3, 0.12)] {
            let learner = learner_with(&[("a", 0.8), ("b", 0.0)]);
            let next = propagate(&learner, &chain(strength, 1), now());
            assert!((next.mastery_of("b").unwrap() - expected).abs() < EPS);
        }
    }

    #[test]
    fn test_global_cap() {
        let config = PropagationConfig {
            strength_multipliers: [0.05, 0.10, 0.5],
            ..PropagationConfig::default()
        };
        let learner = learner_with(&[("a", 1.0), ("b", 0.0)]);
        let next = PropagationEngine::new(config).propagate(&learner, &chain(3, 1), now());
        assert!((next.mastery_of("b").unwrap() - 0.15).abs() < EPS);
    }

    #[test]
    fn test_never_exceeds_full_mastery() {
        let learner = learner_with(&[("a", 1.0), ("b", 0.95)]);
        let next = propagate(&learner, &chain(3, 1), now());
        assert!((next.mastery_of("b").unwrap() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_weak_source_is_skipped() {
        let learner = learner_with(&[("a", 0.39), ("b", 0.0)]);
        let next = propagate(&learner, &chain(3, 1), now());

        assert_eq!(next.mastery_of("b"), Some(0.0));
        assert_eq!(next.concept("b").unwrap().history.len(), 1);
    }

    #[test]
    fn test_missing_endpoint_is_skipped() {
        let learner = learner_with(&[("a", 0.9)]);
        let next = propagate(&learner, &chain(3, 1), now());

        assert!(!next.knows("b"));
        assert_eq!(next, learner);
    }

    #[test]
    fn test_saturated_target_is_noop() {
        let learner = learner_with(&[("a", 0.9), ("b", 1.0)]);
        let next = propagate(&learner, &chain(3, 1), now());

        assert_eq!(next.concept("b").unwrap().history.len(), 1);
    }

    #[test]
    fn test_history_entry() {
        let learner = learner_with(&[("a", 0.8), ("b", 0.0)]);
        let next = propagate(&learner, &chain(2, 1), now());
        let event = next.concept("b").unwrap().last_event().unwrap();

        assert_eq!(event.kind, LearningEventKind::Reinforced);
        assert_eq!(event.evidence.as_deref(), Some("Propagated from a"));
        assert!((event.delta.unwrap().mastery - 0.08).abs() < EPS);
    }

    #[test]
    fn test_sequential_fold_sees_earlier_edges() {
        // b starts at 0.35; a -> b lifts it to 0.47, so b -> c is eligible in the same pass.
        let learner = learner_with(&[("a", 0.8), ("b", 0.35), ("c", 0.0)]);
        let next = propagate(&learner, &chain(3, 1), now());

        assert!((next.mastery_of("b").unwrap() - 0.47).abs() < EPS);
        assert!((next.mastery_of("c").unwrap() - 0.47 * 0.05).abs() < EPS);
    }

    #[test]
    fn test_one_hop_only_per_call() {
        // Declaration order c-edge first: b is not yet eligible when b -> c runs.
        let curriculum = validate(
            ConceptCurriculum::new("chain", "science", "1.0.0")
                .with_concept(node("a"))
                .with_concept(node("b"))
                .with_concept(node("c"))
                .with_dependency(ConceptDependency::new("b", "c", 3, "r"))
                .with_dependency(ConceptDependency::new("a", "b", 3, "r")),
        )
        .unwrap();

        let learner = learner_with(&[("a", 0.8), ("b", 0.35), ("c", 0.0)]);
        let next = propagate(&learner, &curriculum, now());

        assert_eq!(next.mastery_of("c"), Some(0.0));
        assert!((next.mastery_of("b").unwrap() - 0.47).abs() < EPS);
    }

    #[test]
    fn test_original_snapshot_untouched() {
        let learner = learner_with(&[("a", 0.8), ("b", 0.0)]);
        let _ = propagate(&learner, &chain(2, 1), now());
        assert_eq!(learner.mastery_of("b"), Some(0.0));
    }

    #[test]
    fn test_repeated_passes_converge() {
        let curriculum = chain(3, 1);
        let mut learner = learner_with(&[("a", 1.0), ("b", 0.0)]);
        let mut last_gain = f64::MAX;

        for _ in 0..20 {
            let before = learner.mastery_of("b").unwrap();
            learner = propagate(&learner, &curriculum, now());
            let gain = learner.mastery_of("b").unwrap() - before;
            assert!(gain <= last_gain + EPS);
            last_gain = gain;
        }

        assert!((learner.mastery_of("b").unwrap() - 1.0).abs() < EPS);
        assert!(last_gain.abs() < EPS);
    }

    proptest! {
        #[test]
        fn propagation_stays_within_bounds(
            a in 0.0f64..=1.0,
            b in 0.0f64..=1.0,
            c in 0.0f64..=1.0,
            s1 in 1u8..=3,
            s2 in 1u8..=3,
        ) {
            let learner = learner_with(&[("a", a), ("b", b), ("c", c)]);
            let next = propagate(&learner, &chain(s1, s2), now());

            for id in ["a", "b", "c"] {
                let before = learner.mastery_of(id).unwrap();
                let after = next.mastery_of(id).unwrap();
                prop_assert!(after >= before);
                prop_assert!(after <= 1.0);
                prop_assert!(after - before <= 0.15 + EPS);
            }
        }
    }
}
