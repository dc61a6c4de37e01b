//! Signal Engine - applies discrete learning events to a learner snapshot.
//!
//! | signal             | mastery | confidence | stability |
//! |--------------------|---------|------------|-----------|
//! | exposure           | +0.05   | +0.02      | 0         |
//! | reinforcement      | +0.03   | 0          | +0.10     |
//! | assessment success | +0.20   | +0.15      | +0.20     |
//! | assessment failure | -0.10   | -0.25      | 0         |
//!
//! Misconceptions leave the metrics alone and are recorded separately.

use serde::{Deserialize, Serialize};

use curriculum::ConceptNode;

use crate::state::{
    ConceptLearningState, LearnerState, LearningEvent, LearningEventKind, MetricDelta, Timestamp,
};

/// A discrete learning event for one concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LearningSignal {
    Exposure,
    Reinforcement,
    Assessment { success: bool },
    Misconception { label: String },
}

impl LearningSignal {
    pub fn assessment(success: bool) -> Self {
        LearningSignal::Assessment { success }
    }

    pub fn misconception(label: impl Into<String>) -> Self {
        LearningSignal::Misconception {
            label: label.into(),
        }
    }
}

/// Metric deltas per signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalDeltas {
    pub exposure: MetricDelta,
    pub reinforcement: MetricDelta,
    pub assessment_success: MetricDelta,
    pub assessment_failure: MetricDelta,
}

impl Default for SignalDeltas {
    fn default() -> Self {
        Self {
            exposure: MetricDelta::new(0.05, 0.02, 0.0),
            reinforcement: MetricDelta::new(0.03, 0.0, 0.10),
            assessment_success: MetricDelta::new(0.20, 0.15, 0.20),
            assessment_failure: MetricDelta::new(-0.10, -0.25, 0.0),
        }
    }
}

impl SignalDeltas {
    /// Delta and history entry kind for a metric-changing signal.
    ///
    /// Returns `None` for misconceptions, which do not change metrics.
    pub fn for_signal(&self, signal: &LearningSignal) -> Option<(MetricDelta, LearningEventKind)> {
        match signal {
            LearningSignal::Exposure => Some((self.exposure, LearningEventKind::Exposed)),
            LearningSignal::Reinforcement => {
                Some((self.reinforcement, LearningEventKind::Reinforced))
            }
            LearningSignal::Assessment { success: true } => {
                Some((self.assessment_success, LearningEventKind::Assessed))
            }
            LearningSignal::Assessment { success: false } => {
                Some((self.assessment_failure, LearningEventKind::Assessed))
            }
            LearningSignal::Misconception { .. } => None,
        }
    }
}

/// Applies learning signals.
#[derive(Debug, Clone, Default)]
pub struct SignalEngine {
    deltas: SignalDeltas,
}

impl SignalEngine {
    pub fn new(deltas: SignalDeltas) -> Self {
        Self { deltas }
    }

    pub fn with_defaults() -> Self {
        Self::new(SignalDeltas::default())
    }

    pub fn deltas(&self) -> &SignalDeltas {
        &self.deltas
    }

    /// Apply one signal and return the next snapshot.
    ///
    /// A concept the learner has never met is introduced first.
    pub fn apply(
        &self,
        learner: &LearnerState,
        concept: &ConceptNode,
        signal: &LearningSignal,
        now: Timestamp,
    ) -> LearnerState {
        let previous = learner
            .concept(&concept.id)
            .cloned()
            .unwrap_or_else(|| ConceptLearningState::introduce(concept.id.clone(), now));

        let next = if let LearningSignal::Misconception { label } = signal {
            record_misconception(previous, label, now)
        } else if let Some((delta, kind)) = self.deltas.for_signal(signal) {
            record_signal(previous, delta, kind, now)
        } else {
            previous
        };

        tracing::debug!(
            learner = %learner.learner_id,
            concept = %concept.id,
            signal = ?signal,
            mastery = next.metrics.mastery,
            confidence = next.metrics.confidence,
            stability = next.metrics.stability,
            "Applied learning signal"
        );

        learner.with_concept(next, now)
    }

    /// Apply signals in order, each seeing the effect of the previous one.
    pub fn apply_all<'a>(
        &self,
        learner: &LearnerState,
        concept: &ConceptNode,
        signals: impl IntoIterator<Item = &'a LearningSignal>,
        now: Timestamp,
    ) -> LearnerState {
        signals
            .into_iter()
            .fold(learner.clone(), |state, signal| self.apply(&state, concept, signal, now))
    }
}

fn record_signal(
    mut state: ConceptLearningState,
    delta: MetricDelta,
    kind: LearningEventKind,
    now: Timestamp,
) -> ConceptLearningState {
    state.metrics = state.metrics.apply(&delta);
    state.exposure_count = state.exposure_count.saturating_add(1);
    state.last_seen_at = Some(now);
    state.history.push(LearningEvent::new(kind, now).with_delta(delta));
    state
}

fn record_misconception(
    mut state: ConceptLearningState,
    label: &str,
    now: Timestamp,
) -> ConceptLearningState {
    state.misconceptions.push(label.to_string());
    state.history.push(
        LearningEvent::new(LearningEventKind::Remediated, now).with_evidence(label),
    );
    state
}

/// Apply a signal with the default deltas.
pub fn apply_signal(
    learner: &LearnerState,
    concept: &ConceptNode,
    signal: &LearningSignal,
    now: Timestamp,
) -> LearnerState {
    SignalEngine::with_defaults().apply(learner, concept, signal, now)
}
