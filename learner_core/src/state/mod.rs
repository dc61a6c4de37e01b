//! Learner state - per-learner, per-concept cognitive snapshots.
//!
//! Snapshots are values. Every transition builds a new [`LearnerState`] and
//! leaves the one it started from untouched, so callers can keep, compare or
//! persist any snapshot they were handed.

mod history;
mod metrics;

pub use history::*;
pub use metrics::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use curriculum::ConceptId;

/// Instant at which something happened to a learner.
pub type Timestamp = DateTime<Utc>;

/// Identifier of a learner, assigned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LearnerId(pub String);

impl LearnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Issue a fresh random id for a learner the caller is creating.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LearnerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LearnerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for LearnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What one learner knows about one concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptLearningState {
    pub concept_id: ConceptId,

    pub metrics: CognitiveMetrics,

    /// Number of non-misconception signals received. Never decreases.
    pub exposure_count: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_review_at: Option<Timestamp>,

    /// Recorded misconception labels. Append-only.
    #[serde(default)]
    pub misconceptions: Vec<String>,

    /// Audit trail. Append-only.
    #[serde(default)]
    pub history: Vec<LearningEvent>,
}

impl ConceptLearningState {
    /// A freshly introduced concept with initial metrics and an `introduced` entry.
    pub fn introduce(concept_id: impl Into<ConceptId>, now: Timestamp) -> Self {
        Self {
            concept_id: concept_id.into(),
            metrics: CognitiveMetrics::initial(),
            exposure_count: 0,
            last_seen_at: None,
            next_review_at: None,
            misconceptions: Vec::new(),
            history: vec![LearningEvent::new(LearningEventKind::Introduced, now)],
        }
    }

    /// Replace the metrics (clamped). Intended for restoring persisted state.
    pub fn with_metrics(mut self, metrics: CognitiveMetrics) -> Self {
        self.metrics = metrics.clamped();
        self
    }

    pub fn with_last_seen_at(mut self, at: Timestamp) -> Self {
        self.last_seen_at = Some(at);
        self
    }

    pub fn mastery(&self) -> f64 {
        self.metrics.mastery
    }

    pub fn has_misconceptions(&self) -> bool {
        !self.misconceptions.is_empty()
    }

    /// Most recent history entry.
    pub fn last_event(&self) -> Option<&LearningEvent> {
        self.history.last()
    }
}

/// Snapshot of everything known about one learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerState {
    pub learner_id: LearnerId,

    #[serde(default)]
    pub concepts: HashMap<ConceptId, ConceptLearningState>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl LearnerState {
    /// Create a learner with no concept state.
    pub fn new(learner_id: impl Into<LearnerId>, now: Timestamp) -> Self {
        Self {
            learner_id: learner_id.into(),
            concepts: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Get the state of a concept, if the learner has met it.
    pub fn concept(&self, id: &str) -> Option<&ConceptLearningState> {
        self.concepts.get(id)
    }

    pub fn mastery_of(&self, id: &str) -> Option<f64> {
        self.concept(id).map(ConceptLearningState::mastery)
    }

    pub fn knows(&self, id: &str) -> bool {
        self.concepts.contains_key(id)
    }

    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    /// New snapshot with `state` stored under its concept id.
    pub fn with_concept(&self, state: ConceptLearningState, now: Timestamp) -> Self {
        let mut next = self.clone();
        next.concepts.insert(state.concept_id.clone(), state);
        next.updated_at = now;
        next
    }
}
