//! Learning events - the append-only audit trail of a concept.

use serde::{Deserialize, Serialize};

use super::{MetricDelta, Timestamp};

/// Kinds of entries in a concept's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningEventKind {
    /// First contact; seeded when the state is created.
    Introduced,
    Exposed,
    Reinforced,
    Assessed,
    Mastered,
    Forgotten,
    /// A misconception was recorded.
    Remediated,
}

/// One entry of the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningEvent {
    pub timestamp: Timestamp,
    pub kind: LearningEventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<MetricDelta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl LearningEvent {
    pub fn new(kind: LearningEventKind, timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            kind,
            delta: None,
            evidence: None,
        }
    }

    pub fn with_delta(mut self, delta: MetricDelta) -> Self {
        self.delta = Some(delta);
        self
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }
}
