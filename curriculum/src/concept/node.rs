//! Concept nodes - the vertices of the curriculum graph.

use serde::{Deserialize, Serialize};

use super::{
    BloomLevel, CompletionBehavior, ConceptId, ConceptKind, LearningBand, MasteryCriteria,
    ReinforcementStrategy,
};

/// A single teachable unit of the curriculum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptNode {
    pub id: ConceptId,
    pub title: String,
    pub description: String,

    pub kind: ConceptKind,

    /// Difficulty from 1 (introductory) to 5.
    pub difficulty: u8,

    /// What the learner should be able to do. Must not be empty.
    pub learning_outcomes: Vec<String>,

    pub completion_behavior: CompletionBehavior,

    #[serde(default)]
    pub reinforcement: ReinforcementStrategy,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub learning_bands: Vec<LearningBand>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mastery_criteria: Option<MasteryCriteria>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bloom_level: Option<BloomLevel>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common_misconceptions: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub canonical_examples: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Curriculum version that introduced this concept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduced_in: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated_in: Option<String>,
}

impl ConceptNode {
    /// Create a conceptual node with difficulty 1 and finite completion.
    ///
    /// Learning outcomes start empty; add them before validation.
    pub fn new(id: impl Into<ConceptId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            kind: ConceptKind::Conceptual,
            difficulty: 1,
            learning_outcomes: Vec::new(),
            completion_behavior: CompletionBehavior::Finite,
            reinforcement: ReinforcementStrategy::None,
            learning_bands: Vec::new(),
            mastery_criteria: None,
            bloom_level: None,
            common_misconceptions: Vec::new(),
            canonical_examples: Vec::new(),
            tags: Vec::new(),
            introduced_in: None,
            deprecated_in: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the kind together with the completion behavior it requires.
    pub fn with_kind(mut self, kind: ConceptKind) -> Self {
        self.kind = kind;
        self.completion_behavior = match kind {
            ConceptKind::Disposition => CompletionBehavior::ReinforceForever,
            ConceptKind::Procedural => CompletionBehavior::Finite,
            _ => self.completion_behavior,
        };
        self
    }

    /// Override the completion behavior without touching the kind.
    pub fn with_completion(mut self, behavior: CompletionBehavior) -> Self {
        self.completion_behavior = behavior;
        self
    }

    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.learning_outcomes.push(outcome.into());
        self
    }

    pub fn with_outcomes(mut self, outcomes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.learning_outcomes.extend(outcomes.into_iter().map(Into::into));
        self
    }

    pub fn with_reinforcement(mut self, strategy: ReinforcementStrategy) -> Self {
        self.reinforcement = strategy;
        self
    }

    pub fn with_band(mut self, band: LearningBand) -> Self {
        self.learning_bands.push(band);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Whether this concept should keep being reinforced after mastery.
    pub fn reinforces_forever(&self) -> bool {
        self.completion_behavior == CompletionBehavior::ReinforceForever
    }

    /// Whether the kind/completion pairing is allowed.
    pub fn completion_matches_kind(&self) -> bool {
        match self.kind {
            ConceptKind::Disposition => {
                self.completion_behavior == CompletionBehavior::ReinforceForever
            }
            ConceptKind::Procedural => self.completion_behavior == CompletionBehavior::Finite,
            _ => true,
        }
    }
}
