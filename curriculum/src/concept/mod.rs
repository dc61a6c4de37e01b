//! Concept definitions - the teachable units of a curriculum.

mod node;

pub use node::*;

use serde::{Deserialize, Serialize};

/// Identifier of a concept node. Unique across a curriculum.
pub type ConceptId = String;

/// The nature of the knowledge a concept represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConceptKind {
    /// A habit of mind (curiosity, skepticism). Never "finished".
    Disposition,
    Conceptual,
    /// A method with discrete steps.
    Procedural,
    Factual,
}

impl ConceptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConceptKind::Disposition => "disposition",
            ConceptKind::Conceptual => "conceptual",
            ConceptKind::Procedural => "procedural",
            ConceptKind::Factual => "factual",
        }
    }
}

impl std::fmt::Display for ConceptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a concept can be completed or must be revisited indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionBehavior {
    Finite,
    ReinforceForever,
}

impl CompletionBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionBehavior::Finite => "finite",
            CompletionBehavior::ReinforceForever => "reinforce_forever",
        }
    }
}

impl std::fmt::Display for CompletionBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a concept is revisited once introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReinforcementStrategy {
    #[default]
    None,
    Spaced,
    Contextual,
}

/// Age/stage bands a concept applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningBand {
    Early,
    Primary,
    Middle,
    Secondary,
    Advanced,
}

/// Bloom's taxonomy level targeted by a concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BloomLevel {
    Remember,
    Understand,
    Apply,
    Analyze,
    Evaluate,
}

/// How mastery of a concept is assessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStyle {
    Conceptual,
    Procedural,
    Reflective,
}

/// Optional criteria describing when a concept counts as mastered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryCriteria {
    pub required_outcomes: u32,
    pub assessment_style: AssessmentStyle,
}
