//! Rule evaluators for the alignment cascade.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{AlignmentConfig, ExtractedConcept};
use crate::concept::{ConceptKind, ConceptNode};

/// Words an explanation must contain to align with a procedural concept.
const PROCEDURAL_TRIGGERS: &[&str] = &["step", "first", "then", "next", "process"];

/// Words that disqualify an explanation from aligning with a disposition.
const PROCEDURE_VOCABULARY: &[&str] = &["step", "procedure", "method"];

/// The alignment rules, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentRule {
    ExactId,
    NormalizedTitle,
    ExplanationOverlap,
}

impl AlignmentRule {
    /// Evaluation order. The first rule that matches a node decides.
    pub const CASCADE: [AlignmentRule; 3] = [
        AlignmentRule::ExactId,
        AlignmentRule::NormalizedTitle,
        AlignmentRule::ExplanationOverlap,
    ];

    pub fn matches(
        &self,
        extracted: &ExtractedConcept,
        node: &ConceptNode,
        config: &AlignmentConfig,
    ) -> bool {
        match self {
            AlignmentRule::ExactId => extracted.id == node.id,
            AlignmentRule::NormalizedTitle => normalize(&extracted.title) == normalize(&node.title),
            AlignmentRule::ExplanationOverlap => {
                extracted.is_grounded()
                    && keyword_overlap(&extracted.explanation, &node.description)
                        >= config.min_overlap
                    && !violates_kind(&extracted.explanation, node.kind)
            }
        }
    }

    pub fn rationale(&self) -> &'static str {
        match self {
            AlignmentRule::ExactId => "Proposed concept id matches curriculum concept id.",
            AlignmentRule::NormalizedTitle => {
                "Extracted title matches curriculum concept title after normalization."
            }
            AlignmentRule::ExplanationOverlap => {
                "Extracted explanation strongly overlaps with curriculum description."
            }
        }
    }
}

/// Lower-case, drop punctuation, collapse whitespace.
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Distinct words of the normalized text.
pub fn word_set(text: &str) -> HashSet<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Share of the explanation's distinct words that also occur in the description.
pub fn keyword_overlap(explanation: &str, description: &str) -> f64 {
    let explanation_words = word_set(explanation);
    if explanation_words.is_empty() {
        return 0.0;
    }

    let description_words = word_set(description);
    let shared = explanation_words
        .iter()
        .filter(|w| description_words.contains(*w))
        .count();

    shared as f64 / explanation_words.len() as f64
}

/// Whether the explanation's wording contradicts the node's kind.
pub fn violates_kind(explanation: &str, kind: ConceptKind) -> bool {
    let lowered = explanation.to_lowercase();
    let mentions = |vocabulary: &[&str]| vocabulary.iter().any(|w| lowered.contains(w));

    match kind {
        ConceptKind::Procedural => !mentions(PROCEDURAL_TRIGGERS),
        ConceptKind::Disposition => mentions(PROCEDURE_VOCABULARY),
        _ => false,
    }
}
