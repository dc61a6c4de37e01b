//! Alignment Engine - maps extracted concepts onto canonical curriculum nodes.
//!
//! For every extracted concept the engine walks the curriculum in declaration
//! order and evaluates the rule cascade against each node:
//! 1. **Exact id**: the proposed id equals the node id
//! 2. **Normalized title**: titles are equal after normalization
//! 3. **Explanation overlap**: grounded explanation shares enough words with the
//!    node description and does not contradict the node's kind
//!
//! The first node that satisfies any rule wins. There is no global matching;
//! ties are broken by declaration order. Concepts nothing matches are rejected,
//! never raised as errors.

mod rules;

pub use rules::*;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::concept::ConceptId;
use crate::graph::ValidatedCurriculum;

/// Candidate concept proposed by upstream ingestion. Untrusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedConcept {
    pub id: String,
    pub title: String,
    pub explanation: String,

    /// Indices of the raw text blocks the concept came from. Only the count is used.
    #[serde(default, alias = "sourceBlocks")]
    pub source_blocks: Vec<usize>,
}

impl ExtractedConcept {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            explanation: explanation.into(),
            source_blocks: Vec::new(),
        }
    }

    pub fn with_source_blocks(mut self, blocks: impl IntoIterator<Item = usize>) -> Self {
        self.source_blocks.extend(blocks);
        self
    }

    /// Whether the concept points back at any source text.
    pub fn is_grounded(&self) -> bool {
        !self.source_blocks.is_empty()
    }
}

/// Why an extracted concept was not aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// No source blocks back the concept.
    Ungrounded,
    /// Grounded, but no curriculum node corresponds to it.
    NoCorrespondingConcept,
}

impl RejectionReason {
    pub fn rationale(&self) -> &'static str {
        match self {
            RejectionReason::Ungrounded => "Extracted concept lacks textual grounding.",
            RejectionReason::NoCorrespondingConcept => {
                "No curriculum concept corresponds to the extracted idea."
            }
        }
    }
}

/// Outcome of aligning one extracted concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AlignmentDecision {
    Aligned {
        extracted_concept_id: String,
        curriculum_concept_id: ConceptId,
        rule: AlignmentRule,
        rationale: String,
    },
    Rejected {
        extracted_concept_id: String,
        reason: RejectionReason,
        rationale: String,
    },
}

impl AlignmentDecision {
    pub fn extracted_concept_id(&self) -> &str {
        match self {
            AlignmentDecision::Aligned {
                extracted_concept_id,
                ..
            }
            | AlignmentDecision::Rejected {
                extracted_concept_id,
                ..
            } => extracted_concept_id,
        }
    }

    /// The matched curriculum concept, if aligned.
    pub fn curriculum_concept_id(&self) -> Option<&str> {
        match self {
            AlignmentDecision::Aligned {
                curriculum_concept_id,
                ..
            } => Some(curriculum_concept_id),
            AlignmentDecision::Rejected { .. } => None,
        }
    }

    pub fn rationale(&self) -> &str {
        match self {
            AlignmentDecision::Aligned { rationale, .. }
            | AlignmentDecision::Rejected { rationale, .. } => rationale,
        }
    }

    pub fn is_aligned(&self) -> bool {
        matches!(self, AlignmentDecision::Aligned { .. })
    }
}

/// Which curriculum concepts the extracted set touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Coverage {
    /// Concepts with at least one aligned decision, in declaration order.
    pub covered: Vec<ConceptId>,
    /// Concepts with none, in declaration order.
    pub missing: Vec<ConceptId>,
}

impl Coverage {
    /// Fraction of curriculum concepts covered (0.0 for an empty curriculum).
    pub fn ratio(&self) -> f64 {
        let total = self.covered.len() + self.missing.len();
        if total == 0 {
            0.0
        } else {
            self.covered.len() as f64 / total as f64
        }
    }
}

/// Result of aligning a batch of extracted concepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AlignmentReport {
    /// One decision per extracted concept, in input order.
    pub decisions: Vec<AlignmentDecision>,
    pub coverage: Coverage,
}

impl AlignmentReport {
    /// Iterate over aligned decisions only.
    pub fn aligned(&self) -> impl Iterator<Item = &AlignmentDecision> {
        self.decisions.iter().filter(|d| d.is_aligned())
    }

    pub fn rejected_count(&self) -> usize {
        self.decisions.iter().filter(|d| !d.is_aligned()).count()
    }

    /// Decision for a given extracted concept id (first occurrence).
    pub fn decision_for(&self, extracted_id: &str) -> Option<&AlignmentDecision> {
        self.decisions
            .iter()
            .find(|d| d.extracted_concept_id() == extracted_id)
    }
}

/// Configuration for the alignment cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Minimum keyword overlap for the explanation rule.
    pub min_overlap: f64,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self { min_overlap: 0.6 }
    }
}

/// Applies the alignment cascade.
#[derive(Debug, Clone, Default)]
pub struct AlignmentEngine {
    config: AlignmentConfig,
}

impl AlignmentEngine {
    pub fn new(config: AlignmentConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(AlignmentConfig::default())
    }

    pub fn config(&self) -> &AlignmentConfig {
        &self.config
    }

    /// Align every extracted concept and compute curriculum coverage.
    pub fn align(
        &self,
        extracted: &[ExtractedConcept],
        curriculum: &ValidatedCurriculum,
    ) -> AlignmentReport {
        let decisions: Vec<_> = extracted
            .iter()
            .map(|concept| self.align_one(concept, curriculum))
            .collect();

        let covered_ids: HashSet<&str> = decisions
            .iter()
            .filter_map(AlignmentDecision::curriculum_concept_id)
            .collect();

        let mut coverage = Coverage::default();
        for id in curriculum.concept_ids() {
            if covered_ids.contains(id.as_str()) {
                coverage.covered.push(id.clone());
            } else {
                coverage.missing.push(id.clone());
            }
        }

        AlignmentReport {
            decisions,
            coverage,
        }
    }

    /// Align a single extracted concept.
    pub fn align_one(
        &self,
        concept: &ExtractedConcept,
        curriculum: &ValidatedCurriculum,
    ) -> AlignmentDecision {
        for node in curriculum.concepts() {
            let matched = AlignmentRule::CASCADE
                .iter()
                .find(|rule| rule.matches(concept, node, &self.config));

            if let Some(rule) = matched {
                tracing::debug!(
                    extracted = %concept.id,
                    concept = %node.id,
                    rule = ?rule,
                    "Aligned extracted concept"
                );
                return AlignmentDecision::Aligned {
                    extracted_concept_id: concept.id.clone(),
                    curriculum_concept_id: node.id.clone(),
                    rule: *rule,
                    rationale: rule.rationale().to_string(),
                };
            }
        }

        let reason = if concept.is_grounded() {
            RejectionReason::NoCorrespondingConcept
        } else {
            RejectionReason::Ungrounded
        };

        tracing::debug!(extracted = %concept.id, reason = ?reason, "Rejected extracted concept");

        AlignmentDecision::Rejected {
            extracted_concept_id: concept.id.clone(),
            reason,
            rationale: reason.rationale().to_string(),
        }
    }
}

/// Align with the default configuration.
pub fn align(extracted: &[ExtractedConcept], curriculum: &ValidatedCurriculum) -> AlignmentReport {
    AlignmentEngine::with_defaults().align(extracted, curriculum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::grade6_science;
    use crate::concept::{ConceptKind, ConceptNode};
    use crate::graph::ConceptCurriculum;
    use crate::validation::validate;

    fn science() -> ValidatedCurriculum {
        grade6_science().unwrap()
    }

    #[test]
    fn test_exact_id_match() {
        let extracted = vec![ExtractedConcept::new(
            "curiosity",
            "Something Else Entirely",
            "unrelated words",
        )];

        let report = align(&extracted, &science());
        let decision = &report.decisions[0];

        assert_eq!(decision.curriculum_concept_id(), Some("curiosity"));
        assert!(matches!(
            decision,
            AlignmentDecision::Aligned {
                rule: AlignmentRule::ExactId,
                ..
            }
        ));
    }

    #[test]
    fn test_id_beats_title_on_same_node() {
        let extracted = vec![ExtractedConcept::new(
            "curiosity",
            "Curiosity in Science",
            "Science begins with curiosity",
        )
        .with_source_blocks([0, 1])];

        let report = align(&extracted, &science());

        match &report.decisions[0] {
            AlignmentDecision::Aligned {
                rule, rationale, ..
            } => {
                assert_eq!(*rule, AlignmentRule::ExactId);
                assert!(rationale.contains("id"));
            }
            other => panic!("expected alignment, got {other:?}"),
        }
    }

    #[test]
    fn test_normalized_title_match() {
        let extracted = vec![ExtractedConcept::new(
            "method",
            "  scientific   METHOD!! ",
            "The scientific method is a step by step process used to solve problems.",
        )
        .with_source_blocks([2, 3])];

        let report = align(&extracted, &science());
        assert!(matches!(
            &report.decisions[0],
            AlignmentDecision::Aligned {
                curriculum_concept_id,
                rule: AlignmentRule::NormalizedTitle,
                ..
            } if curriculum_concept_id == "scientific_method"
        ));
    }

    #[test]
    fn test_explanation_overlap_match() {
        // Every explanation word appears in the curriculum description.
        let extracted = vec![ExtractedConcept::new(
            "x1",
            "Investigating",
            "a structured process to investigate questions",
        )
        .with_source_blocks([4])];

        let report = align(&extracted, &science());
        assert!(matches!(
            &report.decisions[0],
            AlignmentDecision::Aligned {
                curriculum_concept_id,
                rule: AlignmentRule::ExplanationOverlap,
                ..
            } if curriculum_concept_id == "scientific_method"
        ));
    }

    #[test]
    fn test_ungrounded_concept_rejected_despite_overlap() {
        let extracted = vec![ExtractedConcept::new(
            "x1",
            "Investigating",
            "a structured process to investigate questions scientifically",
        )];

        let report = align(&extracted, &science());
        match &report.decisions[0] {
            AlignmentDecision::Rejected {
                reason, rationale, ..
            } => {
                assert_eq!(*reason, RejectionReason::Ungrounded);
                assert!(rationale.contains("grounding"));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_grounded_unmatched_concept_rejected() {
        let extracted = vec![ExtractedConcept::new(
            "unknown_concept",
            "Fun Science Facts",
            "This paragraph talks about interesting but unrelated science trivia.",
        )
        .with_source_blocks([5])];

        let report = align(&extracted, &science());
        assert!(matches!(
            &report.decisions[0],
            AlignmentDecision::Rejected {
                reason: RejectionReason::NoCorrespondingConcept,
                ..
            }
        ));
        assert_eq!(report.rejected_count(), 1);
    }

    #[test]
    fn test_procedural_guard_blocks_overlap() {
        // High overlap but no procedural trigger word.
        let extracted = vec![ExtractedConcept::new(
            "x1",
            "Investigating",
            "a structured way to investigate questions",
        )
        .with_source_blocks([1])];

        let curriculum = validate(
            ConceptCurriculum::new("c", "science", "1")
                .with_concept(
                    ConceptNode::new("inquiry", "Inquiry")
                        .with_description("a structured way to investigate questions")
                        .with_kind(ConceptKind::Procedural)
                        .with_outcome("o"),
                ),
        )
        .unwrap();

        let report = align(&extracted, &curriculum);
        assert!(!report.decisions[0].is_aligned());
    }

    #[test]
    fn test_disposition_guard_blocks_overlap() {
        let extracted = vec![ExtractedConcept::new(
            "x1",
            "Wonder",
            "wonder is the method of science",
        )
        .with_source_blocks([1])];

        let curriculum = validate(
            ConceptCurriculum::new("c", "science", "1").with_concept(
                ConceptNode::new("wonder", "Sense of Wonder")
                    .with_description("wonder is the method of science")
                    .with_kind(ConceptKind::Disposition)
                    .with_outcome("o"),
            ),
        )
        .unwrap();

        let report = align(&extracted, &curriculum);
        assert!(!report.decisions[0].is_aligned());
    }

    #[test]
    fn test_declaration_order_breaks_ties() {
        let curriculum = validate(
            ConceptCurriculum::new("c", "science", "1")
                .with_concept(ConceptNode::new("first", "Shared Title").with_outcome("o"))
                .with_concept(ConceptNode::new("second", "Shared Title").with_outcome("o")),
        )
        .unwrap();

        let extracted = vec![ExtractedConcept::new("x", "shared title", "")];
        let report = align(&extracted, &curriculum);
        assert_eq!(report.decisions[0].curriculum_concept_id(), Some("first"));
    }

    #[test]
    fn test_coverage_counts_each_concept_once() {
        let extracted = vec![
            ExtractedConcept::new("curiosity", "Curiosity", ""),
            ExtractedConcept::new("again", "Curiosity in Science", ""),
            ExtractedConcept::new("nothing", "Nothing", "").with_source_blocks([9]),
        ];

        let report = align(&extracted, &science());

        assert_eq!(report.decisions.len(), 3);
        assert_eq!(report.aligned().count(), 2);
        assert_eq!(report.coverage.covered, vec!["curiosity".to_string()]);
        assert_eq!(report.coverage.missing, vec!["scientific_method".to_string()]);
        assert!((report.coverage.ratio() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_decisions_keep_input_order() {
        let extracted = vec![
            ExtractedConcept::new("b", "B", ""),
            ExtractedConcept::new("scientific_method", "", ""),
            ExtractedConcept::new("a", "A", ""),
        ];

        let report = align(&extracted, &science());
        let ids: Vec<_> = report
            .decisions
            .iter()
            .map(|d| d.extracted_concept_id())
            .collect();
        assert_eq!(ids, vec!["b", "scientific_method", "a"]);

        let decision = report.decision_for("scientific_method").unwrap();
        assert_eq!(decision.curriculum_concept_id(), Some("scientific_method"));
    }

    #[test]
    fn test_camel_case_source_blocks_accepted() {
        let json = r#"{"id":"c","title":"T","explanation":"E","sourceBlocks":[0,1]}"#;
        let concept: ExtractedConcept = serde_json::from_str(json).unwrap();
        assert_eq!(concept.source_blocks, vec![0, 1]);
    }

    #[test]
    fn test_custom_overlap_threshold() {
        let engine = AlignmentEngine::new(AlignmentConfig { min_overlap: 0.99 });
        // 5 of 6 words overlap: enough for the default, not for 0.99.
        let extracted = vec![ExtractedConcept::new(
            "x1",
            "Investigating",
            "a structured process to investigate puzzles",
        )
        .with_source_blocks([1])];

        assert!(!engine.align(&extracted, &science()).decisions[0].is_aligned());
        assert!(align(&extracted, &science()).decisions[0].is_aligned());
    }
}
