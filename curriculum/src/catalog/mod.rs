//! Built-in curricula shipped with the crate.

use crate::graph::ValidatedCurriculum;
use crate::loader::{from_toml_str, LoadResult};

const GRADE6_SCIENCE: &str = include_str!("grade6_science.toml");

/// The Grade 6 science curriculum (`curiosity -> scientific_method`).
pub fn grade6_science() -> LoadResult<ValidatedCurriculum> {
    from_toml_str(GRADE6_SCIENCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concept::{CompletionBehavior, ConceptKind};

    #[test]
    fn test_grade6_science_is_valid() {
        let curriculum = grade6_science().unwrap();

        assert_eq!(curriculum.curriculum_id(), "grade6-science-v1");
        assert_eq!(curriculum.domain(), "science");
        assert_eq!(curriculum.concept_count(), 2);

        let curiosity = curriculum.concept("curiosity").unwrap();
        assert_eq!(curiosity.kind, ConceptKind::Disposition);
        assert_eq!(curiosity.completion_behavior, CompletionBehavior::ReinforceForever);

        let method = curriculum.concept("scientific_method").unwrap();
        assert_eq!(method.kind, ConceptKind::Procedural);
        assert_eq!(method.mastery_criteria.as_ref().unwrap().required_outcomes, 2);
    }

    #[test]
    fn test_grade6_science_dependency() {
        let curriculum = grade6_science().unwrap();
        let edge = &curriculum.dependencies()[0];

        assert_eq!(edge.from, "curiosity");
        assert_eq!(edge.to, "scientific_method");
        assert_eq!(edge.strength, 2);
    }
}
