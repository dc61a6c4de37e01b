//! Validation error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::concept::{CompletionBehavior, ConceptId, ConceptKind};

/// Which end of a dependency edge is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeEndpoint {
    Source,
    Target,
}

impl std::fmt::Display for EdgeEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeEndpoint::Source => f.write_str("source"),
            EdgeEndpoint::Target => f.write_str("target"),
        }
    }
}

/// Coarse classification of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    MissingMetadata,
    DuplicateConcept,
    MissingOutcomes,
    InvalidDifficulty,
    CompletionMismatch,
    DanglingEdge,
    SelfLoop,
    InvalidStrength,
    MissingReason,
    Cycle,
}

/// A structural violation that makes a curriculum unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingMetadata { field: &'static str },

    #[error("duplicate concept id \"{id}\"")]
    DuplicateConcept { id: ConceptId },

    #[error("concept \"{id}\" must have learning outcomes")]
    MissingOutcomes { id: ConceptId },

    #[error("invalid difficulty {difficulty} for \"{id}\" (expected 1-5)")]
    InvalidDifficulty { id: ConceptId, difficulty: u8 },

    #[error("{kind} concept \"{id}\" cannot have {behavior} completion")]
    CompletionMismatch {
        id: ConceptId,
        kind: ConceptKind,
        behavior: CompletionBehavior,
    },

    #[error("dependency {endpoint} \"{id}\" does not exist")]
    DanglingEdge { endpoint: EdgeEndpoint, id: ConceptId },

    #[error("concept \"{id}\" cannot depend on itself")]
    SelfLoop { id: ConceptId },

    #[error("dependency \"{from}\" -> \"{to}\" has strength {strength} (expected 1-3)")]
    InvalidStrength {
        from: ConceptId,
        to: ConceptId,
        strength: u8,
    },

    #[error("dependency \"{from}\" -> \"{to}\" must state a reason")]
    MissingReason { from: ConceptId, to: ConceptId },

    #[error("cycle detected at \"{id}\"")]
    Cycle { id: ConceptId },
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::MissingMetadata { .. } => ValidationErrorKind::MissingMetadata,
            ValidationError::DuplicateConcept { .. } => ValidationErrorKind::DuplicateConcept,
            ValidationError::MissingOutcomes { .. } => ValidationErrorKind::MissingOutcomes,
            ValidationError::InvalidDifficulty { .. } => ValidationErrorKind::InvalidDifficulty,
            ValidationError::CompletionMismatch { .. } => ValidationErrorKind::CompletionMismatch,
            ValidationError::DanglingEdge { .. } => ValidationErrorKind::DanglingEdge,
            ValidationError::SelfLoop { .. } => ValidationErrorKind::SelfLoop,
            ValidationError::InvalidStrength { .. } => ValidationErrorKind::InvalidStrength,
            ValidationError::MissingReason { .. } => ValidationErrorKind::MissingReason,
            ValidationError::Cycle { .. } => ValidationErrorKind::Cycle,
        }
    }

    /// The concept id the error is about, if it concerns one.
    pub fn concept_id(&self) -> Option<&str> {
        match self {
            ValidationError::MissingMetadata { .. } => None,
            ValidationError::DuplicateConcept { id }
            | ValidationError::MissingOutcomes { id }
            | ValidationError::InvalidDifficulty { id, .. }
            | ValidationError::CompletionMismatch { id, .. }
            | ValidationError::DanglingEdge { id, .. }
            | ValidationError::SelfLoop { id }
            | ValidationError::Cycle { id } => Some(id),
            ValidationError::InvalidStrength { from, .. }
            | ValidationError::MissingReason { from, .. } => Some(from),
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;
