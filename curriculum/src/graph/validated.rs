//! Frozen, validated curriculum handle with read-only registry lookups.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use super::{ConceptCurriculum, ConceptDependency};
use crate::concept::{ConceptId, ConceptNode};

/// A curriculum that passed every validation pass.
///
/// Cloning is cheap: the underlying graph is shared behind an `Arc` and is
/// never mutated. Construct it with [`crate::validate`].
#[derive(Debug, Clone)]
pub struct ValidatedCurriculum {
    inner: Arc<ConceptCurriculum>,
    /// Concept id -> position in declaration order.
    index: Arc<HashMap<ConceptId, usize>>,
}

impl ValidatedCurriculum {
    /// Wrap a curriculum whose invariants have already been checked.
    pub(crate) fn freeze(curriculum: ConceptCurriculum) -> Self {
        let index = curriculum
            .concepts
            .iter()
            .enumerate()
            .map(|(position, concept)| (concept.id.clone(), position))
            .collect();

        Self {
            inner: Arc::new(curriculum),
            index: Arc::new(index),
        }
    }

    pub fn curriculum_id(&self) -> &str {
        &self.inner.curriculum_id
    }

    pub fn domain(&self) -> &str {
        &self.inner.domain
    }

    pub fn version(&self) -> &str {
        &self.inner.version
    }

    /// Get a concept node by id.
    pub fn concept(&self, id: &str) -> Option<&ConceptNode> {
        self.index
            .get(id)
            .and_then(|&position| self.inner.concepts.get(position))
    }

    /// Check if a concept exists.
    pub fn has_concept(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Concept ids in declaration order.
    pub fn concept_ids(&self) -> impl Iterator<Item = &ConceptId> {
        self.inner.concepts.iter().map(|c| &c.id)
    }

    /// Concept nodes in declaration order.
    pub fn concepts(&self) -> &[ConceptNode] {
        &self.inner.concepts
    }

    /// Dependency edges in declaration order.
    pub fn dependencies(&self) -> &[ConceptDependency] {
        &self.inner.dependencies
    }

    /// Edges leaving `id` (concepts that build on it).
    pub fn dependents_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a ConceptDependency> {
        self.inner.dependencies.iter().filter(move |d| d.from == id)
    }

    /// Edges entering `id` (its prerequisites).
    pub fn prerequisites_of<'a>(
        &'a self,
        id: &'a str,
    ) -> impl Iterator<Item = &'a ConceptDependency> {
        self.inner.dependencies.iter().filter(move |d| d.to == id)
    }

    pub fn concept_count(&self) -> usize {
        self.inner.concepts.len()
    }

    /// Borrow the underlying curriculum.
    pub fn as_curriculum(&self) -> &ConceptCurriculum {
        &self.inner
    }
}

impl AsRef<ConceptCurriculum> for ValidatedCurriculum {
    fn as_ref(&self) -> &ConceptCurriculum {
        &self.inner
    }
}

impl Serialize for ValidatedCurriculum {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.inner.serialize(serializer)
    }
}
