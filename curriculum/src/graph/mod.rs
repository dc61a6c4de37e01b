//! Curriculum graph - concept nodes plus the prerequisite edges between them.
//!
//! The graph consists of:
//! - **Concepts**: Nodes, kept in declaration order
//! - **Dependencies**: Directed, weighted prerequisite edges
//!
//! A raw [`ConceptCurriculum`] is only a container. Components that read the
//! graph take a [`ValidatedCurriculum`], which can only be produced by
//! [`crate::validate`].

mod validated;

pub use validated::*;

use serde::{Deserialize, Serialize};

use crate::concept::{ConceptId, ConceptNode};

/// Nature of a prerequisite relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DependencyType {
    #[default]
    Conceptual,
    Procedural,
    Cognitive,
    Reinforcement,
}

/// Directed prerequisite edge: `to` builds on `from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptDependency {
    pub from: ConceptId,
    pub to: ConceptId,

    #[serde(default)]
    pub kind: DependencyType,

    /// Weight from 1 (weak) to 3 (strong).
    pub strength: u8,

    /// Why `to` depends on `from`. Must not be empty.
    pub reason: String,
}

impl ConceptDependency {
    /// Create a conceptual dependency edge.
    pub fn new(
        from: impl Into<ConceptId>,
        to: impl Into<ConceptId>,
        strength: u8,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind: DependencyType::Conceptual,
            strength,
            reason: reason.into(),
        }
    }

    pub fn with_kind(mut self, kind: DependencyType) -> Self {
        self.kind = kind;
        self
    }
}

/// Cadence at which reinforce-forever concepts are revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReinforcementWindow {
    Weekly,
    Monthly,
}

/// Curriculum-wide pedagogical settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pedagogy {
    pub spiral_learning: bool,
    pub max_difficulty_jump: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reinforcement_window: Option<ReinforcementWindow>,
}

/// The curriculum container as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptCurriculum {
    pub curriculum_id: String,

    /// Subject area (science, math, language, ...).
    pub domain: String,

    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Concept nodes in declaration order.
    #[serde(default)]
    pub concepts: Vec<ConceptNode>,

    /// Dependency edges in declaration order.
    #[serde(default)]
    pub dependencies: Vec<ConceptDependency>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pedagogy: Option<Pedagogy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_authority: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

impl ConceptCurriculum {
    /// Create an empty curriculum with the required metadata.
    pub fn new(
        curriculum_id: impl Into<String>,
        domain: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            curriculum_id: curriculum_id.into(),
            domain: domain.into(),
            version: version.into(),
            description: None,
            concepts: Vec::new(),
            dependencies: Vec::new(),
            pedagogy: None,
            source_authority: None,
            checksum: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a concept node.
    pub fn with_concept(mut self, concept: ConceptNode) -> Self {
        self.concepts.push(concept);
        self
    }

    /// Append a dependency edge.
    pub fn with_dependency(mut self, dependency: ConceptDependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn with_pedagogy(mut self, pedagogy: Pedagogy) -> Self {
        self.pedagogy = Some(pedagogy);
        self
    }

    /// Find a concept by id (first declaration wins).
    pub fn find_concept(&self, id: &str) -> Option<&ConceptNode> {
        self.concepts.iter().find(|c| c.id == id)
    }
}
