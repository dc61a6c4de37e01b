//! Curriculum validation.
//!
//! Four passes run in a fixed order and the first violation wins:
//! 1. **Metadata**: curriculum id, domain and version are present
//! 2. **Concepts**: unique ids, learning outcomes, difficulty range, kind/completion pairing
//! 3. **Dependencies**: endpoints exist, no self-loops, strength range, stated reason
//! 4. **Acyclicity**: iterative depth-first search over the prerequisite edges
//!
//! Passes walk concepts and edges in declaration order, so the reported error
//! is reproducible for a given curriculum.

mod error;

pub use error::*;

use std::collections::{HashMap, HashSet};

use crate::graph::{ConceptCurriculum, ConceptDependency, ValidatedCurriculum};

/// Validate a curriculum and freeze it for shared, read-only use.
pub fn validate(curriculum: ConceptCurriculum) -> ValidationResult<ValidatedCurriculum> {
    if let Err(err) = check(&curriculum) {
        tracing::warn!(
            curriculum_id = %curriculum.curriculum_id,
            kind = ?err.kind(),
            error = %err,
            "Curriculum rejected"
        );
        return Err(err);
    }

    tracing::info!(
        curriculum_id = %curriculum.curriculum_id,
        version = %curriculum.version,
        concepts = curriculum.concepts.len(),
        dependencies = curriculum.dependencies.len(),
        "Curriculum validated"
    );

    Ok(ValidatedCurriculum::freeze(curriculum))
}

/// Run every pass without taking ownership.
pub fn check(curriculum: &ConceptCurriculum) -> ValidationResult<()> {
    check_metadata(curriculum)?;
    check_concepts(curriculum)?;
    check_dependencies(curriculum)?;
    check_acyclic(curriculum)
}

fn check_metadata(curriculum: &ConceptCurriculum) -> ValidationResult<()> {
    let required = [
        ("curriculum_id", &curriculum.curriculum_id),
        ("domain", &curriculum.domain),
        ("version", &curriculum.version),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingMetadata { field });
        }
    }

    Ok(())
}

fn check_concepts(curriculum: &ConceptCurriculum) -> ValidationResult<()> {
    let mut seen = HashSet::new();

    for concept in &curriculum.concepts {
        if !seen.insert(concept.id.as_str()) {
            return Err(ValidationError::DuplicateConcept {
                id: concept.id.clone(),
            });
        }

        if concept.learning_outcomes.is_empty() {
            return Err(ValidationError::MissingOutcomes {
                id: concept.id.clone(),
            });
        }

        if !(1..=5).contains(&concept.difficulty) {
            return Err(ValidationError::InvalidDifficulty {
                id: concept.id.clone(),
                difficulty: concept.difficulty,
            });
        }

        if !concept.completion_matches_kind() {
            return Err(ValidationError::CompletionMismatch {
                id: concept.id.clone(),
                kind: concept.kind,
                behavior: concept.completion_behavior,
            });
        }
    }

    Ok(())
}

fn check_dependencies(curriculum: &ConceptCurriculum) -> ValidationResult<()> {
    let ids: HashSet<&str> = curriculum.concepts.iter().map(|c| c.id.as_str()).collect();

    for dependency in &curriculum.dependencies {
        check_dependency(dependency, &ids)?;
    }

    Ok(())
}

fn check_dependency(dependency: &ConceptDependency, ids: &HashSet<&str>) -> ValidationResult<()> {
    if !ids.contains(dependency.from.as_str()) {
        return Err(ValidationError::DanglingEdge {
            endpoint: EdgeEndpoint::Source,
            id: dependency.from.clone(),
        });
    }

    if !ids.contains(dependency.to.as_str()) {
        return Err(ValidationError::DanglingEdge {
            endpoint: EdgeEndpoint::Target,
            id: dependency.to.clone(),
        });
    }

    if dependency.from == dependency.to {
        return Err(ValidationError::SelfLoop {
            id: dependency.from.clone(),
        });
    }

    if !(1..=3).contains(&dependency.strength) {
        return Err(ValidationError::InvalidStrength {
            from: dependency.from.clone(),
            to: dependency.to.clone(),
            strength: dependency.strength,
        });
    }

    if dependency.reason.trim().is_empty() {
        return Err(ValidationError::MissingReason {
            from: dependency.from.clone(),
            to: dependency.to.clone(),
        });
    }

    Ok(())
}

fn check_acyclic(curriculum: &ConceptCurriculum) -> ValidationResult<()> {
    let mut graph: HashMap<&str, Vec<&str>> = curriculum
        .concepts
        .iter()
        .map(|c| (c.id.as_str(), Vec::new()))
        .collect();

    for dependency in &curriculum.dependencies {
        graph
            .entry(dependency.from.as_str())
            .or_default()
            .push(dependency.to.as_str());
    }

    let mut visited = HashSet::new();
    let mut on_stack = HashSet::new();

    for concept in &curriculum.concepts {
        visit(concept.id.as_str(), &graph, &mut visited, &mut on_stack)?;
    }

    Ok(())
}

/// Depth-first search from `root` with an explicit stack of (node, next edge).
fn visit<'a>(
    root: &'a str,
    graph: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    on_stack: &mut HashSet<&'a str>,
) -> ValidationResult<()> {
    if !visited.insert(root) {
        return Ok(());
    }

    on_stack.insert(root);
    let mut stack: Vec<(&'a str, usize)> = vec![(root, 0)];

    while let Some(frame) = stack.last_mut() {
        let (id, cursor) = *frame;
        let next = graph.get(id).and_then(|targets| targets.get(cursor)).copied();

        let Some(target) = next else {
            on_stack.remove(id);
            stack.pop();
            continue;
        };

        frame.1 += 1;

        if on_stack.contains(target) {
            return Err(ValidationError::Cycle {
                id: target.to_string(),
            });
        }

        if visited.insert(target) {
            on_stack.insert(target);
            stack.push((target, 0));
        }
    }

    Ok(())
}
