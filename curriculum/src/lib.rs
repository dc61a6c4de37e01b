//! # Curriculum
//!
//! The canonical curriculum crate - concept nodes, the dependency graph that
//! connects them, and the structural rules every curriculum must satisfy before
//! anything else is allowed to read it. This crate is the single source of truth
//! for what can be taught and contains no learner state.
//!
//! ## Core Components
//!
//! - **concept**: Concept nodes and their pedagogical metadata
//! - **graph**: The curriculum container and the frozen, validated handle
//! - **validation**: Metadata, concept, dependency and acyclicity passes
//! - **loader**: Reading curricula from TOML or JSON
//! - **catalog**: Built-in curricula
//! - **alignment**: Mapping extracted concepts onto curriculum nodes
//!
//! ## Design Philosophy
//!
//! - **Validate once**: A [`ValidatedCurriculum`] can only be obtained through [`validate`]
//! - **Immutable after load**: The validated graph is shared, never mutated
//! - **Failures as data**: Only structural violations are errors; unmatched concepts are decisions

pub mod alignment;
pub mod catalog;
pub mod concept;
pub mod graph;
pub mod loader;
pub mod validation;

pub use alignment::*;
pub use concept::*;
pub use graph::*;
pub use loader::*;
pub use validation::*;
