//! # Learner Core
//!
//! The learner side of the curriculum engine. This crate holds the cognitive
//! state of each learner, reacts to learning signals, models forgetting, spreads
//! mastery along prerequisite edges, and decides what to teach next. It reads a
//! [`curriculum::ValidatedCurriculum`] but never changes it.
//!
//! ## Core Components
//!
//! - **state**: Learner snapshots, cognitive metrics and the per-concept audit trail
//! - **signals**: Exposure, reinforcement, assessment and misconception handling
//! - **decay**: Exponential forgetting scaled by stability
//! - **propagation**: One-hop mastery credit along dependency edges
//! - **decision**: The ordered teaching policy
//! - **pipeline**: Alignment, decision and signals wired together, per learner or per cohort
//! - **config**: TOML-backed tunables for every engine
//!
//! ## Design Philosophy
//!
//! - **Snapshots, not mutation**: Every operation returns a new [`LearnerState`]
//! - **Order matters**: Within one learner, each step sees the effect of the last
//! - **Learners are independent**: Cohorts fan out in parallel

pub mod config;
pub mod decay;
pub mod decision;
pub mod pipeline;
pub mod propagation;
pub mod signals;
pub mod state;

pub use config::{ConfigError, ConfigResult, EngineConfig};
pub use decay::{decay, DecayConfig, DecayModel, BASE_DECAY_RATE, MS_PER_DAY};
pub use decision::{decide, Decision, DecisionEngine, DecisionPolicy, DecisionRule, LearningAction};
pub use pipeline::{run_pipeline, LearningPipeline, PipelineRun, PipelineStep};
pub use propagation::{propagate, PropagationConfig, PropagationEngine};
pub use signals::{apply_signal, LearningSignal, SignalDeltas, SignalEngine};
pub use state::*;
