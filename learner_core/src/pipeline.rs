//! Learning pipeline - alignment, decision and signal application in one pass.
//!
//! Extracted concepts are aligned once. Each aligned decision is then decided
//! against the learner snapshot as it stands after every earlier step, and
//! teach or reinforce decisions expose the learner to the concept. Rejected
//! alignments produce no step.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use curriculum::{
    AlignmentEngine, AlignmentReport, ConceptId, ExtractedConcept, ValidatedCurriculum,
};

use crate::config::EngineConfig;
use crate::decision::{Decision, DecisionEngine};
use crate::signals::{LearningSignal, SignalEngine};
use crate::state::{LearnerState, Timestamp};

/// What the pipeline did for one aligned concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStep {
    pub extracted_concept_id: String,
    pub curriculum_concept_id: ConceptId,
    pub decision: Decision,
    /// Signal applied as a result of the decision, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_applied: Option<LearningSignal>,
}

/// Outcome of running the pipeline for one learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRun {
    /// Snapshot after every step.
    pub learner: LearnerState,
    pub report: AlignmentReport,
    pub steps: Vec<PipelineStep>,
}

impl PipelineRun {
    /// Steps that applied a signal.
    pub fn exposures(&self) -> impl Iterator<Item = &PipelineStep> {
        self.steps.iter().filter(|step| step.signal_applied.is_some())
    }
}

/// Wires the alignment, decision and signal engines together.
#[derive(Debug, Clone, Default)]
pub struct LearningPipeline {
    alignment: AlignmentEngine,
    decision: DecisionEngine,
    signals: SignalEngine,
}

impl LearningPipeline {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            alignment: AlignmentEngine::new(config.alignment.clone()),
            decision: DecisionEngine::new(config.decision.clone()),
            signals: SignalEngine::new(config.signals.clone()),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&EngineConfig::default())
    }

    /// Align `extracted` and walk the result for one learner.
    pub fn run(
        &self,
        learner: &LearnerState,
        extracted: &[ExtractedConcept],
        curriculum: &ValidatedCurriculum,
        now: Timestamp,
    ) -> PipelineRun {
        let report = self.alignment.align(extracted, curriculum);
        self.apply_report(learner, report, curriculum, now)
    }

    /// Align once and run every learner independently, in parallel.
    ///
    /// Results come back in the same order as `learners`.
    pub fn run_cohort(
        &self,
        learners: &[LearnerState],
        extracted: &[ExtractedConcept],
        curriculum: &ValidatedCurriculum,
        now: Timestamp,
    ) -> Vec<PipelineRun> {
        let report = self.alignment.align(extracted, curriculum);

        learners
            .par_iter()
            .map(|learner| self.apply_report(learner, report.clone(), curriculum, now))
            .collect()
    }

    /// Walk an existing alignment report for one learner.
    pub fn apply_report(
        &self,
        learner: &LearnerState,
        report: AlignmentReport,
        curriculum: &ValidatedCurriculum,
        now: Timestamp,
    ) -> PipelineRun {
        let mut state = learner.clone();
        let mut steps = Vec::new();

        for aligned in report.aligned() {
            let Some(concept_id) = aligned.curriculum_concept_id() else {
                continue;
            };
            let Some(concept) = curriculum.concept(concept_id) else {
                tracing::warn!(
                    curriculum = curriculum.curriculum_id(),
                    concept = concept_id,
                    "Aligned concept missing from curriculum, skipping"
                );
                continue;
            };

            let decision = self.decision.decide(&state, concept, now);
            let signal_applied = decision.action.exposes().then_some(LearningSignal::Exposure);

            if let Some(signal) = &signal_applied {
                state = self.signals.apply(&state, concept, signal, now);
            }

            tracing::debug!(
                learner = %state.learner_id,
                extracted = aligned.extracted_concept_id(),
                concept = %concept.id,
                action = %decision.action,
                reason = %decision.reason,
                "Pipeline step"
            );

            steps.push(PipelineStep {
                extracted_concept_id: aligned.extracted_concept_id().to_string(),
                curriculum_concept_id: concept.id.clone(),
                decision,
                signal_applied,
            });
        }

        tracing::info!(
            learner = %state.learner_id,
            curriculum = curriculum.curriculum_id(),
            steps = steps.len(),
            rejected = report.rejected_count(),
            coverage = report.coverage.ratio(),
            "Pipeline run complete"
        );

        PipelineRun {
            learner: state,
            report,
            steps,
        }
    }
}

/// Run the pipeline with the default configuration.
pub fn run_pipeline(
    learner: &LearnerState,
    extracted: &[ExtractedConcept],
    curriculum: &ValidatedCurriculum,
    now: Timestamp,
) -> PipelineRun {
    LearningPipeline::with_defaults().run(learner, extracted, curriculum, now)
}
