//! Decision Engine - picks the next pedagogical action for a concept.
//!
//! Rules are evaluated top to bottom and the first one that applies decides:
//!
//! | rule              | applies when                          | action              |
//! |-------------------|---------------------------------------|---------------------|
//! | not introduced    | the learner has no state              | teach               |
//! | misconceptions    | any misconception recorded            | remediate           |
//! | mastered          | mastery >= 0.9                        | reinforce or skip   |
//! | low mastery       | mastery < 0.4                         | teach               |
//! | forgetting likely | last seen more than 14 days ago       | review              |
//! | consolidating     | always                                | reinforce           |
//!
//! Mastered concepts that reinforce forever are reinforced, everything else
//! mastered is skipped.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use curriculum::ConceptNode;

use crate::state::{ConceptLearningState, LearnerState, Timestamp};

/// What to do with a concept next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningAction {
    Teach,
    Reinforce,
    Review,
    Remediate,
    Skip,
}

impl LearningAction {
    /// Whether the pipeline should expose the learner to the concept.
    pub fn exposes(&self) -> bool {
        matches!(self, LearningAction::Teach | LearningAction::Reinforce)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LearningAction::Teach => "teach",
            LearningAction::Reinforce => "reinforce",
            LearningAction::Review => "review",
            LearningAction::Remediate => "remediate",
            LearningAction::Skip => "skip",
        }
    }
}

impl std::fmt::Display for LearningAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thresholds used by the decision rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionPolicy {
    /// Mastery at or above this counts as mastered.
    pub mastered_threshold: f64,

    /// Mastery below this still needs teaching.
    pub low_mastery_threshold: f64,

    /// Days since last seen after which a review is due. The boundary day itself is not.
    /// A window too large to represent never comes due.
    pub review_after_days: i64,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            mastered_threshold: 0.9,
            low_mastery_threshold: 0.4,
            review_after_days: 14,
        }
    }
}

/// One row of the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    NotIntroduced,
    Misconceptions,
    Mastered,
    LowMastery,
    ForgettingLikely,
    Consolidating,
}

impl DecisionRule {
    /// Rules in evaluation order.
    pub const TABLE: [DecisionRule; 6] = [
        DecisionRule::NotIntroduced,
        DecisionRule::Misconceptions,
        DecisionRule::Mastered,
        DecisionRule::LowMastery,
        DecisionRule::ForgettingLikely,
        DecisionRule::Consolidating,
    ];

    /// Whether the rule fires for the given concept state.
    pub fn applies(
        &self,
        state: Option<&ConceptLearningState>,
        now: Timestamp,
        policy: &DecisionPolicy,
    ) -> bool {
        let Some(state) = state else {
            return matches!(self, DecisionRule::NotIntroduced | DecisionRule::Consolidating);
        };

        match self {
            DecisionRule::NotIntroduced => false,
            DecisionRule::Misconceptions => state.has_misconceptions(),
            DecisionRule::Mastered => state.mastery() >= policy.mastered_threshold,
            DecisionRule::LowMastery => state.mastery() < policy.low_mastery_threshold,
            DecisionRule::ForgettingLikely => {
                match (state.last_seen_at, Duration::try_days(policy.review_after_days)) {
                    (Some(seen), Some(window)) => now - seen > window,
                    _ => false,
                }
            }
            DecisionRule::Consolidating => true,
        }
    }

    /// Action and reason this rule produces for `concept`.
    pub fn outcome(&self, concept: &ConceptNode) -> (LearningAction, &'static str) {
        match self {
            DecisionRule::NotIntroduced => (LearningAction::Teach, "Concept not yet introduced"),
            DecisionRule::Misconceptions => (LearningAction::Remediate, "Misconceptions detected"),
            DecisionRule::Mastered if concept.reinforces_forever() => {
                (LearningAction::Reinforce, "Disposition reinforcement")
            }
            DecisionRule::Mastered => (LearningAction::Skip, "Mastery achieved"),
            DecisionRule::LowMastery => (LearningAction::Teach, "Low mastery"),
            DecisionRule::ForgettingLikely => (LearningAction::Review, "Forgetting likely"),
            DecisionRule::Consolidating => (LearningAction::Reinforce, "Consolidating learning"),
        }
    }
}

/// The chosen action with its human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub action: LearningAction,
    pub reason: String,
    pub rule: DecisionRule,
}

/// Evaluates the decision table.
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    policy: DecisionPolicy,
}

impl DecisionEngine {
    pub fn new(policy: DecisionPolicy) -> Self {
        Self { policy }
    }

    pub fn with_defaults() -> Self {
        Self::new(DecisionPolicy::default())
    }

    pub fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }

    /// Decide what to do next with `concept` for this learner.
    pub fn decide(
        &self,
        learner: &LearnerState,
        concept: &ConceptNode,
        now: Timestamp,
    ) -> Decision {
        let state = learner.concept(&concept.id);
        let rule = DecisionRule::TABLE
            .into_iter()
            .find(|rule| rule.applies(state, now, &self.policy))
            .unwrap_or(DecisionRule::Consolidating);

        let (action, reason) = rule.outcome(concept);
        Decision {
            action,
            reason: reason.to_string(),
            rule,
        }
    }
}

/// Decide with the default policy.
pub fn decide(learner: &LearnerState, concept: &ConceptNode, now: Timestamp) -> Decision {
    DecisionEngine::with_defaults().decide(learner, concept, now)
}
