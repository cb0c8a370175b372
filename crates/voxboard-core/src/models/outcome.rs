//! Per-action outcomes collected while executing a plan.

use serde::Serialize;

/// What happened to one action or sub-effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    /// Applied locally and confirmed by the remote collaborator
    Applied,
    /// Not attempted, usually because a name did not resolve
    Skipped { reason: String },
    /// The remote call failed and the local change was rolled back
    Failed { error: String },
}

impl Outcome {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self::Failed {
            error: error.to_string(),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Outcome of a nested effect such as attaching a member or creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectReport {
    pub effect: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Outcome of one action of the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionReport {
    /// Zero-based position in the plan
    pub index: usize,
    pub kind: &'static str,
    pub subject: Option<String>,
    #[serde(flatten)]
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<EffectReport>,
}

/// Outcomes of a whole plan, in plan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
    pub transcript: String,
    pub actions: Vec<ActionReport>,
}

impl ExecutionReport {
    /// Number of actions that were applied.
    pub fn applied(&self) -> usize {
        self.actions.iter().filter(|a| a.outcome.is_applied()).count()
    }

    /// Number of actions that were skipped.
    pub fn skipped(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a.outcome, Outcome::Skipped { .. }))
            .count()
    }

    /// Number of actions that failed.
    pub fn failed(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a.outcome, Outcome::Failed { .. }))
            .count()
    }
}
