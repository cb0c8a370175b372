//! Sequential, failure-isolating execution of action plans.
//!
//! The [`ActionExecutor`] walks a plan strictly in order. Each action is
//! resolved against the board context (plus cards created earlier in the same
//! plan) and applied through the [`Mutations`] layer. An action whose
//! references do not resolve is skipped; an action whose remote call fails is
//! rolled back and recorded as failed. Neither stops the plan.
//!
//! ```text
//! plan ─▶ action N ─▶ resolve ─▶ mutate (await) ─▶ report N ─▶ action N+1 ...
//!                        ▲                 │
//!                        └── created refs ◀┘
//! ```
//!
//! Action handlers live in [`card_actions`], [`association_actions`] and
//! [`task_actions`].

use jiff::civil::{Date, DateTime};
use log::{debug, info, warn};

use crate::{
    error::{BoardError, Result},
    ids::LocalIdAllocator,
    models::{Action, ActionReport, BoardContext, EffectReport, Outcome},
    mutations::{Association, Mutations},
    remote::BoardRemote,
    resolver::CreatedEntityRef,
    store::SharedStore,
};

pub mod association_actions;
pub mod card_actions;
pub mod task_actions;

#[cfg(test)]
mod tests;

/// Hour used when a due date carries no time of day.
const DEFAULT_DUE_HOUR: i8 = 9;

/// Applies one plan against a store.
pub struct ActionExecutor<'a> {
    mutations: Mutations<'a>,
    store: &'a SharedStore,
    context: &'a BoardContext,
    created: Vec<CreatedEntityRef>,
}

/// Outcome of one action together with its sub-effects.
#[derive(Debug)]
pub(crate) struct StepResult {
    outcome: Outcome,
    effects: Vec<EffectReport>,
}

impl StepResult {
    fn applied() -> Self {
        Self {
            outcome: Outcome::Applied,
            effects: Vec::new(),
        }
    }

    fn skipped(reason: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::skipped(reason),
            effects: Vec::new(),
        }
    }

    fn failed(error: BoardError) -> Self {
        Self {
            outcome: Outcome::failed(error),
            effects: Vec::new(),
        }
    }

    fn from_result<T>(result: Result<T>) -> Self {
        match result {
            Ok(_) => Self::applied(),
            Err(e) => Self::failed(e),
        }
    }

    fn with_effects(mut self, effects: Vec<EffectReport>) -> Self {
        self.effects = effects;
        self
    }

    /// Summarizes an action that consists only of independent sub-effects.
    ///
    /// Applied if any sub-effect applied, failed if none applied but one
    /// failed, skipped otherwise.
    fn from_effects(effects: Vec<EffectReport>, nothing_to_do: &str) -> Self {
        let outcome = if effects.iter().any(|e| e.outcome.is_applied()) {
            Outcome::Applied
        } else if let Some(Outcome::Failed { error }) = effects
            .iter()
            .map(|e| &e.outcome)
            .find(|o| matches!(o, Outcome::Failed { .. }))
        {
            Outcome::failed(error)
        } else {
            Outcome::skipped(nothing_to_do)
        };
        Self { outcome, effects }
    }
}

impl<'a> ActionExecutor<'a> {
    /// Creates an executor for one plan.
    pub fn new(
        store: &'a SharedStore,
        remote: &'a dyn BoardRemote,
        ids: &'a LocalIdAllocator,
        context: &'a BoardContext,
    ) -> Self {
        Self {
            mutations: Mutations::new(store, remote, ids),
            store,
            context,
            created: Vec::new(),
        }
    }

    /// Cards created so far by this executor.
    pub fn created(&self) -> &[CreatedEntityRef] {
        &self.created
    }

    /// Applies `actions` in order and reports one outcome per action.
    pub async fn execute(&mut self, actions: &[Action]) -> Vec<ActionReport> {
        let mut reports = Vec::with_capacity(actions.len());

        for (index, action) in actions.iter().enumerate() {
            let StepResult { outcome, effects } = self.apply(action).await;

            match &outcome {
                Outcome::Applied => info!("Action {index} ({}) applied", action.kind()),
                Outcome::Skipped { reason } => {
                    debug!("Action {index} ({}) skipped: {reason}", action.kind())
                }
                Outcome::Failed { error } => {
                    warn!("Action {index} ({}) failed: {error}", action.kind())
                }
            }

            reports.push(ActionReport {
                index,
                kind: action.kind(),
                subject: action.subject().map(String::from),
                outcome,
                effects,
            });
        }

        reports
    }

    async fn apply(&mut self, action: &Action) -> StepResult {
        match action {
            Action::CreateCard(a) => self.create_card(a).await,
            Action::AddMemberToCard(a) => {
                self.associate(Association::Member, true, a.card_name.as_deref(), &a.member_names)
                    .await
            }
            Action::RemoveMemberFromCard(a) => {
                self.associate(Association::Member, false, a.card_name.as_deref(), &a.member_names)
                    .await
            }
            Action::AddLabelToCard(a) => {
                self.associate(Association::Label, true, a.card_name.as_deref(), &a.label_names)
                    .await
            }
            Action::RemoveLabelFromCard(a) => {
                self.associate(Association::Label, false, a.card_name.as_deref(), &a.label_names)
                    .await
            }
            Action::UpdateCard(a) => self.update_card(a).await,
            Action::MoveCard(a) => self.move_card(a).await,
            Action::AddTaskToCard(a) => self.add_tasks(a).await,
            Action::CompleteTask(a) => self.set_task_completed(a, true).await,
            Action::UncompleteTask(a) => self.set_task_completed(a, false).await,
            Action::DeleteCard(a) => self.delete_card(a).await,
            Action::Unsupported => StepResult::skipped("unsupported action type"),
            Action::Malformed { reason } => {
                StepResult::skipped(format!("malformed action: {reason}"))
            }
        }
    }
}

/// Returns the trimmed value if it is not blank.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parses a planner due date.
///
/// Accepts `YYYY-MM-DDTHH:mm:ss` (a trailing `Z` is ignored, times are local)
/// and a bare `YYYY-MM-DD`, which is scheduled at 09:00.
pub(crate) fn parse_due_date(raw: &str) -> Option<DateTime> {
    let raw = raw.trim().trim_end_matches('Z');
    if raw.is_empty() {
        return None;
    }

    let parsed = if raw.contains('T') || raw.contains(' ') {
        raw.replacen(' ', "T", 1).parse::<DateTime>().ok()
    } else {
        raw.parse::<Date>()
            .ok()
            .map(|date| date.at(DEFAULT_DUE_HOUR, 0, 0, 0))
    };

    if parsed.is_none() {
        warn!("Ignoring unparsable due date '{raw}'");
    }
    parsed
}
