//! addTaskToCard, completeTask and uncompleteTask.

use super::{non_blank, ActionExecutor, StepResult};
use crate::{
    ids::EntityId,
    models::{action, EffectReport, Outcome},
    remote::TaskPatch,
    resolver,
};

impl ActionExecutor<'_> {
    pub(super) async fn add_tasks(&mut self, action: &action::CardTasks) -> StepResult {
        let Some(card) = self.resolve_card(action.card_name.as_deref()) else {
            return StepResult::skipped("card not found");
        };

        let effects = self.create_named_tasks(&card.id, &action.tasks).await;
        StepResult::from_effects(effects, "no tasks given")
    }

    /// Creates one task per non-blank name; each creation stands alone.
    pub(super) async fn create_named_tasks(&self, card_id: &EntityId, names: &[String]) -> Vec<EffectReport> {
        let mut effects = Vec::with_capacity(names.len());

        for name in names {
            let Some(name) = non_blank(Some(name)) else {
                continue;
            };
            let outcome = match self.mutations.create_task(card_id, name).await {
                Ok(_) => Outcome::Applied,
                Err(e) => Outcome::failed(e),
            };
            effects.push(EffectReport {
                effect: format!("task {name}"),
                outcome,
            });
        }

        effects
    }

    pub(super) async fn set_task_completed(&mut self, action: &action::TaskRef, completed: bool) -> StepResult {
        let Some(task_name) = non_blank(action.task_name.as_deref()) else {
            return StepResult::skipped("task name missing");
        };
        let Some(task) = resolver::find_task(&self.context.cards, task_name, action.card_name.as_deref())
        else {
            return StepResult::skipped("task not found");
        };

        let patch = TaskPatch {
            is_completed: Some(completed),
            ..Default::default()
        };
        StepResult::from_result(self.mutations.update_task(&task.id, &patch).await)
    }
}
