//! Task mutations.

use log::{debug, warn};

use super::Mutations;
use crate::{
    error::{BoardError, Result},
    ids::EntityId,
    models::Task,
    remote::{TaskData, TaskPatch},
};

impl Mutations<'_> {
    /// Creates a task at the end of a card's checklist.
    pub async fn create_task(&self, card_id: &EntityId, name: &str) -> Result<Task> {
        let local_id = self.ids.allocate();
        let data = self
            .with_store(|store| {
                let position = store.next_task_position(card_id);
                store.insert_task(Task {
                    id: local_id.clone(),
                    card_id: card_id.clone(),
                    name: name.to_string(),
                    is_completed: false,
                    position,
                });
                TaskData {
                    name: name.to_string(),
                    position,
                }
            })
            .await;

        match self.remote.create_task(card_id, &data).await {
            Ok(confirmed) => {
                debug!("Task {local_id} confirmed as {}", confirmed.id);
                self.with_store(|store| {
                    if !store.reconcile_task(&local_id, confirmed.clone()) {
                        store.insert_task(confirmed.clone());
                    }
                })
                .await;
                Ok(confirmed)
            }
            Err(e) => {
                warn!("Creating task '{name}' failed, rolling back: {e}");
                self.with_store(|store| store.remove_task(&local_id)).await;
                Err(BoardError::mutation("create task", name, e))
            }
        }
    }

    /// Applies `patch` to a task.
    pub async fn update_task(&self, task_id: &EntityId, patch: &TaskPatch) -> Result<Task> {
        let previous = self
            .with_store(|store| {
                let task = store.task_mut(task_id)?;
                let previous = task.clone();
                patch.apply_to(task);
                Some(previous)
            })
            .await;

        match self.remote.update_task(task_id, patch).await {
            Ok(confirmed) => {
                self.with_store(|store| store.insert_task(confirmed.clone()))
                    .await;
                Ok(confirmed)
            }
            Err(e) => {
                warn!("Updating task {task_id} failed, rolling back: {e}");
                if let Some(previous) = previous {
                    self.with_store(|store| store.insert_task(previous)).await;
                }
                Err(BoardError::mutation("update task", task_id.to_string(), e))
            }
        }
    }
}
