//! Task CRUD operations.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row};

use super::{not_found, row_id, server_id};
use crate::{
    error::{DatabaseResultExt, Result},
    ids::EntityId,
    models::Task,
    remote::{TaskData, TaskPatch},
};

const INSERT_TASK_SQL: &str = "INSERT INTO tasks (card_id, name, position, created_at, updated_at) \
                               VALUES (?1, ?2, ?3, ?4, ?4)";
const SELECT_TASK_SQL: &str =
    "SELECT id, card_id, name, is_completed, position FROM tasks WHERE id = ?1";
const UPDATE_TASK_SQL: &str =
    "UPDATE tasks SET name = ?1, is_completed = ?2, updated_at = ?3 WHERE id = ?4";

pub(super) fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: server_id(row.get(0)?),
        card_id: server_id(row.get(1)?),
        name: row.get(2)?,
        is_completed: row.get(3)?,
        position: row.get(4)?,
    })
}

impl super::Database {
    /// Inserts a task into an existing card.
    pub fn insert_task(&mut self, card_id: &EntityId, data: &TaskData) -> Result<Task> {
        let card_row = self.existing_row("cards", "Card", card_id)?;

        self.connection
            .execute(
                INSERT_TASK_SQL,
                params![card_row, data.name, data.position, Timestamp::now().to_string()],
            )
            .db_context("Failed to insert task")?;

        Ok(Task {
            id: server_id(self.connection.last_insert_rowid()),
            card_id: card_id.clone(),
            name: data.name.clone(),
            is_completed: false,
            position: data.position,
        })
    }

    pub fn get_task(&self, id: &EntityId) -> Result<Option<Task>> {
        let Ok(row) = row_id("Task", id) else {
            return Ok(None);
        };
        self.connection
            .query_row(SELECT_TASK_SQL, [row], task_from_row)
            .optional()
            .db_context("Failed to query task")
    }

    /// Applies `patch` to a task and returns the stored result.
    pub fn update_task(&mut self, id: &EntityId, patch: &TaskPatch) -> Result<Task> {
        let mut task = self.get_task(id)?.ok_or_else(|| not_found("Task", id))?;
        patch.apply_to(&mut task);

        self.connection
            .execute(
                UPDATE_TASK_SQL,
                params![
                    task.name,
                    task.is_completed,
                    Timestamp::now().to_string(),
                    row_id("Task", id)?
                ],
            )
            .db_context("Failed to update task")?;

        Ok(task)
    }
}
