//! Contract of the remote board collaborator.
//!
//! The pipeline treats the remote side as opaque: each call either returns
//! the canonical record with its server identifier or fails. Timeouts and
//! retries, if any, belong to the implementation.

use async_trait::async_trait;
use jiff::civil::DateTime;

use crate::{
    error::Result,
    ids::EntityId,
    models::{Card, Task},
};

/// Fields of a card to create.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardData {
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime>,
    pub position: f64,
}

/// Card fields to change; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime>,
}

impl CardPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.due_date.is_none()
    }

    /// Applies the patch to a local card.
    pub fn apply_to(&self, card: &mut Card) {
        if let Some(name) = &self.name {
            card.name = name.clone();
        }
        if let Some(description) = &self.description {
            card.description = Some(description.clone()).filter(|d| !d.is_empty());
        }
        if let Some(due_date) = self.due_date {
            card.due_date = Some(due_date);
        }
    }
}

/// Fields of a task to create.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskData {
    pub name: String,
    pub position: f64,
}

/// Task fields to change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub is_completed: Option<bool>,
}

impl TaskPatch {
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(name) = &self.name {
            task.name = name.clone();
        }
        if let Some(is_completed) = self.is_completed {
            task.is_completed = is_completed;
        }
    }
}

/// Remote calls the mutation operations rely on.
#[async_trait]
pub trait BoardRemote: Send + Sync {
    /// Creates a card at the end of a list and returns the stored record.
    async fn create_card(&self, list_id: &EntityId, data: &CardData) -> Result<Card>;

    async fn update_card(&self, card_id: &EntityId, patch: &CardPatch) -> Result<Card>;

    async fn move_card(&self, card_id: &EntityId, list_id: &EntityId, position: f64)
        -> Result<Card>;

    async fn delete_card(&self, card_id: &EntityId) -> Result<()>;

    async fn create_task(&self, card_id: &EntityId, data: &TaskData) -> Result<Task>;

    async fn update_task(&self, task_id: &EntityId, patch: &TaskPatch) -> Result<Task>;

    async fn add_card_member(&self, card_id: &EntityId, member_id: &EntityId) -> Result<()>;

    async fn remove_card_member(&self, card_id: &EntityId, member_id: &EntityId) -> Result<()>;

    async fn add_card_label(&self, card_id: &EntityId, label_id: &EntityId) -> Result<()>;

    async fn remove_card_label(&self, card_id: &EntityId, label_id: &EntityId) -> Result<()>;
}
