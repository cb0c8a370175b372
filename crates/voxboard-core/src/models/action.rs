//! Action plan types produced by the external planner.
//!
//! Every field besides the discriminant is optional on the wire: a missing or
//! blank name simply makes the action a no-op when it is executed. `null`
//! lists deserialize as empty lists.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::BoardContext;
use crate::codec::{text_or_number, ResourceId};

/// The envelope returned by the transcription/planning collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct CommandPlan {
    /// What the user said
    #[serde(default)]
    pub transcript: String,
    /// Ordered actions to apply
    #[serde(default, deserialize_with = "each_action")]
    pub actions: Vec<Action>,
    /// Board snapshot the planner saw; rebuilt from the store when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_context: Option<BoardContext>,
}

/// One step of an action plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    CreateCard(CreateCard),
    AddMemberToCard(CardMembers),
    RemoveMemberFromCard(CardMembers),
    AddLabelToCard(CardLabels),
    RemoveLabelFromCard(CardLabels),
    UpdateCard(UpdateCard),
    MoveCard(MoveCard),
    AddTaskToCard(CardTasks),
    CompleteTask(TaskRef),
    UncompleteTask(TaskRef),
    DeleteCard(CardRef),
    /// An action whose fields could not be read; always skipped
    #[serde(skip)]
    Malformed { reason: String },
    /// Any action type this pipeline does not know; always skipped
    #[serde(other)]
    Unsupported,
}

impl Action {
    /// Wire name of the action kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateCard(_) => "createCard",
            Self::AddMemberToCard(_) => "addMemberToCard",
            Self::RemoveMemberFromCard(_) => "removeMemberFromCard",
            Self::AddLabelToCard(_) => "addLabelToCard",
            Self::RemoveLabelFromCard(_) => "removeLabelFromCard",
            Self::UpdateCard(_) => "updateCard",
            Self::MoveCard(_) => "moveCard",
            Self::AddTaskToCard(_) => "addTaskToCard",
            Self::CompleteTask(_) => "completeTask",
            Self::UncompleteTask(_) => "uncompleteTask",
            Self::DeleteCard(_) => "deleteCard",
            Self::Unsupported => "unsupported",
            Self::Malformed { .. } => "malformed",
        }
    }

    /// The primary name the action refers to, for reporting.
    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::CreateCard(a) => a.name.as_deref(),
            Self::AddMemberToCard(a) | Self::RemoveMemberFromCard(a) => a.card_name.as_deref(),
            Self::AddLabelToCard(a) | Self::RemoveLabelFromCard(a) => a.card_name.as_deref(),
            Self::UpdateCard(a) => a.card_name.as_deref(),
            Self::MoveCard(a) => a.card_name.as_deref(),
            Self::AddTaskToCard(a) => a.card_name.as_deref(),
            Self::CompleteTask(a) | Self::UncompleteTask(a) => a.task_name.as_deref(),
            Self::DeleteCard(a) => a.card_name.as_deref(),
            Self::Unsupported | Self::Malformed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateCard {
    #[serde(default, deserialize_with = "text_or_number")]
    pub list_name: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub description: Option<String>,
    /// `YYYY-MM-DDTHH:mm:ss`, local time
    #[serde(default, deserialize_with = "text_or_number")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub member_names: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub label_names: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tasks: Vec<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub client_name: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub phone_no: Option<String>,
    #[serde(default)]
    pub resource_id: Option<ResourceId>,
}

/// Fields of `addMemberToCard` and `removeMemberFromCard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct CardMembers {
    #[serde(default, deserialize_with = "text_or_number")]
    pub card_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub member_names: Vec<String>,
}

/// Fields of `addLabelToCard` and `removeLabelFromCard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct CardLabels {
    #[serde(default, deserialize_with = "text_or_number")]
    pub card_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub label_names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateCard {
    #[serde(default, deserialize_with = "text_or_number")]
    pub card_name: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub client_name: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub phone_no: Option<String>,
    #[serde(default)]
    pub resource_id: Option<ResourceId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct MoveCard {
    #[serde(default, deserialize_with = "text_or_number")]
    pub card_name: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub list_name: Option<String>,
}

/// Fields of `addTaskToCard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct CardTasks {
    #[serde(default, deserialize_with = "text_or_number")]
    pub card_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tasks: Vec<String>,
}

/// Fields of `completeTask` and `uncompleteTask`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct TaskRef {
    /// Restricts the search to one card when present
    #[serde(default, deserialize_with = "text_or_number")]
    pub card_name: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub task_name: Option<String>,
}

/// Fields of `deleteCard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct CardRef {
    #[serde(default, deserialize_with = "text_or_number")]
    pub card_name: Option<String>,
}

/// Reads each action on its own, so one unreadable action does not take the
/// rest of the plan down with it.
fn each_action<'de, D>(deserializer: D) -> Result<Vec<Action>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).unwrap_or_else(|e| {
                log::warn!("Skipping unreadable action: {e}");
                Action::Malformed {
                    reason: e.to_string(),
                }
            })
        })
        .collect())
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
