//! Board entities held by the entity store.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::ids::EntityId;

/// A column of the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub id: EntityId,
    pub name: String,
    pub position: f64,
}

/// A card living in a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: EntityId,
    pub list_id: EntityId,
    pub name: String,
    /// Raw description column, plain text or a JSON-encoded structured
    /// description
    pub description: Option<String>,
    pub due_date: Option<DateTime>,
    pub position: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub member_ids: Vec<EntityId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub label_ids: Vec<EntityId>,
}

/// A checklist item attached to a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: EntityId,
    pub card_id: EntityId,
    pub name: String,
    pub is_completed: bool,
    pub position: f64,
}

/// A board label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: EntityId,
    pub name: Option<String>,
    pub color: String,
    pub position: f64,
}

/// A board member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: EntityId,
    pub name: String,
    pub username: Option<String>,
}

/// Everything needed to hydrate an entity store for one board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub lists: Vec<List>,
    pub cards: Vec<Card>,
    pub tasks: Vec<Task>,
    pub labels: Vec<Label>,
    pub members: Vec<Member>,
}
