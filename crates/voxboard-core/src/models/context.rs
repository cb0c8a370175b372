//! Read-only board snapshot handed to the planner and the executor.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    codec::{self, ResourceId},
    ids::EntityId,
    store::EntityStore,
};

/// Point-in-time view of a board, as seen when the command was received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct BoardContext {
    #[serde(default)]
    pub lists: Vec<ContextList>,
    #[serde(default)]
    pub labels: Vec<ContextLabel>,
    #[serde(default)]
    pub members: Vec<ContextMember>,
    #[serde(default)]
    pub cards: Vec<ContextCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ContextList {
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ContextLabel {
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub id: EntityId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ContextMember {
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ContextCard {
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub id: EntityId,
    pub name: String,
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub list_id: EntityId,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub phone_no: Option<String>,
    #[serde(default)]
    pub resource_id: Option<ResourceId>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_json_description: bool,
    #[serde(default)]
    pub tasks: Vec<ContextTask>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ContextTask {
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub is_completed: bool,
}

impl BoardContext {
    /// Builds a context from the current store contents.
    ///
    /// Lists, labels, cards and tasks come out in position order, members in
    /// insertion order. Structured description fields are decoded per card.
    pub fn from_store(store: &EntityStore) -> Self {
        let lists = store
            .lists_in_order()
            .into_iter()
            .map(|l| ContextList {
                id: l.id.clone(),
                name: l.name.clone(),
            })
            .collect();

        let labels = store
            .labels_in_order()
            .into_iter()
            .map(|l| ContextLabel {
                id: l.id.clone(),
                name: l.name.clone(),
                color: Some(l.color.clone()),
            })
            .collect();

        let members = store
            .members()
            .map(|m| ContextMember {
                id: m.id.clone(),
                name: m.name.clone(),
                username: m.username.clone(),
            })
            .collect();

        let cards = store
            .cards_in_board_order()
            .into_iter()
            .map(|card| {
                let raw = card.description.as_deref().unwrap_or_default();
                let fields = codec::decode(raw).fields;
                ContextCard {
                    id: card.id.clone(),
                    name: card.name.clone(),
                    list_id: card.list_id.clone(),
                    due_date: card.due_date.map(|d| d.to_string()),
                    client_name: fields.client_name,
                    phone_no: fields.phone_no,
                    resource_id: fields.resource_id,
                    description: fields.description,
                    is_json_description: codec::is_json_encoded(raw),
                    tasks: store
                        .tasks_for_card(&card.id)
                        .into_iter()
                        .map(|t| ContextTask {
                            id: t.id.clone(),
                            name: t.name.clone(),
                            is_completed: t.is_completed,
                        })
                        .collect(),
                }
            })
            .collect();

        Self {
            lists,
            labels,
            members,
            cards,
        }
    }

    /// Finds a card by identifier.
    pub fn card(&self, id: &EntityId) -> Option<&ContextCard> {
        self.cards.iter().find(|c| &c.id == id)
    }
}
