//! Card mutations.

use jiff::civil::DateTime;
use log::{debug, warn};

use super::Mutations;
use crate::{
    error::{BoardError, Result},
    ids::EntityId,
    models::Card,
    remote::{CardData, CardPatch},
};

/// A card about to be created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardDraft {
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime>,
}

impl Mutations<'_> {
    /// Creates a card at the end of `list_id`.
    ///
    /// The card is visible in the store under a local identifier until the
    /// remote confirms it; it is then re-keyed to the server identifier. On
    /// failure the optimistic card is removed again.
    pub async fn create_card(&self, list_id: &EntityId, draft: CardDraft) -> Result<Card> {
        let local_id = self.ids.allocate();
        let data = self
            .with_store(|store| {
                let position = store.next_card_position(list_id);
                store.insert_card(Card {
                    id: local_id.clone(),
                    list_id: list_id.clone(),
                    name: draft.name.clone(),
                    description: draft.description.clone(),
                    due_date: draft.due_date,
                    position,
                    member_ids: Vec::new(),
                    label_ids: Vec::new(),
                });
                CardData {
                    name: draft.name,
                    description: draft.description,
                    due_date: draft.due_date,
                    position,
                }
            })
            .await;

        match self.remote.create_card(list_id, &data).await {
            Ok(confirmed) => {
                debug!("Card {local_id} confirmed as {}", confirmed.id);
                self.with_store(|store| {
                    if !store.reconcile_card(&local_id, confirmed.clone()) {
                        store.insert_card(confirmed.clone());
                    }
                })
                .await;
                Ok(confirmed)
            }
            Err(e) => {
                warn!("Creating card '{}' failed, rolling back: {e}", data.name);
                self.with_store(|store| store.remove_card(&local_id)).await;
                Err(BoardError::mutation("create card", data.name, e))
            }
        }
    }

    /// Applies `patch` to a card.
    pub async fn update_card(&self, card_id: &EntityId, patch: &CardPatch) -> Result<Card> {
        let previous = self
            .with_store(|store| {
                let card = store.card_mut(card_id)?;
                let previous = card.clone();
                patch.apply_to(card);
                Some(previous)
            })
            .await;

        match self.remote.update_card(card_id, patch).await {
            Ok(confirmed) => {
                self.with_store(|store| store.reconcile_card(card_id, confirmed.clone()))
                    .await;
                Ok(confirmed)
            }
            Err(e) => {
                warn!("Updating card {card_id} failed, rolling back: {e}");
                if let Some(previous) = previous {
                    self.with_store(|store| store.insert_card(previous)).await;
                }
                Err(BoardError::mutation("update card", card_id.to_string(), e))
            }
        }
    }

    /// Moves a card to the end of `list_id`.
    pub async fn move_card(&self, card_id: &EntityId, list_id: &EntityId) -> Result<Card> {
        let (previous, position) = self
            .with_store(|store| {
                let position = store.next_card_position(list_id);
                let previous = store.card_mut(card_id).map(|card| {
                    let previous = card.clone();
                    card.list_id = list_id.clone();
                    card.position = position;
                    previous
                });
                (previous, position)
            })
            .await;

        match self.remote.move_card(card_id, list_id, position).await {
            Ok(confirmed) => {
                self.with_store(|store| store.reconcile_card(card_id, confirmed.clone()))
                    .await;
                Ok(confirmed)
            }
            Err(e) => {
                warn!("Moving card {card_id} failed, rolling back: {e}");
                if let Some(previous) = previous {
                    self.with_store(|store| store.insert_card(previous)).await;
                }
                Err(BoardError::mutation("move card", card_id.to_string(), e))
            }
        }
    }

    /// Deletes a card and its tasks.
    pub async fn delete_card(&self, card_id: &EntityId) -> Result<()> {
        let removed = self.with_store(|store| store.remove_card(card_id)).await;

        match self.remote.delete_card(card_id).await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("Deleting card {card_id} failed, restoring it: {e}");
                if let Some((card, tasks)) = removed {
                    self.with_store(|store| store.restore_card(card, tasks)).await;
                }
                Err(BoardError::mutation("delete card", card_id.to_string(), e))
            }
        }
    }
}
