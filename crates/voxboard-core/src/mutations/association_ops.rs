//! Member and label attachments on cards.

use std::fmt;

use log::warn;

use super::Mutations;
use crate::{
    error::{BoardError, Result},
    ids::EntityId,
    models::Card,
};

/// Kind of card association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Association {
    Member,
    Label,
}

impl Association {
    fn ids_mut(self, card: &mut Card) -> &mut Vec<EntityId> {
        match self {
            Self::Member => &mut card.member_ids,
            Self::Label => &mut card.label_ids,
        }
    }
}

impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Member => "member",
            Self::Label => "label",
        })
    }
}

impl Mutations<'_> {
    /// Attaches a member or label to a card.
    pub async fn attach(&self, kind: Association, card_id: &EntityId, target: &EntityId) -> Result<()> {
        let added = self
            .with_store(|store| {
                let Some(card) = store.card_mut(card_id) else {
                    return false;
                };
                let ids = kind.ids_mut(card);
                if ids.contains(target) {
                    return false;
                }
                ids.push(target.clone());
                true
            })
            .await;

        let result = match kind {
            Association::Member => self.remote.add_card_member(card_id, target).await,
            Association::Label => self.remote.add_card_label(card_id, target).await,
        };

        if let Err(e) = result {
            warn!("Attaching {kind} {target} to card {card_id} failed: {e}");
            if added {
                self.with_store(|store| {
                    if let Some(card) = store.card_mut(card_id) {
                        kind.ids_mut(card).retain(|id| id != target);
                    }
                })
                .await;
            }
            return Err(BoardError::mutation("attach", format!("{kind} {target}"), e));
        }
        Ok(())
    }

    /// Detaches a member or label from a card.
    pub async fn detach(&self, kind: Association, card_id: &EntityId, target: &EntityId) -> Result<()> {
        let removed_at = self
            .with_store(|store| {
                let ids = kind.ids_mut(store.card_mut(card_id)?);
                let index = ids.iter().position(|id| id == target)?;
                ids.remove(index);
                Some(index)
            })
            .await;

        let result = match kind {
            Association::Member => self.remote.remove_card_member(card_id, target).await,
            Association::Label => self.remote.remove_card_label(card_id, target).await,
        };

        if let Err(e) = result {
            warn!("Detaching {kind} {target} from card {card_id} failed: {e}");
            if let Some(index) = removed_at {
                self.with_store(|store| {
                    if let Some(card) = store.card_mut(card_id) {
                        let ids = kind.ids_mut(card);
                        ids.insert(index.min(ids.len()), target.clone());
                    }
                })
                .await;
            }
            return Err(BoardError::mutation("detach", format!("{kind} {target}"), e));
        }
        Ok(())
    }
}
