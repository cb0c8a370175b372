//! Card-member and card-label associations.

use jiff::Timestamp;
use rusqlite::params;

use crate::{
    error::{DatabaseResultExt, Result},
    ids::EntityId,
};

const INSERT_CARD_MEMBER_SQL: &str =
    "INSERT OR IGNORE INTO card_members (card_id, member_id, created_at) VALUES (?1, ?2, ?3)";
const DELETE_CARD_MEMBER_SQL: &str =
    "DELETE FROM card_members WHERE card_id = ?1 AND member_id = ?2";
const INSERT_CARD_LABEL_SQL: &str =
    "INSERT OR IGNORE INTO card_labels (card_id, label_id, created_at) VALUES (?1, ?2, ?3)";
const DELETE_CARD_LABEL_SQL: &str = "DELETE FROM card_labels WHERE card_id = ?1 AND label_id = ?2";

impl super::Database {
    /// Links a member to a card. Linking twice is a no-op.
    pub fn add_card_member(&mut self, card_id: &EntityId, member_id: &EntityId) -> Result<()> {
        let card = self.existing_row("cards", "Card", card_id)?;
        let member = self.existing_row("members", "Member", member_id)?;
        self.connection
            .execute(
                INSERT_CARD_MEMBER_SQL,
                params![card, member, Timestamp::now().to_string()],
            )
            .db_context("Failed to add card member")?;
        Ok(())
    }

    /// Unlinks a member from a card.
    pub fn remove_card_member(&mut self, card_id: &EntityId, member_id: &EntityId) -> Result<()> {
        let card = self.existing_row("cards", "Card", card_id)?;
        let member = self.existing_row("members", "Member", member_id)?;
        self.connection
            .execute(DELETE_CARD_MEMBER_SQL, params![card, member])
            .db_context("Failed to remove card member")?;
        Ok(())
    }

    /// Links a label to a card. Linking twice is a no-op.
    pub fn add_card_label(&mut self, card_id: &EntityId, label_id: &EntityId) -> Result<()> {
        let card = self.existing_row("cards", "Card", card_id)?;
        let label = self.existing_row("labels", "Label", label_id)?;
        self.connection
            .execute(
                INSERT_CARD_LABEL_SQL,
                params![card, label, Timestamp::now().to_string()],
            )
            .db_context("Failed to add card label")?;
        Ok(())
    }

    /// Unlinks a label from a card.
    pub fn remove_card_label(&mut self, card_id: &EntityId, label_id: &EntityId) -> Result<()> {
        let card = self.existing_row("cards", "Card", card_id)?;
        let label = self.existing_row("labels", "Label", label_id)?;
        self.connection
            .execute(DELETE_CARD_LABEL_SQL, params![card, label])
            .db_context("Failed to remove card label")?;
        Ok(())
    }
}
