//! Card CRUD operations.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row};

use super::{due_date_column, not_found, row_id, server_id};
use crate::{
    error::{DatabaseResultExt, Result},
    ids::EntityId,
    models::Card,
    remote::{CardData, CardPatch},
};

const INSERT_CARD_SQL: &str = "INSERT INTO cards (list_id, name, description, due_date, position, created_at, updated_at) \
                               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)";
const SELECT_CARD_SQL: &str =
    "SELECT id, list_id, name, description, due_date, position FROM cards WHERE id = ?1";
const UPDATE_CARD_SQL: &str =
    "UPDATE cards SET name = ?1, description = ?2, due_date = ?3, updated_at = ?4 WHERE id = ?5";
const MOVE_CARD_SQL: &str =
    "UPDATE cards SET list_id = ?1, position = ?2, updated_at = ?3 WHERE id = ?4";
const DELETE_CARD_SQL: &str = "DELETE FROM cards WHERE id = ?1";
const SELECT_CARD_MEMBER_IDS_SQL: &str =
    "SELECT member_id FROM card_members WHERE card_id = ?1 ORDER BY rowid";
const SELECT_CARD_LABEL_IDS_SQL: &str =
    "SELECT label_id FROM card_labels WHERE card_id = ?1 ORDER BY rowid";

/// Maps a row selected with the card columns, without associations.
pub(super) fn card_from_row(row: &Row<'_>) -> rusqlite::Result<Card> {
    Ok(Card {
        id: server_id(row.get(0)?),
        list_id: server_id(row.get(1)?),
        name: row.get(2)?,
        description: row.get(3)?,
        due_date: due_date_column(4, row.get(4)?)?,
        position: row.get(5)?,
        member_ids: Vec::new(),
        label_ids: Vec::new(),
    })
}

impl super::Database {
    /// Inserts a card into an existing list.
    pub fn insert_card(&mut self, list_id: &EntityId, data: &CardData) -> Result<Card> {
        let list_row = self.existing_row("lists", "List", list_id)?;
        let description = data.description.as_deref().filter(|d| !d.is_empty());

        self.connection
            .execute(
                INSERT_CARD_SQL,
                params![
                    list_row,
                    data.name,
                    description,
                    data.due_date.map(|d| d.to_string()),
                    data.position,
                    Timestamp::now().to_string()
                ],
            )
            .db_context("Failed to insert card")?;

        Ok(Card {
            id: server_id(self.connection.last_insert_rowid()),
            list_id: list_id.clone(),
            name: data.name.clone(),
            description: description.map(String::from),
            due_date: data.due_date,
            position: data.position,
            member_ids: Vec::new(),
            label_ids: Vec::new(),
        })
    }

    /// Retrieves a card together with its member and label ids.
    pub fn get_card(&self, id: &EntityId) -> Result<Option<Card>> {
        let Ok(row) = row_id("Card", id) else {
            return Ok(None);
        };

        let card = self
            .connection
            .query_row(SELECT_CARD_SQL, [row], card_from_row)
            .optional()
            .db_context("Failed to query card")?;

        let Some(mut card) = card else {
            return Ok(None);
        };
        card.member_ids = self.linked_ids(SELECT_CARD_MEMBER_IDS_SQL, row)?;
        card.label_ids = self.linked_ids(SELECT_CARD_LABEL_IDS_SQL, row)?;
        Ok(Some(card))
    }

    /// Applies `patch` to a card and returns the stored result.
    pub fn update_card(&mut self, id: &EntityId, patch: &CardPatch) -> Result<Card> {
        let mut card = self.get_card(id)?.ok_or_else(|| not_found("Card", id))?;
        patch.apply_to(&mut card);

        self.connection
            .execute(
                UPDATE_CARD_SQL,
                params![
                    card.name,
                    card.description,
                    card.due_date.map(|d| d.to_string()),
                    Timestamp::now().to_string(),
                    row_id("Card", id)?
                ],
            )
            .db_context("Failed to update card")?;

        Ok(card)
    }

    /// Moves a card to `position` within another list.
    pub fn move_card(&mut self, id: &EntityId, list_id: &EntityId, position: f64) -> Result<Card> {
        let list_row = self.existing_row("lists", "List", list_id)?;
        let mut card = self.get_card(id)?.ok_or_else(|| not_found("Card", id))?;

        self.connection
            .execute(
                MOVE_CARD_SQL,
                params![list_row, position, Timestamp::now().to_string(), row_id("Card", id)?],
            )
            .db_context("Failed to move card")?;

        card.list_id = list_id.clone();
        card.position = position;
        Ok(card)
    }

    /// Deletes a card; its tasks and associations go with it.
    pub fn delete_card(&mut self, id: &EntityId) -> Result<()> {
        let deleted = self
            .connection
            .execute(DELETE_CARD_SQL, [row_id("Card", id)?])
            .db_context("Failed to delete card")?;

        if deleted == 0 {
            return Err(not_found("Card", id));
        }
        Ok(())
    }

    fn linked_ids(&self, sql: &str, card_row: i64) -> Result<Vec<EntityId>> {
        let mut stmt = self
            .connection
            .prepare(sql)
            .db_context("Failed to prepare query")?;
        let rows = stmt
            .query_map([card_row], |row| row.get::<_, i64>(0).map(server_id))
            .db_context("Failed to run query")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read rows")
    }
}
