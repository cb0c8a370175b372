//! Lists, labels, members and whole-board snapshots.

use std::collections::HashMap;

use jiff::Timestamp;
use rusqlite::{params, Row};

use super::{card_queries::card_from_row, server_id, task_queries::task_from_row};
use crate::{
    error::{BoardError, DatabaseResultExt, Result},
    ids::EntityId,
    models::{BoardSnapshot, Card, Label, List, Member, Task},
    store::POSITION_GAP,
};

const INSERT_LIST_SQL: &str =
    "INSERT INTO lists (name, position, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)";
const NEXT_LIST_POSITION_SQL: &str = "SELECT COALESCE(MAX(position), 0) FROM lists";
const INSERT_LABEL_SQL: &str =
    "INSERT INTO labels (name, color, position, created_at) VALUES (?1, ?2, ?3, ?4)";
const NEXT_LABEL_POSITION_SQL: &str = "SELECT COALESCE(MAX(position), 0) FROM labels";
const INSERT_MEMBER_SQL: &str =
    "INSERT INTO members (name, username, created_at) VALUES (?1, ?2, ?3)";

const SELECT_LISTS_SQL: &str = "SELECT id, name, position FROM lists ORDER BY position, id";
const SELECT_CARDS_SQL: &str = "SELECT id, list_id, name, description, due_date, position \
                                FROM cards ORDER BY list_id, position, id";
const SELECT_TASKS_SQL: &str =
    "SELECT id, card_id, name, is_completed, position FROM tasks ORDER BY card_id, position, id";
const SELECT_LABELS_SQL: &str =
    "SELECT id, name, color, position FROM labels ORDER BY position, id";
const SELECT_MEMBERS_SQL: &str = "SELECT id, name, username FROM members ORDER BY id";
const SELECT_CARD_MEMBERS_SQL: &str = "SELECT card_id, member_id FROM card_members ORDER BY rowid";
const SELECT_CARD_LABELS_SQL: &str = "SELECT card_id, label_id FROM card_labels ORDER BY rowid";

impl super::Database {
    /// Appends a list to the board.
    pub fn insert_list(&mut self, name: &str) -> Result<List> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let position = tx
            .query_row(NEXT_LIST_POSITION_SQL, [], |row| row.get::<_, f64>(0))
            .db_context("Failed to compute list position")?
            + POSITION_GAP;
        tx.execute(INSERT_LIST_SQL, params![name, position, Timestamp::now().to_string()])
            .db_context("Failed to insert list")?;
        let id = tx.last_insert_rowid();

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(List {
            id: server_id(id),
            name: name.to_string(),
            position,
        })
    }

    /// Appends a label to the board.
    pub fn insert_label(&mut self, name: Option<&str>, color: &str) -> Result<Label> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let position = tx
            .query_row(NEXT_LABEL_POSITION_SQL, [], |row| row.get::<_, f64>(0))
            .db_context("Failed to compute label position")?
            + POSITION_GAP;
        tx.execute(
            INSERT_LABEL_SQL,
            params![name, color, position, Timestamp::now().to_string()],
        )
        .db_context("Failed to insert label")?;
        let id = tx.last_insert_rowid();

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Label {
            id: server_id(id),
            name: name.map(String::from),
            color: color.to_string(),
            position,
        })
    }

    /// Adds a board member. Usernames are unique.
    pub fn insert_member(&mut self, name: &str, username: Option<&str>) -> Result<Member> {
        self.connection
            .execute(
                INSERT_MEMBER_SQL,
                params![name, username, Timestamp::now().to_string()],
            )
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(err, _)
                    if err.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    BoardError::invalid_input("username").with_reason(format!(
                        "'{}' is already taken",
                        username.unwrap_or_default()
                    ))
                }
                e => BoardError::database("Failed to insert member").with_source(e),
            })?;

        Ok(Member {
            id: server_id(self.connection.last_insert_rowid()),
            name: name.to_string(),
            username: username.map(String::from),
        })
    }

    /// Loads the whole board.
    pub fn load_snapshot(&self) -> Result<BoardSnapshot> {
        let lists = self.query_all(SELECT_LISTS_SQL, |row| {
            Ok(List {
                id: server_id(row.get(0)?),
                name: row.get(1)?,
                position: row.get(2)?,
            })
        })?;

        let mut cards: Vec<Card> = self.query_all(SELECT_CARDS_SQL, card_from_row)?;
        let tasks: Vec<Task> = self.query_all(SELECT_TASKS_SQL, task_from_row)?;

        let labels = self.query_all(SELECT_LABELS_SQL, |row| {
            Ok(Label {
                id: server_id(row.get(0)?),
                name: row.get(1)?,
                color: row.get(2)?,
                position: row.get(3)?,
            })
        })?;

        let members = self.query_all(SELECT_MEMBERS_SQL, |row| {
            Ok(Member {
                id: server_id(row.get(0)?),
                name: row.get(1)?,
                username: row.get(2)?,
            })
        })?;

        let mut card_members = self.association_map(SELECT_CARD_MEMBERS_SQL)?;
        let mut card_labels = self.association_map(SELECT_CARD_LABELS_SQL)?;
        for card in &mut cards {
            card.member_ids = card_members.remove(&card.id).unwrap_or_default();
            card.label_ids = card_labels.remove(&card.id).unwrap_or_default();
        }

        Ok(BoardSnapshot {
            lists,
            cards,
            tasks,
            labels,
            members,
        })
    }

    fn query_all<T, F>(&self, sql: &str, map: F) -> Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self
            .connection
            .prepare(sql)
            .db_context("Failed to prepare query")?;
        let rows = stmt.query_map([], map).db_context("Failed to run query")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read rows")
    }

    /// Groups `(card_id, other_id)` rows by card.
    fn association_map(&self, sql: &str) -> Result<HashMap<EntityId, Vec<EntityId>>> {
        let pairs = self.query_all(sql, |row| {
            Ok((server_id(row.get(0)?), server_id(row.get(1)?)))
        })?;

        let mut map: HashMap<EntityId, Vec<EntityId>> = HashMap::new();
        for (card_id, other_id) in pairs {
            map.entry(card_id).or_default().push(other_id);
        }
        Ok(map)
    }
}
