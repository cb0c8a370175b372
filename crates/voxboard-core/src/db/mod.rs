//! SQLite storage behind the board service.
//!
//! Queries are grouped by entity: [`board_queries`] for lists, labels,
//! members and whole-board snapshots, [`card_queries`], [`task_queries`] and
//! [`association_queries`] for the card-member and card-label tables.

use std::path::Path;

use jiff::civil::DateTime;
use rusqlite::{types::Type, Connection};

use crate::{
    error::{BoardError, DatabaseResultExt, Result},
    ids::EntityId,
};

pub mod association_queries;
pub mod board_queries;
pub mod card_queries;
pub mod migrations;
pub mod task_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Returns true if a row with `id` exists in `table`.
    fn row_exists(&self, table: &str, id: i64) -> Result<bool> {
        self.connection
            .query_row(
                &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1)"),
                [id],
                |row| row.get(0),
            )
            .db_context("Failed to check row existence")
    }

    /// Resolves `id` to the row id of an existing row, or `NotFound`.
    fn existing_row(&self, table: &str, kind: &'static str, id: &EntityId) -> Result<i64> {
        let row = row_id(kind, id)?;
        if self.row_exists(table, row)? {
            Ok(row)
        } else {
            Err(not_found(kind, id))
        }
    }
}

/// Maps a server identifier to its row id.
///
/// Local identifiers and non-numeric ids were never issued by this database.
pub(crate) fn row_id(kind: &'static str, id: &EntityId) -> Result<i64> {
    match id {
        EntityId::Server(raw) => raw.parse().map_err(|_| not_found(kind, id)),
        EntityId::Local(_) => Err(not_found(kind, id)),
    }
}

pub(crate) fn server_id(row: i64) -> EntityId {
    EntityId::server(row.to_string())
}

fn not_found(kind: &'static str, id: &EntityId) -> BoardError {
    BoardError::NotFound {
        kind,
        id: id.to_string(),
    }
}

/// Reads an optional due date column.
fn due_date_column(index: usize, value: Option<String>) -> rusqlite::Result<Option<DateTime>> {
    value
        .map(|raw| {
            raw.parse::<DateTime>()
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
        })
        .transpose()
}
