//! SQLite-backed board service.
//!
//! [`BoardService`] plays the part of the remote board server: it implements
//! [`BoardRemote`](crate::remote::BoardRemote) on top of the [`db`](crate::db)
//! layer and assigns server identifiers (row ids). It also offers the setup
//! operations that have no voice command counterpart: adding lists, labels and
//! members, and loading a whole board into an [`EntityStore`].
//!
//! Every call opens its own connection inside `spawn_blocking`, so the service
//! is cheap to clone and safe to share across tasks.

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    db::Database,
    error::{BoardError, Result},
    models::{BoardSnapshot, Label, List, Member},
    store::EntityStore,
};

pub mod builder;
mod remote_impl;

pub use builder::BoardServiceBuilder;

/// Board storage addressed by a database file.
#[derive(Debug, Clone)]
pub struct BoardService {
    db_path: PathBuf,
}

impl BoardService {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the backing database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `op` against a fresh connection on the blocking pool.
    async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(BoardError::join)?
    }

    /// Appends a list to the board.
    pub async fn add_list(&self, name: &str) -> Result<List> {
        let name = required("name", name)?;
        self.with_db(move |db| db.insert_list(&name)).await
    }

    /// Adds a label. Labels without a name are allowed and match nothing.
    pub async fn add_label(&self, name: Option<&str>, color: &str) -> Result<Label> {
        let name = name.map(str::trim).filter(|n| !n.is_empty()).map(String::from);
        let color = required("color", color)?;
        self.with_db(move |db| db.insert_label(name.as_deref(), &color))
            .await
    }

    /// Adds a board member.
    pub async fn add_member(&self, name: &str, username: Option<&str>) -> Result<Member> {
        let name = required("name", name)?;
        let username = username
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(String::from);
        self.with_db(move |db| db.insert_member(&name, username.as_deref()))
            .await
    }

    /// Loads the whole board.
    pub async fn load_snapshot(&self) -> Result<BoardSnapshot> {
        self.with_db(|db| db.load_snapshot()).await
    }

    /// Loads the whole board into a fresh entity store.
    pub async fn load_store(&self) -> Result<EntityStore> {
        Ok(EntityStore::from_snapshot(self.load_snapshot().await?))
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(BoardError::invalid_input(field).with_reason("must not be empty"));
    }
    Ok(value.to_string())
}
