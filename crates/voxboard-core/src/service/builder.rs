//! Builder for creating and configuring BoardService instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::BoardService;
use crate::{
    db::Database,
    error::{BoardError, Result},
};

/// Builder for creating and configuring BoardService instances.
#[derive(Debug, Clone, Default)]
pub struct BoardServiceBuilder {
    database_path: Option<PathBuf>,
}

impl BoardServiceBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/voxboard/board.db` or `~/.local/share/voxboard/board.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the service, creating the database and its schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::FileSystem` if the database directory cannot be
    /// created and `BoardError::Database` if initialization fails.
    pub async fn build(self) -> Result<BoardService> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| BoardError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let init_path = db_path.clone();
        task::spawn_blocking(move || Database::new(&init_path).map(drop))
            .await
            .map_err(BoardError::join)??;

        log::debug!("Board database ready at {}", db_path.display());
        Ok(BoardService::new(db_path))
    }

    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("voxboard")
            .place_data_file("board.db")
            .map_err(|e| BoardError::XdgDirectory(e.to_string()))
    }
}
