//! Error types for the voice command pipeline.
//!
//! Only two kinds of failure ever leave the pipeline: [`BoardError::PlanUnavailable`]
//! (nothing was applied) and infrastructure errors raised while setting up or
//! inspecting a board. Failures of individual actions are recorded in the
//! execution report instead.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for all board and pipeline operations.
#[derive(Error, Debug)]
pub enum BoardError {
    /// The upstream transcription/planning step produced nothing usable
    #[error("Action plan unavailable: {reason}")]
    PlanUnavailable { reason: String },
    /// A remote create/update/move/delete call failed
    #[error("Failed to {operation} {entity}: {source}")]
    MutationFailed {
        operation: &'static str,
        entity: String,
        #[source]
        source: Box<BoardError>,
    },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// A record addressed by the remote collaborator does not exist
    #[error("{kind} with ID {id} not found")]
    NotFound { kind: &'static str, id: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG base directory lookup errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> BoardError {
        BoardError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> BoardError {
        BoardError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl BoardError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a remote failure so it names the operation and entity it hit.
    pub fn mutation(operation: &'static str, entity: impl Into<String>, source: BoardError) -> Self {
        Self::MutationFailed {
            operation,
            entity: entity.into(),
            source: Box::new(source),
        }
    }

    /// Creates a plan-unavailable error.
    pub fn plan_unavailable(reason: impl Into<String>) -> Self {
        Self::PlanUnavailable {
            reason: reason.into(),
        }
    }

    /// Maps a `spawn_blocking` join failure.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| BoardError::database(message).with_source(e))
    }
}

/// Result type alias for board operations
pub type Result<T> = std::result::Result<T, BoardError>;
