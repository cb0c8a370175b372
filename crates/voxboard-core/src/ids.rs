//! Entity identifiers and the local identifier allocator.
//!
//! Entities created optimistically live under a [`EntityId::Local`] identifier
//! until the remote collaborator confirms them, at which point every structure
//! referencing them is rewritten to the [`EntityId::Server`] identifier.

use std::{
    fmt,
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
};

use serde::{Deserialize, Serialize};

const LOCAL_PREFIX: &str = "local:";

/// Identifier of a board entity, either process-local or server-issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum EntityId {
    /// Temporary identifier of an entity awaiting server confirmation
    Local(u64),
    /// Identifier assigned by the server
    Server(String),
}

impl EntityId {
    /// Creates a server identifier.
    pub fn server(id: impl Into<String>) -> Self {
        Self::Server(id.into())
    }

    /// Returns true for identifiers not yet confirmed by the server.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(n) => write!(f, "{LOCAL_PREFIX}{n}"),
            Self::Server(id) => f.write_str(id),
        }
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        match value
            .strip_prefix(LOCAL_PREFIX)
            .and_then(|n| n.parse::<u64>().ok())
        {
            Some(n) => Self::Local(n),
            None => Self::Server(value),
        }
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<EntityId> for String {
    fn from(value: EntityId) -> Self {
        value.to_string()
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

/// Produces monotonically increasing local identifiers.
#[derive(Debug, Default)]
pub struct LocalIdAllocator {
    next: AtomicU64,
}

impl LocalIdAllocator {
    /// Creates an allocator starting at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next local identifier.
    pub fn allocate(&self) -> EntityId {
        EntityId::Local(self.next.fetch_add(1, Ordering::Relaxed) + 1)
    }
}
