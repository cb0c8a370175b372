//! Atomic, independently failable board mutations.
//!
//! Every operation follows the same four steps:
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────────────────┐
//! │  optimistic  │    │    remote    │    │ ok:  reconcile with the  │
//! │ store update │───▶│     call     │───▶│      server record       │
//! │              │    │  (awaited)   │    │ err: roll back locally   │
//! └──────────────┘    └──────────────┘    └──────────────────────────┘
//! ```
//!
//! The store lock is released before the remote call, so readers see the
//! optimistic state while the call is in flight. A failure is returned as
//! [`BoardError::MutationFailed`](crate::BoardError::MutationFailed) after the
//! rollback has been applied; it never leaves partial local state behind.
//!
//! - [`card_ops`]: create, update, move and delete cards
//! - [`task_ops`]: create and update tasks
//! - [`association_ops`]: attach and detach members and labels

use crate::{
    ids::LocalIdAllocator,
    remote::BoardRemote,
    store::{EntityStore, SharedStore},
};

pub mod association_ops;
pub mod card_ops;
pub mod task_ops;

pub use association_ops::Association;
pub use card_ops::CardDraft;

/// Mutation operations bound to a store, a remote and an id allocator.
pub struct Mutations<'a> {
    store: &'a SharedStore,
    remote: &'a dyn BoardRemote,
    ids: &'a LocalIdAllocator,
}

impl<'a> Mutations<'a> {
    pub fn new(store: &'a SharedStore, remote: &'a dyn BoardRemote, ids: &'a LocalIdAllocator) -> Self {
        Self { store, remote, ids }
    }

    /// Runs `f` with exclusive access to the store.
    async fn with_store<R>(&self, f: impl FnOnce(&mut EntityStore) -> R) -> R {
        let mut store = self.store.write().await;
        f(&mut store)
    }
}
