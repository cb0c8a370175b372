//! Arena-backed table keyed by entity identifier.

use std::collections::HashMap;

use crate::{
    ids::EntityId,
    models::{Card, Label, List, Member, Task},
};

/// Empty slots tolerated before a table is compacted.
const MIN_COMPACTION: usize = 32;

/// An entity that can be stored in a [`Table`].
pub trait Keyed {
    fn key(&self) -> &EntityId;
    fn set_key(&mut self, id: EntityId);
}

macro_rules! impl_keyed {
    ($($ty:ty),*) => {
        $(impl Keyed for $ty {
            fn key(&self) -> &EntityId {
                &self.id
            }

            fn set_key(&mut self, id: EntityId) {
                self.id = id;
            }
        })*
    };
}

impl_keyed!(List, Card, Task, Label, Member);

/// Entities live in slots; the index maps identifiers to slots. Removal
/// leaves an empty slot, and re-keying an entity only touches the index entry
/// and the entity's own id. Once empty slots outnumber live ones the slots are
/// compacted, keeping insertion order.
#[derive(Debug, Clone)]
pub struct Table<T> {
    slots: Vec<Option<T>>,
    index: HashMap<EntityId, usize>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Keyed> Table<T> {
    /// Inserts an entity, replacing any entity with the same identifier in place.
    pub fn insert(&mut self, item: T) -> Option<T> {
        match self.index.get(item.key()) {
            Some(&slot) => self.slots[slot].replace(item),
            None => {
                self.index.insert(item.key().clone(), self.slots.len());
                self.slots.push(Some(item));
                None
            }
        }
    }

    pub fn get(&self, id: &EntityId) -> Option<&T> {
        self.index
            .get(id)
            .and_then(|&slot| self.slots[slot].as_ref())
    }

    pub fn get_mut(&mut self, id: &EntityId) -> Option<&mut T> {
        self.index
            .get(id)
            .and_then(|&slot| self.slots[slot].as_mut())
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.index.contains_key(id)
    }

    pub fn remove(&mut self, id: &EntityId) -> Option<T> {
        let removed = self.take(id);
        self.compact_if_sparse();
        removed
    }

    fn take(&mut self, id: &EntityId) -> Option<T> {
        let slot = self.index.remove(id)?;
        self.slots[slot].take()
    }

    fn compact_if_sparse(&mut self) {
        let live = self.index.len();
        let empty = self.slots.len() - live;
        if empty < MIN_COMPACTION || empty <= live {
            return;
        }

        self.slots.retain(Option::is_some);
        self.index.clear();
        for (slot, item) in self.slots.iter().enumerate() {
            if let Some(item) = item {
                self.index.insert(item.key().clone(), slot);
            }
        }
    }

    /// Moves the entity stored under `old` to `new`.
    ///
    /// Any other entity already stored under `new` is dropped first, so the
    /// table never holds two live entries for one identifier. Returns false if
    /// nothing is stored under `old`.
    pub fn rekey(&mut self, old: &EntityId, new: EntityId) -> bool {
        if old == &new {
            return self.contains(old);
        }
        let Some(slot) = self.index.remove(old) else {
            return false;
        };
        self.take(&new);
        if let Some(item) = self.slots[slot].as_mut() {
            item.set_key(new.clone());
        }
        self.index.insert(new, slot);
        self.compact_if_sparse();
        true
    }

    /// Iterates live entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
