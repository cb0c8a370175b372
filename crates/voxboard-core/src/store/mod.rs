//! Normalized in-memory entity store for one board.
//!
//! The store is shared between the UI side of an application and the action
//! executor through a [`SharedStore`] handle. The executor is the only writer
//! while a plan runs; locks are taken for the duration of one local mutation
//! and never held across a remote call.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    ids::EntityId,
    models::{BoardSnapshot, Card, Label, List, Member, Task},
};

pub mod table;

pub use table::{Keyed, Table};

/// Gap left between consecutive positions of cards and tasks.
pub const POSITION_GAP: f64 = 65536.0;

/// Shared handle to an entity store.
pub type SharedStore = Arc<RwLock<EntityStore>>;

/// In-memory board state: lists, cards, tasks, labels and members keyed by
/// identifier.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    lists: Table<List>,
    cards: Table<Card>,
    tasks: Table<Task>,
    labels: Table<Label>,
    members: Table<Member>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a store from a board snapshot.
    pub fn from_snapshot(snapshot: BoardSnapshot) -> Self {
        let mut store = Self::new();
        for list in snapshot.lists {
            store.lists.insert(list);
        }
        for card in snapshot.cards {
            store.cards.insert(card);
        }
        for task in snapshot.tasks {
            store.tasks.insert(task);
        }
        for label in snapshot.labels {
            store.labels.insert(label);
        }
        for member in snapshot.members {
            store.members.insert(member);
        }
        store
    }

    /// Wraps the store in a shared handle.
    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    // Lookups

    pub fn list(&self, id: &EntityId) -> Option<&List> {
        self.lists.get(id)
    }

    pub fn card(&self, id: &EntityId) -> Option<&Card> {
        self.cards.get(id)
    }

    pub fn task(&self, id: &EntityId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn label(&self, id: &EntityId) -> Option<&Label> {
        self.labels.get(id)
    }

    pub fn member(&self, id: &EntityId) -> Option<&Member> {
        self.members.get(id)
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn lists_in_order(&self) -> Vec<&List> {
        let mut lists: Vec<_> = self.lists.iter().collect();
        lists.sort_by(|a, b| a.position.total_cmp(&b.position));
        lists
    }

    pub fn labels_in_order(&self) -> Vec<&Label> {
        let mut labels: Vec<_> = self.labels.iter().collect();
        labels.sort_by(|a, b| a.position.total_cmp(&b.position));
        labels
    }

    pub fn cards_in_list(&self, list_id: &EntityId) -> Vec<&Card> {
        let mut cards: Vec<_> = self.cards.iter().filter(|c| &c.list_id == list_id).collect();
        cards.sort_by(|a, b| a.position.total_cmp(&b.position));
        cards
    }

    /// All cards, list by list in list order, each list's cards in position order.
    pub fn cards_in_board_order(&self) -> Vec<&Card> {
        let mut cards: Vec<_> = self
            .lists_in_order()
            .into_iter()
            .flat_map(|list| self.cards_in_list(&list.id))
            .collect();
        // Cards whose list is unknown to this store go last
        cards.extend(self.cards.iter().filter(|c| !self.lists.contains(&c.list_id)));
        cards
    }

    pub fn tasks_for_card(&self, card_id: &EntityId) -> Vec<&Task> {
        let mut tasks: Vec<_> = self.tasks.iter().filter(|t| &t.card_id == card_id).collect();
        tasks.sort_by(|a, b| a.position.total_cmp(&b.position));
        tasks
    }

    /// Position after the last card of a list.
    pub fn next_card_position(&self, list_id: &EntityId) -> f64 {
        self.cards_in_list(list_id)
            .last()
            .map_or(POSITION_GAP, |c| c.position + POSITION_GAP)
    }

    /// Position after the last task of a card.
    pub fn next_task_position(&self, card_id: &EntityId) -> f64 {
        self.tasks_for_card(card_id)
            .last()
            .map_or(POSITION_GAP, |t| t.position + POSITION_GAP)
    }

    /// Returns true if any entity still carries a local identifier.
    pub fn has_local_ids(&self) -> bool {
        self.cards
            .iter()
            .any(|c| c.id.is_local() || c.list_id.is_local())
            || self
                .tasks
                .iter()
                .any(|t| t.id.is_local() || t.card_id.is_local())
    }

    // Mutations

    pub fn insert_list(&mut self, list: List) {
        self.lists.insert(list);
    }

    pub fn insert_label(&mut self, label: Label) {
        self.labels.insert(label);
    }

    pub fn insert_member(&mut self, member: Member) {
        self.members.insert(member);
    }

    /// Inserts or replaces a card.
    pub fn insert_card(&mut self, card: Card) -> Option<Card> {
        self.cards.insert(card)
    }

    pub fn card_mut(&mut self, id: &EntityId) -> Option<&mut Card> {
        self.cards.get_mut(id)
    }

    /// Removes a card together with its tasks.
    pub fn remove_card(&mut self, id: &EntityId) -> Option<(Card, Vec<Task>)> {
        let card = self.cards.remove(id)?;
        let task_ids: Vec<_> = self
            .tasks
            .iter()
            .filter(|t| &t.card_id == id)
            .map(|t| t.id.clone())
            .collect();
        let tasks = task_ids
            .iter()
            .filter_map(|task_id| self.tasks.remove(task_id))
            .collect();
        Some((card, tasks))
    }

    /// Puts back a card removed by [`EntityStore::remove_card`].
    pub fn restore_card(&mut self, card: Card, tasks: Vec<Task>) {
        self.cards.insert(card);
        for task in tasks {
            self.tasks.insert(task);
        }
    }

    /// Inserts or replaces a task.
    pub fn insert_task(&mut self, task: Task) -> Option<Task> {
        self.tasks.insert(task)
    }

    pub fn task_mut(&mut self, id: &EntityId) -> Option<&mut Task> {
        self.tasks.get_mut(id)
    }

    pub fn remove_task(&mut self, id: &EntityId) -> Option<Task> {
        self.tasks.remove(id)
    }

    /// Replaces a locally created card with its server-confirmed record.
    ///
    /// The card is re-keyed to the server identifier, its canonical fields are
    /// taken from `confirmed` and every task pointing at the local identifier
    /// is rewritten. Associations added locally in the meantime are kept.
    /// Returns false if no card is stored under `local_id`.
    pub fn reconcile_card(&mut self, local_id: &EntityId, confirmed: Card) -> bool {
        let server_id = confirmed.id.clone();
        if !self.cards.rekey(local_id, server_id.clone()) {
            return false;
        }
        if let Some(card) = self.cards.get_mut(&server_id) {
            let member_ids = std::mem::take(&mut card.member_ids);
            let label_ids = std::mem::take(&mut card.label_ids);
            *card = confirmed;
            merge_ids(&mut card.member_ids, member_ids);
            merge_ids(&mut card.label_ids, label_ids);
        }
        for task in self.tasks.iter_mut().filter(|t| &t.card_id == local_id) {
            task.card_id = server_id.clone();
        }
        true
    }

    /// Replaces a locally created task with its server-confirmed record.
    pub fn reconcile_task(&mut self, local_id: &EntityId, confirmed: Task) -> bool {
        let server_id = confirmed.id.clone();
        if !self.tasks.rekey(local_id, server_id.clone()) {
            return false;
        }
        if let Some(task) = self.tasks.get_mut(&server_id) {
            *task = confirmed;
        }
        true
    }
}

fn merge_ids(target: &mut Vec<EntityId>, extra: Vec<EntityId>) {
    for id in extra {
        if !target.contains(&id) {
            target.push(id);
        }
    }
}
