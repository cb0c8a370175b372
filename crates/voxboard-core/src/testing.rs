//! In-memory remote and board fixtures for unit tests.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;

use crate::{
    error::{BoardError, Result},
    ids::EntityId,
    models::{BoardSnapshot, Card, Label, List, Member, Task},
    remote::{BoardRemote, CardData, CardPatch, TaskData, TaskPatch},
    store::POSITION_GAP,
};

/// Remote that keeps cards and tasks in memory and records every call.
///
/// A call fails when its log line contains one of the patterns registered
/// with [`FakeRemote::fail_on`].
#[derive(Default)]
pub(crate) struct FakeRemote {
    next_id: AtomicU64,
    cards: Mutex<HashMap<EntityId, Card>>,
    tasks: Mutex<HashMap<EntityId, Task>>,
    failures: Mutex<Vec<String>>,
    calls: Mutex<Vec<String>>,
}

impl FakeRemote {
    pub(crate) fn new(snapshot: &BoardSnapshot) -> Self {
        let remote = Self {
            next_id: AtomicU64::new(1000),
            ..Default::default()
        };
        for card in &snapshot.cards {
            remote.cards.lock().unwrap().insert(card.id.clone(), card.clone());
        }
        for task in &snapshot.tasks {
            remote.tasks.lock().unwrap().insert(task.id.clone(), task.clone());
        }
        remote
    }

    pub(crate) fn fail_on(&self, pattern: &str) {
        self.failures.lock().unwrap().push(pattern.to_string());
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call.clone());
        if self.failures.lock().unwrap().iter().any(|p| call.contains(p.as_str())) {
            return Err(BoardError::Configuration {
                message: format!("injected failure: {call}"),
            });
        }
        Ok(())
    }

    fn next_id(&self) -> EntityId {
        EntityId::server(self.next_id.fetch_add(1, Ordering::Relaxed).to_string())
    }

    fn card(&self, id: &EntityId) -> Result<Card> {
        self.cards
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| BoardError::NotFound {
                kind: "Card",
                id: id.to_string(),
            })
    }
}

#[async_trait]
impl BoardRemote for FakeRemote {
    async fn create_card(&self, list_id: &EntityId, data: &CardData) -> Result<Card> {
        self.record(format!("create_card {}", data.name))?;
        let card = Card {
            id: self.next_id(),
            list_id: list_id.clone(),
            name: data.name.clone(),
            description: data.description.clone(),
            due_date: data.due_date,
            position: data.position,
            member_ids: Vec::new(),
            label_ids: Vec::new(),
        };
        self.cards.lock().unwrap().insert(card.id.clone(), card.clone());
        Ok(card)
    }

    async fn update_card(&self, card_id: &EntityId, patch: &CardPatch) -> Result<Card> {
        self.record(format!("update_card {card_id}"))?;
        let mut card = self.card(card_id)?;
        patch.apply_to(&mut card);
        self.cards.lock().unwrap().insert(card.id.clone(), card.clone());
        Ok(card)
    }

    async fn move_card(&self, card_id: &EntityId, list_id: &EntityId, position: f64) -> Result<Card> {
        self.record(format!("move_card {card_id} {list_id}"))?;
        let mut card = self.card(card_id)?;
        card.list_id = list_id.clone();
        card.position = position;
        self.cards.lock().unwrap().insert(card.id.clone(), card.clone());
        Ok(card)
    }

    async fn delete_card(&self, card_id: &EntityId) -> Result<()> {
        self.record(format!("delete_card {card_id}"))?;
        self.cards.lock().unwrap().remove(card_id);
        Ok(())
    }

    async fn create_task(&self, card_id: &EntityId, data: &TaskData) -> Result<Task> {
        self.record(format!("create_task {card_id} {}", data.name))?;
        self.card(card_id)?;
        let task = Task {
            id: self.next_id(),
            card_id: card_id.clone(),
            name: data.name.clone(),
            is_completed: false,
            position: data.position,
        };
        self.tasks.lock().unwrap().insert(task.id.clone(), task.clone());
        Ok(task)
    }

    async fn update_task(&self, task_id: &EntityId, patch: &TaskPatch) -> Result<Task> {
        self.record(format!("update_task {task_id} {:?}", patch.is_completed))?;
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks.get_mut(task_id).ok_or_else(|| BoardError::NotFound {
            kind: "Task",
            id: task_id.to_string(),
        })?;
        patch.apply_to(task);
        Ok(task.clone())
    }

    async fn add_card_member(&self, card_id: &EntityId, member_id: &EntityId) -> Result<()> {
        self.record(format!("add_card_member {card_id} {member_id}"))
    }

    async fn remove_card_member(&self, card_id: &EntityId, member_id: &EntityId) -> Result<()> {
        self.record(format!("remove_card_member {card_id} {member_id}"))
    }

    async fn add_card_label(&self, card_id: &EntityId, label_id: &EntityId) -> Result<()> {
        self.record(format!("add_card_label {card_id} {label_id}"))
    }

    async fn remove_card_label(&self, card_id: &EntityId, label_id: &EntityId) -> Result<()> {
        self.record(format!("remove_card_label {card_id} {label_id}"))
    }
}

fn card(id: &str, list_id: &str, name: &str, position: f64, description: Option<&str>) -> Card {
    Card {
        id: EntityId::server(id),
        list_id: EntityId::server(list_id),
        name: name.to_string(),
        description: description.map(String::from),
        due_date: None,
        position,
        member_ids: Vec::new(),
        label_ids: Vec::new(),
    }
}

fn task(id: &str, card_id: &str, name: &str, position: f64) -> Task {
    Task {
        id: EntityId::server(id),
        card_id: EntityId::server(card_id),
        name: name.to_string(),
        is_completed: false,
        position,
    }
}

/// A small auto-shop board.
///
/// Lists `Planificat` (1) and `In lucru` (2); cards `BMW X5` (10, plain-text
/// note), `BMW X3` (11, JSON description) and `Audi Q7` (12, in list 2);
/// members Andrei (m1, username `andrei`) and Maria (m2); labels `Urgent`
/// (l1) and `Garantie` (l2).
pub(crate) fn sample_board() -> BoardSnapshot {
    BoardSnapshot {
        lists: vec![
            List {
                id: EntityId::server("1"),
                name: "Planificat".to_string(),
                position: POSITION_GAP,
            },
            List {
                id: EntityId::server("2"),
                name: "In lucru".to_string(),
                position: 2.0 * POSITION_GAP,
            },
        ],
        cards: vec![
            card("10", "1", "BMW X5", POSITION_GAP, Some("Suna clientul")),
            card(
                "11",
                "1",
                "BMW X3",
                2.0 * POSITION_GAP,
                Some(r#"{"clientName":"Ion","phoneNo":"0711"}"#),
            ),
            card("12", "2", "Audi Q7", POSITION_GAP, None),
        ],
        tasks: vec![
            task("20", "10", "PPF capota", POSITION_GAP),
            task("21", "11", "PPF capota", POSITION_GAP),
            task("22", "11", "Polish faruri", 2.0 * POSITION_GAP),
        ],
        labels: vec![
            Label {
                id: EntityId::server("l1"),
                name: Some("Urgent".to_string()),
                color: "berry-red".to_string(),
                position: POSITION_GAP,
            },
            Label {
                id: EntityId::server("l2"),
                name: Some("Garantie".to_string()),
                color: "lagoon-blue".to_string(),
                position: 2.0 * POSITION_GAP,
            },
        ],
        members: vec![
            Member {
                id: EntityId::server("m1"),
                name: "Andrei Popescu".to_string(),
                username: Some("andrei".to_string()),
            },
            Member {
                id: EntityId::server("m2"),
                name: "Maria Ionescu".to_string(),
                username: None,
            },
        ],
    }
}
