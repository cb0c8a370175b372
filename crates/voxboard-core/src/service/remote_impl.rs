use async_trait::async_trait;

use super::BoardService;
use crate::{
    error::Result,
    ids::EntityId,
    models::{Card, Task},
    remote::{BoardRemote, CardData, CardPatch, TaskData, TaskPatch},
};

#[async_trait]
impl BoardRemote for BoardService {
    async fn create_card(&self, list_id: &EntityId, data: &CardData) -> Result<Card> {
        let (list_id, data) = (list_id.clone(), data.clone());
        self.with_db(move |db| db.insert_card(&list_id, &data)).await
    }

    async fn update_card(&self, card_id: &EntityId, patch: &CardPatch) -> Result<Card> {
        let (card_id, patch) = (card_id.clone(), patch.clone());
        self.with_db(move |db| db.update_card(&card_id, &patch)).await
    }

    async fn move_card(&self, card_id: &EntityId, list_id: &EntityId, position: f64) -> Result<Card> {
        let (card_id, list_id) = (card_id.clone(), list_id.clone());
        self.with_db(move |db| db.move_card(&card_id, &list_id, position))
            .await
    }

    async fn delete_card(&self, card_id: &EntityId) -> Result<()> {
        let card_id = card_id.clone();
        self.with_db(move |db| db.delete_card(&card_id)).await
    }

    async fn create_task(&self, card_id: &EntityId, data: &TaskData) -> Result<Task> {
        let (card_id, data) = (card_id.clone(), data.clone());
        self.with_db(move |db| db.insert_task(&card_id, &data)).await
    }

    async fn update_task(&self, task_id: &EntityId, patch: &TaskPatch) -> Result<Task> {
        let (task_id, patch) = (task_id.clone(), patch.clone());
        self.with_db(move |db| db.update_task(&task_id, &patch)).await
    }

    async fn add_card_member(&self, card_id: &EntityId, member_id: &EntityId) -> Result<()> {
        let (card_id, member_id) = (card_id.clone(), member_id.clone());
        self.with_db(move |db| db.add_card_member(&card_id, &member_id))
            .await
    }

    async fn remove_card_member(&self, card_id: &EntityId, member_id: &EntityId) -> Result<()> {
        let (card_id, member_id) = (card_id.clone(), member_id.clone());
        self.with_db(move |db| db.remove_card_member(&card_id, &member_id))
            .await
    }

    async fn add_card_label(&self, card_id: &EntityId, label_id: &EntityId) -> Result<()> {
        let (card_id, label_id) = (card_id.clone(), label_id.clone());
        self.with_db(move |db| db.add_card_label(&card_id, &label_id))
            .await
    }

    async fn remove_card_label(&self, card_id: &EntityId, label_id: &EntityId) -> Result<()> {
        let (card_id, label_id) = (card_id.clone(), label_id.clone());
        self.with_db(move |db| db.remove_card_label(&card_id, &label_id))
            .await
    }
}
