//! createCard, updateCard, moveCard and deleteCard.

use log::debug;

use super::{non_blank, parse_due_date, ActionExecutor, StepResult};
use crate::{
    codec::{self, Description, DescriptionPatch, Encoding, StructuredDescription},
    ids::EntityId,
    models::{action, ContextCard},
    mutations::{Association, CardDraft},
    remote::CardPatch,
    resolver::{self, CardMatch, CreatedEntityRef},
};

impl ActionExecutor<'_> {
    pub(super) fn resolve_card(&self, name: Option<&str>) -> Option<CardMatch> {
        resolver::find_card(self.context, &self.created, non_blank(name)?)
    }

    pub(super) async fn create_card(&mut self, action: &action::CreateCard) -> StepResult {
        let Some(name) = non_blank(action.name.as_deref()) else {
            return StepResult::skipped("card name missing");
        };

        let context = self.context;
        let list = non_blank(action.list_name.as_deref())
            .and_then(|list_name| resolver::find_list(context, list_name))
            .or_else(|| context.lists.first());
        let Some(list) = list else {
            return StepResult::skipped("board has no lists");
        };

        let patch = DescriptionPatch::from_fields(
            action.client_name.as_deref(),
            action.phone_no.as_deref(),
            action.resource_id.as_ref(),
            action.description.as_deref(),
        );
        let draft = CardDraft {
            name: name.to_string(),
            description: (!patch.is_empty())
                .then(|| codec::encode(&Description::empty(), &patch))
                .filter(|d| !d.is_empty()),
            due_date: action.due_date.as_deref().and_then(parse_due_date),
        };

        let card = match self.mutations.create_card(&list.id, draft).await {
            Ok(card) => card,
            Err(e) => return StepResult::failed(e),
        };
        debug!("Created card '{}' as {} in list '{}'", card.name, card.id, list.name);

        self.created.push(CreatedEntityRef {
            id: card.id.clone(),
            name: card.name.clone(),
            list_id: card.list_id.clone(),
        });

        let mut effects = self
            .attach_named(Association::Member, true, &card.id, &action.member_names)
            .await;
        effects.extend(
            self.attach_named(Association::Label, true, &card.id, &action.label_names)
                .await,
        );
        effects.extend(self.create_named_tasks(&card.id, &action.tasks).await);

        StepResult::applied().with_effects(effects)
    }

    pub(super) async fn update_card(&mut self, action: &action::UpdateCard) -> StepResult {
        let Some(card) = self.resolve_card(action.card_name.as_deref()) else {
            return StepResult::skipped("card not found");
        };

        let mut patch = CardPatch {
            name: non_blank(action.name.as_deref()).map(String::from),
            description: None,
            due_date: action.due_date.as_deref().and_then(parse_due_date),
        };

        let fields = DescriptionPatch::from_fields(
            action.client_name.as_deref(),
            action.phone_no.as_deref(),
            action.resource_id.as_ref(),
            action.description.as_deref(),
        );
        if !fields.is_empty() {
            let existing = self.current_description(&card.id).await;
            if existing.encoding == Encoding::Json {
                patch.description = Some(codec::encode(&existing, &fields));
            } else {
                if fields.has_structured_fields() {
                    debug!("Card {} has a plain-text description, dropping structured fields", card.id);
                }
                patch.description = fields.description;
            }
        }

        if patch.is_empty() {
            return StepResult::skipped("nothing to update");
        }

        let result = self.mutations.update_card(&card.id, &patch).await;
        if let Ok(updated) = &result {
            if let Some(created) = self.created.iter_mut().find(|c| c.id == updated.id) {
                created.name = updated.name.clone();
            }
        }
        StepResult::from_result(result)
    }

    pub(super) async fn move_card(&mut self, action: &action::MoveCard) -> StepResult {
        let Some(card) = self.resolve_card(action.card_name.as_deref()) else {
            return StepResult::skipped("card not found");
        };
        let context = self.context;
        let Some(list) = non_blank(action.list_name.as_deref())
            .and_then(|list_name| resolver::find_list(context, list_name))
        else {
            return StepResult::skipped("list not found");
        };

        let result = self.mutations.move_card(&card.id, &list.id).await;
        if result.is_ok() {
            if let Some(created) = self.created.iter_mut().find(|c| c.id == card.id) {
                created.list_id = list.id.clone();
            }
        }
        StepResult::from_result(result)
    }

    pub(super) async fn delete_card(&mut self, action: &action::CardRef) -> StepResult {
        let Some(card) = self.resolve_card(action.card_name.as_deref()) else {
            return StepResult::skipped("card not found");
        };

        let result = self.mutations.delete_card(&card.id).await;
        if result.is_ok() {
            self.created.retain(|c| c.id != card.id);
        }
        StepResult::from_result(result)
    }

    /// The description a card update merges into.
    ///
    /// Whether a card uses the structured encoding is decided by the board
    /// context. Cards created during this plan are not in the context, so
    /// their stored value decides instead.
    async fn current_description(&self, card_id: &EntityId) -> Description {
        let stored = {
            let store = self.store.read().await;
            store.card(card_id).and_then(|c| c.description.clone())
        };

        match self.context.card(card_id) {
            Some(known) if !known.is_json_description => Description {
                fields: StructuredDescription {
                    description: known.description.clone(),
                    ..Default::default()
                },
                encoding: Encoding::Plain,
            },
            Some(known) => match stored.as_deref().map(codec::decode) {
                Some(decoded) if decoded.encoding == Encoding::Json => decoded,
                _ => context_description(known),
            },
            None => codec::decode(stored.as_deref().unwrap_or_default()),
        }
    }
}

fn context_description(card: &ContextCard) -> Description {
    Description {
        fields: StructuredDescription {
            client_name: card.client_name.clone(),
            phone_no: card.phone_no.clone(),
            resource_id: card.resource_id.clone(),
            description: card.description.clone(),
            extra: Default::default(),
        },
        encoding: Encoding::Json,
    }
}
