//! Member and label actions, standalone or nested in createCard.

use super::{non_blank, ActionExecutor, StepResult};
use crate::{
    ids::EntityId,
    models::{EffectReport, Outcome},
    mutations::Association,
    resolver,
};

impl ActionExecutor<'_> {
    pub(super) async fn associate(
        &mut self,
        kind: Association,
        attach: bool,
        card_name: Option<&str>,
        names: &[String],
    ) -> StepResult {
        let Some(card) = self.resolve_card(card_name) else {
            return StepResult::skipped("card not found");
        };

        let effects = self.attach_named(kind, attach, &card.id, names).await;
        StepResult::from_effects(effects, &format!("no {kind} to change"))
    }

    /// Attaches or detaches each named member or label independently.
    pub(super) async fn attach_named(
        &self,
        kind: Association,
        attach: bool,
        card_id: &EntityId,
        names: &[String],
    ) -> Vec<EffectReport> {
        let mut effects = Vec::with_capacity(names.len());

        for name in names {
            let Some(name) = non_blank(Some(name)) else {
                continue;
            };
            let target = match kind {
                Association::Member => resolver::find_member(self.context, name).map(|m| &m.id),
                Association::Label => resolver::find_label(self.context, name).map(|l| &l.id),
            };

            let outcome = match target {
                None => Outcome::skipped(format!("{kind} not found")),
                Some(target) => {
                    let result = if attach {
                        self.mutations.attach(kind, card_id, target).await
                    } else {
                        self.mutations.detach(kind, card_id, target).await
                    };
                    match result {
                        Ok(()) => Outcome::Applied,
                        Err(e) => Outcome::failed(e),
                    }
                }
            };

            effects.push(EffectReport {
                effect: format!("{kind} {name}"),
                outcome,
            });
        }

        effects
    }
}
