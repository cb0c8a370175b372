//! Resolution of spoken names to board entities.
//!
//! Every lookup runs the same two passes over the candidates in board order:
//! a case-insensitive exact match on the name (or username, for members),
//! then a case-insensitive containment match. The first hit of the earliest
//! pass wins, so an exact match always beats a substring match. Ties within a
//! pass go to the candidate that comes first in board order.

use serde::{Deserialize, Serialize};

use crate::{
    ids::EntityId,
    models::{BoardContext, ContextCard, ContextLabel, ContextList, ContextMember, ContextTask},
};

/// A card created earlier in the plan being executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedEntityRef {
    pub id: EntityId,
    pub name: String,
    pub list_id: EntityId,
}

/// A card found by [`find_card`], either from the context or from this plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardMatch {
    pub id: EntityId,
    pub name: String,
    pub list_id: EntityId,
}

/// Something a spoken name can be matched against.
pub trait Candidate {
    /// Primary display name, if the entity has one.
    fn name(&self) -> Option<&str>;

    /// Secondary name that also counts for matching.
    fn alias(&self) -> Option<&str> {
        None
    }
}

impl Candidate for ContextList {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Candidate for ContextLabel {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Candidate for ContextMember {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn alias(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

impl Candidate for ContextCard {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Candidate for ContextTask {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Candidate for CreatedEntityRef {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl<T: Candidate + ?Sized> Candidate for &T {
    fn name(&self) -> Option<&str> {
        (**self).name()
    }

    fn alias(&self) -> Option<&str> {
        (**self).alias()
    }
}

/// Returns the best match for `query` among `candidates`.
pub fn find_best<I, T>(candidates: I, query: &str) -> Option<T>
where
    I: IntoIterator<Item = T>,
    T: Candidate,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let candidates: Vec<T> = candidates.into_iter().collect();
    let names = |c: &T| {
        [c.name(), c.alias()]
            .into_iter()
            .flatten()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
    };

    let exact = candidates
        .iter()
        .position(|c| names(c).iter().any(|n| *n == needle));
    let index = exact.or_else(|| {
        candidates
            .iter()
            .position(|c| names(c).iter().any(|n| n.contains(&needle)))
    })?;

    candidates.into_iter().nth(index)
}

/// Resolves a list by name.
pub fn find_list<'a>(context: &'a BoardContext, name: &str) -> Option<&'a ContextList> {
    find_best(&context.lists, name)
}

/// Resolves a label by name.
pub fn find_label<'a>(context: &'a BoardContext, name: &str) -> Option<&'a ContextLabel> {
    find_best(&context.labels, name)
}

/// Resolves a member by name or username.
pub fn find_member<'a>(context: &'a BoardContext, name: &str) -> Option<&'a ContextMember> {
    find_best(&context.members, name)
}

/// Resolves a card among the context cards and the cards created earlier in
/// the current plan, context cards first.
pub fn find_card(
    context: &BoardContext,
    created: &[CreatedEntityRef],
    name: &str,
) -> Option<CardMatch> {
    enum Either<'a> {
        Context(&'a ContextCard),
        Created(&'a CreatedEntityRef),
    }

    impl Candidate for Either<'_> {
        fn name(&self) -> Option<&str> {
            match self {
                Either::Context(c) => c.name(),
                Either::Created(c) => c.name(),
            }
        }
    }

    let candidates = context
        .cards
        .iter()
        .map(Either::Context)
        .chain(created.iter().map(Either::Created));

    find_best(candidates, name).map(|hit| match hit {
        Either::Context(c) => CardMatch {
            id: c.id.clone(),
            name: c.name.clone(),
            list_id: c.list_id.clone(),
        },
        Either::Created(c) => CardMatch {
            id: c.id.clone(),
            name: c.name.clone(),
            list_id: c.list_id.clone(),
        },
    })
}

/// Resolves a task, optionally only within the card named `card_name`.
///
/// Without a card scope all tasks of the board are searched in board order.
/// A card scope that does not resolve yields no task.
pub fn find_task<'a>(
    cards: &'a [ContextCard],
    task_name: &str,
    card_name: Option<&str>,
) -> Option<&'a ContextTask> {
    let scope: Vec<&ContextCard> = match card_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(card_name) => find_best(cards, card_name).into_iter().collect(),
        None => cards.iter().collect(),
    };

    find_best(scope.into_iter().flat_map(|c| c.tasks.iter()), task_name)
}
