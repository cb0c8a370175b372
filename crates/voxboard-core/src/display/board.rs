//! Board rendering.

use std::fmt;

use super::format_due_date;
use crate::{
    codec,
    models::{Card, Label, List, Member},
    store::EntityStore,
};

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**List:** {}", self.name)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => writeln!(f, "**Label:** {name} ({})", self.color),
            None => writeln!(f, "**Label:** _unnamed_ ({})", self.color),
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.username {
            Some(username) => writeln!(f, "**Member:** {} (@{username})", self.name),
            None => writeln!(f, "**Member:** {}", self.name),
        }
    }
}

/// Newtype wrapper rendering every list of a board with its cards, followed
/// by the board's labels and members.
pub struct BoardView<'a>(pub &'a EntityStore);

impl BoardView<'_> {
    fn write_card(&self, f: &mut fmt::Formatter<'_>, card: &Card) -> fmt::Result {
        let store = self.0;
        writeln!(f, "### {}", card.name)?;
        writeln!(f)?;
        writeln!(f, "- **ID:** {}", card.id)?;
        if let Some(due_date) = card.due_date {
            writeln!(f, "- **Due:** {}", format_due_date(due_date))?;
        }

        let description = codec::Description::from_raw(card.description.as_deref()).fields;
        if let Some(client) = &description.client_name {
            writeln!(f, "- **Client:** {client}")?;
        }
        if let Some(phone) = &description.phone_no {
            writeln!(f, "- **Phone:** {phone}")?;
        }
        if let Some(resource) = &description.resource_id {
            writeln!(f, "- **Resource:** {resource}")?;
        }

        let members: Vec<&str> = card
            .member_ids
            .iter()
            .filter_map(|id| store.member(id))
            .map(|m| m.name.as_str())
            .collect();
        if !members.is_empty() {
            writeln!(f, "- **Members:** {}", members.join(", "))?;
        }
        let labels: Vec<&str> = card
            .label_ids
            .iter()
            .filter_map(|id| store.label(id))
            .map(|l| l.name.as_deref().unwrap_or(l.color.as_str()))
            .collect();
        if !labels.is_empty() {
            writeln!(f, "- **Labels:** {}", labels.join(", "))?;
        }

        if let Some(note) = &description.description {
            writeln!(f)?;
            writeln!(f, "{note}")?;
        }

        let tasks = store.tasks_for_card(&card.id);
        if !tasks.is_empty() {
            writeln!(f)?;
            for task in tasks {
                let mark = if task.is_completed { "x" } else { " " };
                writeln!(f, "- [{mark}] {}", task.name)?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.0;
        let lists = store.lists_in_order();
        if lists.is_empty() {
            return writeln!(f, "_The board has no lists yet._");
        }

        for list in lists {
            writeln!(f, "## {}", list.name)?;
            writeln!(f)?;
            let cards = store.cards_in_list(&list.id);
            if cards.is_empty() {
                writeln!(f, "_No cards._")?;
                writeln!(f)?;
            }
            for card in cards {
                self.write_card(f, card)?;
            }
        }

        let labels = store.labels_in_order();
        if !labels.is_empty() {
            writeln!(f, "## Labels")?;
            writeln!(f)?;
            for label in labels {
                writeln!(
                    f,
                    "- {} ({})",
                    label.name.as_deref().unwrap_or("_unnamed_"),
                    label.color
                )?;
            }
            writeln!(f)?;
        }

        let mut members = store.members().peekable();
        if members.peek().is_some() {
            writeln!(f, "## Members")?;
            writeln!(f)?;
            for member in members {
                match &member.username {
                    Some(username) => writeln!(f, "- {} (@{username})", member.name)?,
                    None => writeln!(f, "- {}", member.name)?,
                }
            }
        }
        Ok(())
    }
}
