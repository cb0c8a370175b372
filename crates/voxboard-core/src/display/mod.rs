//! Markdown formatting for boards, setup results and execution reports.
//!
//! Domain types implement [`std::fmt::Display`] directly where there is one
//! obvious rendering ([`Outcome`](crate::models::Outcome),
//! [`ExecutionReport`](crate::models::ExecutionReport), lists, labels,
//! members). Wrappers cover the cases that need more context:
//!
//! - [`BoardView`]: a whole board read from an entity store
//! - [`CreateResult`]: confirmation of a setup operation
//!
//! The CLI renders all of it through its terminal renderer.

use std::fmt;

use jiff::civil::DateTime;

use crate::models::{Label, List, Member};

pub mod board;
pub mod report;

pub use board::BoardView;

/// Wrapper type for displaying the result of create operations.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<List> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created list with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Label> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created label with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Member> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created member with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Formats a due date the way it is shown on cards.
pub fn format_due_date(due_date: DateTime) -> String {
    due_date.strftime("%Y-%m-%d %H:%M").to_string()
}
