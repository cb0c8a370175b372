//! Data models for boards, action plans and execution outcomes.
//!
//! - [`board`]: entities held by the entity store (lists, cards, tasks,
//!   labels, members)
//! - [`action`]: the action plan envelope and the action variants
//! - [`context`]: the read-only board context snapshot
//! - [`outcome`]: per-action outcomes reported by the executor

pub mod action;
pub mod board;
pub mod context;
pub mod outcome;


pub use action::{
    Action, CardLabels, CardMembers, CardRef, CardTasks, CommandPlan, CreateCard, MoveCard,
    TaskRef, UpdateCard,
};
pub use board::{BoardSnapshot, Card, Label, List, Member, Task};
pub use context::{BoardContext, ContextCard, ContextLabel, ContextList, ContextMember, ContextTask};
pub use outcome::{ActionReport, EffectReport, ExecutionReport, Outcome};
