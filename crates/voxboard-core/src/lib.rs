//! Core library of the voxboard voice command pipeline.
//!
//! A spoken command arrives as an action plan (see [`models::CommandPlan`])
//! produced by an external transcription and planning collaborator. This
//! crate applies such plans to a Kanban board:
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  Dispatcher  │──▶│   Executor   │──▶│  Mutations   │──▶│ BoardRemote  │
//! │ (plan/guard) │   │ (saga, one   │   │ (optimistic, │   │ (e.g. the    │
//! │              │   │  action at a │   │  reconcile,  │   │  SQLite      │
//! │              │   │  time)       │   │  rollback)   │   │  service)    │
//! └──────────────┘   └──────┬───────┘   └──────┬───────┘   └──────────────┘
//!                           │ resolver         │
//!                           ▼                  ▼
//!                    BoardContext        EntityStore
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use voxboard_core::{BoardServiceBuilder, CommandDispatcher, CommandPlan};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = BoardServiceBuilder::new()
//!     .with_database_path(Some("board.db"))
//!     .build()
//!     .await?;
//! service.add_list("Planificat").await?;
//!
//! let store = service.load_store().await?.into_shared();
//! let plan: CommandPlan = serde_json::from_str(
//!     r#"{"transcript": "card nou Dacia Logan",
//!         "actions": [{"type": "createCard", "name": "Dacia Logan"}]}"#,
//! )?;
//!
//! let report = CommandDispatcher::new().execute(plan, &store, &service).await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod db;
pub mod dispatcher;
pub mod display;
pub mod error;
pub mod ids;
pub mod models;
pub mod mutations;
pub mod remote;
pub mod resolver;
pub mod saga;
pub mod service;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use db::Database;
pub use dispatcher::{CommandDispatcher, CommandPlanner};
pub use display::{BoardView, CreateResult};
pub use error::{BoardError, Result};
pub use ids::{EntityId, LocalIdAllocator};
pub use models::{
    Action, ActionReport, BoardContext, BoardSnapshot, Card, CommandPlan, EffectReport,
    ExecutionReport, Label, List, Member, Outcome, Task,
};
pub use remote::BoardRemote;
pub use saga::ActionExecutor;
pub use service::{BoardService, BoardServiceBuilder};
pub use store::{EntityStore, SharedStore};
