//! Planner that replays a plan prepared ahead of time.

use async_trait::async_trait;
use voxboard_core::{BoardContext, CommandPlan, CommandPlanner, Result};

/// Serves a plan from JSON text, standing in for the transcription and
/// planning service.
///
/// A plan without a board context is treated as planned against the board
/// as it is now.
pub struct JsonPlanner {
    raw: String,
}

impl JsonPlanner {
    pub fn new(raw: String) -> Self {
        Self { raw }
    }
}

#[async_trait]
impl CommandPlanner for JsonPlanner {
    async fn plan(&self, context: &BoardContext) -> Result<CommandPlan> {
        let mut plan: CommandPlan = serde_json::from_str(&self.raw)?;
        if plan.board_context.is_none() {
            plan.board_context = Some(context.clone());
        }
        Ok(plan)
    }
}
