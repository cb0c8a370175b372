//! Entry point of the pipeline: plan a command, then execute the plan.
//!
//! The dispatcher is the only place where the pipeline as a whole can fail.
//! If the planner fails or hands back nothing usable, the store is never
//! touched and [`BoardError::PlanUnavailable`] is returned. Once execution
//! starts, individual action failures end up in the [`ExecutionReport`].

use async_trait::async_trait;
use log::{info, warn};

use crate::{
    error::{BoardError, Result},
    ids::LocalIdAllocator,
    models::{BoardContext, CommandPlan, ExecutionReport},
    remote::BoardRemote,
    saga::ActionExecutor,
    store::SharedStore,
};

/// External transcription and planning collaborator.
#[async_trait]
pub trait CommandPlanner: Send + Sync {
    /// Produces an action plan for one voice command, given the board as it
    /// currently looks.
    async fn plan(&self, context: &BoardContext) -> Result<CommandPlan>;
}

/// Runs voice commands against one board.
///
/// Holds the local identifier allocator, so identifiers stay unique across
/// every plan dispatched through the same instance.
#[derive(Debug, Default)]
pub struct CommandDispatcher {
    ids: LocalIdAllocator,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plans and executes one command.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::PlanUnavailable` if the planner fails or its plan
    /// has no actions.
    pub async fn dispatch(
        &self,
        planner: &dyn CommandPlanner,
        store: &SharedStore,
        remote: &dyn BoardRemote,
    ) -> Result<ExecutionReport> {
        let context = BoardContext::from_store(&*store.read().await);

        let plan = planner.plan(&context).await.map_err(|e| {
            warn!("Planning failed: {e}");
            match e {
                BoardError::PlanUnavailable { .. } => e,
                other => BoardError::plan_unavailable(other.to_string()),
            }
        })?;

        self.execute(plan, store, remote).await
    }

    /// Executes an already obtained plan.
    ///
    /// The plan's own board context is used for resolution when present,
    /// otherwise one is built from the store.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::PlanUnavailable` if the plan has no actions.
    /// Nothing is applied in that case.
    pub async fn execute(
        &self,
        plan: CommandPlan,
        store: &SharedStore,
        remote: &dyn BoardRemote,
    ) -> Result<ExecutionReport> {
        let CommandPlan {
            transcript,
            actions,
            board_context,
        } = plan;

        if actions.is_empty() {
            return Err(BoardError::plan_unavailable("the plan has no actions"));
        }

        let context = match board_context {
            Some(context) => context,
            None => BoardContext::from_store(&*store.read().await),
        };

        info!("Executing {} action(s) for \"{transcript}\"", actions.len());
        let mut executor = ActionExecutor::new(store, remote, &self.ids, &context);
        let actions = executor.execute(&actions).await;

        let report = ExecutionReport {
            transcript,
            actions,
        };
        info!(
            "Plan finished: {} applied, {} skipped, {} failed",
            report.applied(),
            report.skipped(),
            report.failed()
        );
        Ok(report)
    }
}
