//! Command handlers.

use std::io::Read;

use anyhow::{Context, Result};
use log::info;
use voxboard_core::{
    BoardContext, BoardService, BoardView, CommandDispatcher, CommandPlan, CreateResult,
};

use crate::{
    args::{ApplyArgs, LabelCommands, ListCommands, MemberCommands},
    planner::JsonPlanner,
    renderer::TerminalRenderer,
};

/// Runs CLI commands against one board service.
pub struct Cli {
    service: BoardService,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(service: BoardService, renderer: TerminalRenderer) -> Self {
        Self { service, renderer }
    }

    pub async fn handle_list_command(&self, command: ListCommands) -> Result<()> {
        match command {
            ListCommands::Add { name } => {
                let list = self
                    .service
                    .add_list(&name)
                    .await
                    .context("Failed to add list")?;
                self.renderer.render(&CreateResult::new(list).to_string());
            }
        }
        Ok(())
    }

    pub async fn handle_label_command(&self, command: LabelCommands) -> Result<()> {
        match command {
            LabelCommands::Add { name, color } => {
                let label = self
                    .service
                    .add_label(Some(&name), &color)
                    .await
                    .context("Failed to add label")?;
                self.renderer.render(&CreateResult::new(label).to_string());
            }
        }
        Ok(())
    }

    pub async fn handle_member_command(&self, command: MemberCommands) -> Result<()> {
        match command {
            MemberCommands::Add { name, username } => {
                let member = self
                    .service
                    .add_member(&name, username.as_deref())
                    .await
                    .context("Failed to add member")?;
                self.renderer.render(&CreateResult::new(member).to_string());
            }
        }
        Ok(())
    }

    pub async fn show(&self) -> Result<()> {
        let store = self
            .service
            .load_store()
            .await
            .context("Failed to load board")?;
        self.renderer.render(&BoardView(&store).to_string());
        Ok(())
    }

    pub async fn context(&self) -> Result<()> {
        let store = self
            .service
            .load_store()
            .await
            .context("Failed to load board")?;
        self.renderer.render_json(&BoardContext::from_store(&store))
    }

    pub async fn apply(&self, args: ApplyArgs) -> Result<()> {
        let raw = if args.reads_stdin() {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read plan from standard input")?;
            raw
        } else {
            std::fs::read_to_string(&args.file)
                .with_context(|| format!("Failed to read plan file {}", args.file.display()))?
        };

        let store = self
            .service
            .load_store()
            .await
            .context("Failed to load board")?
            .into_shared();

        info!("Applying plan to {}", self.service.database_path().display());
        let report = CommandDispatcher::new()
            .dispatch(&JsonPlanner::new(raw), &store, &self.service)
            .await
            .context("Nothing was applied")?;

        if args.json {
            self.renderer.render_json(&report)
        } else {
            self.renderer.render(&report.to_string());
            Ok(())
        }
    }

    pub fn schema(&self) -> Result<()> {
        self.renderer.render_json(&schemars::schema_for!(CommandPlan))
    }
}
