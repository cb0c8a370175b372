//! voxboard CLI application
//!
//! Command-line front-end of the voice command pipeline: manages a local
//! board database and applies action plans to it.

mod args;
mod cli;
mod planner;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use voxboard_core::BoardServiceBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let service = BoardServiceBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize board database")?;

    let cli = Cli::new(service, TerminalRenderer::new(!no_color));

    info!("voxboard started");

    match command {
        Some(Commands::List { command }) => cli.handle_list_command(command).await,
        Some(Commands::Label { command }) => cli.handle_label_command(command).await,
        Some(Commands::Member { command }) => cli.handle_member_command(command).await,
        Some(Commands::Context) => cli.context().await,
        Some(Commands::Apply(args)) => cli.apply(args).await,
        Some(Commands::Schema) => cli.schema(),
        Some(Commands::Show) | None => cli.show().await,
    }
}
