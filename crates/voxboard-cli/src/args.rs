//! Command-line interface definitions using clap.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// Apply voice command action plans to a local Kanban board
///
/// The board lives in a SQLite database. Lists, labels and members are set
/// up with the `list`, `label` and `member` commands; cards and tasks are
/// changed by applying action plans produced by a transcription and
/// planning service.
#[derive(Parser)]
#[command(version, about, name = "voxboard")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/voxboard/board.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without a command the board is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage lists
    #[command(alias = "l")]
    List {
        #[command(subcommand)]
        command: ListCommands,
    },
    /// Manage labels
    Label {
        #[command(subcommand)]
        command: LabelCommands,
    },
    /// Manage board members
    #[command(alias = "m")]
    Member {
        #[command(subcommand)]
        command: MemberCommands,
    },
    /// Show the board
    Show,
    /// Print the board context handed to the planner, as JSON
    Context,
    /// Apply an action plan
    Apply(ApplyArgs),
    /// Print the JSON schema of the action plan envelope
    Schema,
}

#[derive(Subcommand)]
pub enum ListCommands {
    /// Append a list to the board
    Add {
        /// Name of the list
        name: String,
    },
}

#[derive(Subcommand)]
pub enum LabelCommands {
    /// Add a label
    Add {
        /// Name of the label
        name: String,
        /// Label color
        #[arg(short, long, default_value = "berry-red")]
        color: String,
    },
}

#[derive(Subcommand)]
pub enum MemberCommands {
    /// Add a board member
    Add {
        /// Full name of the member
        name: String,
        /// Username, also matched when resolving spoken names
        #[arg(short, long)]
        username: Option<String>,
    },
}

/// Apply an action plan read from a JSON file
#[derive(ClapArgs)]
pub struct ApplyArgs {
    /// Plan file, or `-` to read from standard input
    pub file: PathBuf,
    /// Print the execution report as JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

impl ApplyArgs {
    /// Returns true when the plan is read from standard input.
    pub fn reads_stdin(&self) -> bool {
        self.file.as_os_str() == "-"
    }
}
