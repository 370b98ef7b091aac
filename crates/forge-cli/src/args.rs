use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    ExecArgs, FileCommands, GithubCommands, ModelCommands, PlanCommands, ProjectCommands,
    StepCommands,
};

/// Command-line interface for the Forge project workbench
///
/// Forge keeps software projects with an in-memory file tree, generates a
/// five-step build plan for each and simulates executing it. Projects can
/// carry one AI model and a GitHub connection record.
#[derive(Parser)]
#[command(version, about, name = "forge")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/forge/forge.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Skip the simulated latencies
    #[arg(long, global = true)]
    pub instant: bool,

    /// Search the live model hub instead of the built-in catalog
    #[arg(long, global = true)]
    pub hub: bool,

    /// Model hub base URL; implies --hub
    #[arg(long, global = true, value_name = "URL")]
    pub hub_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Forge CLI
///
/// Without a command, Forge lists the stored projects.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage projects
    #[command(alias = "p")]
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Generate, approve and continue build plans
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Approve or fail individual plan steps
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Inspect and edit a project's file tree
    #[command(alias = "f")]
    File {
        #[command(subcommand)]
        command: FileCommands,
    },
    /// Connect and push to GitHub
    Github {
        #[command(subcommand)]
        command: GithubCommands,
    },
    /// Search, download and remove AI models
    #[command(alias = "m")]
    Model {
        #[command(subcommand)]
        command: ModelCommands,
    },
    /// Run a command in a project's simulated terminal
    Exec(ExecArgs),
}
