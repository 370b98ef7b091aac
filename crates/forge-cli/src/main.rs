//! Forge CLI Application
//!
//! Command-line interface for the Forge project workbench. Each invocation
//! loads the stored projects, runs one command, waits for any scheduled
//! step execution to finish and exits.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use forge_core::{HubClient, ManagerBuilder, ModelSource, Timings, DEFAULT_HUB_URL};
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        instant,
        hub,
        hub_url,
        command,
    } = Args::parse();

    let timings = if instant {
        Timings::instant()
    } else {
        Timings::default()
    };

    let models = if hub || hub_url.is_some() {
        let url = hub_url.unwrap_or_else(|| DEFAULT_HUB_URL.to_string());
        ModelSource::Hub(HubClient::new(url).context("Failed to create model hub client")?)
    } else {
        ModelSource::Catalog
    };

    let manager = ManagerBuilder::new()
        .with_database_path(database_file)
        .with_timings(timings)
        .with_model_source(models)
        .build()
        .await
        .context("Failed to initialize project manager")?;

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(manager.clone(), renderer);

    info!("Forge started");

    let result = match command {
        Some(Project { command }) => cli.handle_project_command(command).await,
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Step { command }) => cli.handle_step_command(command).await,
        Some(File { command }) => cli.handle_file_command(command).await,
        Some(Github { command }) => cli.handle_github_command(command).await,
        Some(Model { command }) => cli.handle_model_command(command).await,
        Some(Exec(args)) => cli.handle_exec(args).await,
        None => cli.list_projects().await,
    };

    manager.wait_idle().await;
    result
}
