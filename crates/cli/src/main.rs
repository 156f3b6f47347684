// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dw - DevWorkspace lifecycle CLI

mod color;
mod commands;
mod env;
mod exit_error;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::commands::{connect, watch, workspace, Context};
use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "dw", version, about = "Create, edit and watch DevWorkspaces", styles = color::styles())]
struct Cli {
    /// Namespace to operate in (default: $DW_NAMESPACE or "default")
    #[arg(short, long, global = true)]
    namespace: Option<String>,

    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value_t)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List workspaces
    List,
    /// Show a workspace, waiting for it to report its status
    Get {
        name: String,
        /// Show the current state without waiting
        #[arg(long)]
        no_wait: bool,
    },
    /// Create and start a workspace from a devfile
    Create {
        devfile: PathBuf,
        /// Plugin devfile to attach (repeatable)
        #[arg(short, long = "plugin")]
        plugins: Vec<PathBuf>,
        /// Project checkout holding .che/che-theia-plugins.yaml or .vscode/extensions.json
        #[arg(long)]
        project_dir: Option<PathBuf>,
    },
    /// Replace a workspace's devfile
    Save {
        name: String,
        devfile: PathBuf,
        /// Plugin devfile to keep attached (repeatable)
        #[arg(short, long = "plugin")]
        plugins: Vec<PathBuf>,
        /// For a running workspace, apply the change on its next start
        #[arg(long)]
        defer: bool,
    },
    /// Delete a workspace and its plugin templates
    Delete { name: String },
    /// Start a workspace, applying any deferred changes
    Start {
        name: String,
        /// Plugin devfile to keep attached (repeatable)
        #[arg(short, long = "plugin")]
        plugins: Vec<PathBuf>,
    },
    /// Stop a workspace
    Stop { name: String },
    /// Print status changes until interrupted
    Watch,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let ctx = Context { client: connect(cli.namespace.as_deref()).await?, format: cli.format };
    match command {
        Commands::List => workspace::list(&ctx).await,
        Commands::Get { name, no_wait } => workspace::get(&ctx, &name, no_wait).await,
        Commands::Create { devfile, plugins, project_dir } => {
            workspace::create(&ctx, &devfile, &plugins, project_dir.as_deref()).await
        }
        Commands::Save { name, devfile, plugins, defer } => {
            workspace::save(&ctx, &name, &devfile, &plugins, defer).await
        }
        Commands::Delete { name } => workspace::delete(&ctx, &name).await,
        Commands::Start { name, plugins } => workspace::start(&ctx, &name, &plugins).await,
        Commands::Stop { name } => workspace::stop(&ctx, &name).await,
        Commands::Watch => watch::handle(&ctx).await,
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(e) = run().await {
        let code = match e.downcast_ref::<ExitError>() {
            Some(exit) => exit.code,
            None => 1,
        };
        eprintln!("Error: {:#}", e);
        std::process::exit(code);
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
