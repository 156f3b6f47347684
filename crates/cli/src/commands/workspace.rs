// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dw list|get|create|save|delete|start|stop` - Workspace lifecycle commands

use std::path::{Path, PathBuf};

use anyhow::Result;
use dw_adapters::DevWorkspaceStore;
use dw_core::WorkspaceView;
use dw_engine::{SaveMode, SaveOutcome};

use super::{read_devfile, read_document, read_extra_files, read_plugins, Context};
use crate::color;
use crate::exit_error::{client_error, ExitError};
use crate::output::{print_workspace, print_workspaces, OutputFormat};

pub async fn list(ctx: &Context) -> Result<()> {
    let workspaces = ctx.client.list(ctx.namespace()).await.map_err(client_error)?;
    let views: Vec<WorkspaceView> = workspaces.into_iter().map(WorkspaceView::from).collect();
    print_workspaces(&views, ctx.format)
}

/// Show a workspace. Unless `no_wait`, waits for it to report a usable status.
pub async fn get(ctx: &Context, name: &str, no_wait: bool) -> Result<()> {
    let workspace = if no_wait {
        ctx.client.store().get(ctx.namespace(), name).await?
    } else {
        ctx.client.get_by_name(ctx.namespace(), name).await.map_err(client_error)?
    };
    print_workspace(&WorkspaceView::from(workspace), ctx.format)
}

pub async fn create(
    ctx: &Context,
    devfile: &Path,
    plugins: &[PathBuf],
    project_dir: Option<&Path>,
) -> Result<()> {
    let devfile = read_devfile(devfile)?;
    let plugins = read_plugins(plugins)?;
    let extra_files = read_extra_files(project_dir)?;

    if !ctx.client.initialize_namespace(ctx.namespace()).await {
        eprintln!("warning: namespace {} could not be initialized", ctx.namespace());
    }
    let created =
        ctx.client.create(&devfile, &plugins, &extra_files).await.map_err(client_error)?;
    let view = WorkspaceView::from(created);
    if ctx.format == OutputFormat::Text {
        println!("Workspace '{}' created", color::header(view.name()));
    }
    print_workspace(&view, ctx.format)
}

/// Save an edited devfile over an existing workspace.
///
/// `defer` keeps a running workspace's spec untouched until its next start.
pub async fn save(ctx: &Context, name: &str, path: &Path, plugins: &[PathBuf], defer: bool) -> Result<()> {
    let document = read_document(path)?;
    let plugins = read_plugins(plugins)?;
    let live = ctx.client.store().get(ctx.namespace(), name).await?;
    let view = WorkspaceView::from(live);
    let mode = SaveMode::for_view(&view, !defer);

    match ctx.client.editor().save(&view, document, &plugins, mode).await {
        Ok(SaveOutcome::Unchanged) => {
            println!("Workspace '{}' unchanged", color::header(name));
            Ok(())
        }
        Ok(SaveOutcome::Saved(saved)) => {
            if ctx.format == OutputFormat::Text {
                match mode {
                    SaveMode::Apply => println!("Workspace '{}' updated", color::header(name)),
                    SaveMode::Deferred => println!(
                        "Workspace '{}' updated; changes apply on next start",
                        color::header(name)
                    ),
                }
            }
            print_workspace(&saved, ctx.format)
        }
        Err(e) => {
            // The unsaved document is still the user's file on disk
            let message = format!("{} was not saved: {}", path.display(), e.source);
            match ExitError::from_client(&e.source) {
                Some(exit) => Err(ExitError::new(exit.code, message).into()),
                None => Err(anyhow::Error::new(e).context(message)),
            }
        }
    }
}

pub async fn delete(ctx: &Context, name: &str) -> Result<()> {
    ctx.client.delete(ctx.namespace(), name).await.map_err(client_error)?;
    println!("Workspace '{}' deleted", color::header(name));
    Ok(())
}

pub async fn start(ctx: &Context, name: &str, plugins: &[PathBuf]) -> Result<()> {
    let plugins = read_plugins(plugins)?;
    let workspace = ctx.client.start(ctx.namespace(), name, &plugins).await.map_err(client_error)?;
    if ctx.format == OutputFormat::Text {
        println!("Workspace '{}' starting", color::header(name));
    }
    print_workspace(&WorkspaceView::from(workspace), ctx.format)
}

pub async fn stop(ctx: &Context, name: &str) -> Result<()> {
    ctx.client.stop(ctx.namespace(), name).await.map_err(client_error)?;
    println!("Workspace '{}' stopping", color::header(name));
    Ok(())
}
