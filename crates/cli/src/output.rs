// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use dw_core::{StatusUpdate, WorkspaceView};
use dw_engine::WorkspaceEvent;
use serde::Serialize;

use crate::color;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Machine-readable form of a workspace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkspaceSummary {
    pub id: String,
    pub name: String,
    pub namespace: String,
    pub status: Option<String>,
    pub created: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ide_url: Option<String>,
    pub projects: Vec<String>,
}

impl From<&WorkspaceView> for WorkspaceSummary {
    fn from(view: &WorkspaceView) -> Self {
        Self {
            id: view.id().to_string(),
            name: view.name().to_string(),
            namespace: view.namespace().to_string(),
            status: view.status().map(|p| p.to_string()),
            created: view.created(),
            ide_url: view.ide_url().map(str::to_string),
            projects: view.project_names(),
        }
    }
}

/// Format an epoch-millisecond timestamp as UTC, `-` when unknown.
pub fn format_created(epoch_ms: u64) -> String {
    if epoch_ms == 0 {
        return "-".to_string();
    }
    i64::try_from(epoch_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn print_workspaces(views: &[WorkspaceView], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            if views.is_empty() {
                println!("No workspaces found");
                return Ok(());
            }
            let width = views.iter().map(|v| v.name().len()).max().unwrap_or(0).max("NAME".len());
            println!("{:<width$}  {:<8}  {:<19}  ID", "NAME", "STATUS", "CREATED");
            for view in views {
                // Pad before coloring so escape codes do not skew the columns
                let status = view.status().map(|p| p.to_string()).unwrap_or_else(|| "-".to_string());
                let pad = " ".repeat(8usize.saturating_sub(status.len()));
                println!(
                    "{}  {}{}  {:<19}  {}",
                    color::header(&format!("{:<width$}", view.name())),
                    color::phase(view.status().as_ref()),
                    pad,
                    format_created(view.created()),
                    color::muted(view.id()),
                );
            }
        }
        OutputFormat::Json => {
            let summaries: Vec<WorkspaceSummary> = views.iter().map(WorkspaceSummary::from).collect();
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
    }
    Ok(())
}

pub fn print_workspace(view: &WorkspaceView, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{} {}", color::header(view.name()), color::muted(&format!("({})", view.id())));
            println!("  Namespace: {}", view.namespace());
            println!("  Status:    {}", color::phase(view.status().as_ref()));
            println!("  Created:   {}", format_created(view.created()));
            if let Some(url) = view.ide_url() {
                println!("  IDE:       {}", url);
            }
            let projects = view.project_names();
            if !projects.is_empty() {
                println!("  Projects:  {}", projects.join(", "));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&WorkspaceSummary::from(view))?);
        }
    }
    Ok(())
}

/// One line per reconciliation event
pub fn format_event(event: &WorkspaceEvent) -> String {
    match event {
        WorkspaceEvent::Status { workspace, update } => {
            let mut line = format!("{} {}", color::header(workspace.name()), status_change(update));
            if let Some(message) = &update.message {
                line.push_str(&format!(": {}", message));
            }
            if let Some(error) = &update.error {
                line.push_str(&format!(" (error: {})", error));
            }
            line
        }
        WorkspaceEvent::Added(workspaces) => {
            let names: Vec<&str> = workspaces.iter().map(|w| w.name()).collect();
            format!("+ {}", names.join(", "))
        }
        WorkspaceEvent::Removed(ids) => format!("- {}", ids.join(", ")),
    }
}

fn status_change(update: &StatusUpdate) -> String {
    match &update.prev_status {
        Some(prev) if prev != &update.status => {
            format!("{} -> {}", prev, color::phase(Some(&update.status)))
        }
        _ => color::phase(Some(&update.status)),
    }
}

pub fn print_event(event: &WorkspaceEvent, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", format_event(event)),
        OutputFormat::Json => {
            let value = match event {
                WorkspaceEvent::Status { workspace, update } => serde_json::json!({
                    "event": "status",
                    "name": workspace.name(),
                    "update": update,
                }),
                WorkspaceEvent::Added(workspaces) => serde_json::json!({
                    "event": "added",
                    "ids": workspaces.iter().map(|w| w.workspace_id()).collect::<Vec<_>>(),
                }),
                WorkspaceEvent::Removed(ids) => serde_json::json!({"event": "removed", "ids": ids}),
            };
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}
