// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod watch;
pub mod workspace;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use dw_adapters::{KubeStore, PassthroughResolver};
use dw_core::plugin::{CHE_THEIA_PLUGINS_FILE, VSCODE_EXTENSIONS_FILE};
use dw_core::{Devfile, DevfileDocument, ExtraFiles};
use dw_engine::LifecycleClient;

use crate::output::OutputFormat;

pub type Client = LifecycleClient<KubeStore, PassthroughResolver>;

/// Connect to the cluster from the ambient kubeconfig.
pub async fn connect(namespace: Option<&str>) -> Result<Client> {
    let store = KubeStore::new().await.context("failed to connect to the cluster")?;
    Ok(LifecycleClient::new(
        std::sync::Arc::new(store),
        std::sync::Arc::new(PassthroughResolver),
        crate::env::client_config(namespace),
    ))
}

/// What every command needs besides its own arguments
pub struct Context {
    pub client: Client,
    pub format: OutputFormat,
}

impl Context {
    pub fn namespace(&self) -> &str {
        &self.client.config().namespace
    }
}

/// Read a devfile from YAML or JSON.
pub fn read_devfile(path: &Path) -> Result<Devfile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml_ng::from_str(&contents)
        .with_context(|| format!("{} is not a valid devfile", path.display()))
}

/// Read a devfile as an opaque document, as the editor sees it.
pub fn read_document(path: &Path) -> Result<DevfileDocument> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_yaml_ng::from_str(&contents)
        .with_context(|| format!("{} is not valid YAML or JSON", path.display()))?;
    Ok(DevfileDocument::new(value))
}

pub fn read_plugins(paths: &[PathBuf]) -> Result<Vec<Devfile>> {
    paths.iter().map(|p| read_devfile(p)).collect()
}

/// Collect the optional plugin list files from a project checkout.
pub fn read_extra_files(project_dir: Option<&Path>) -> Result<ExtraFiles> {
    let mut files = ExtraFiles::new();
    let Some(dir) = project_dir else {
        return Ok(files);
    };
    for relative in [CHE_THEIA_PLUGINS_FILE, VSCODE_EXTENSIONS_FILE] {
        let path = dir.join(relative);
        if !path.is_file() {
            continue;
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        tracing::debug!(file = relative, "including project file");
        files.insert(relative, contents);
    }
    Ok(files)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
