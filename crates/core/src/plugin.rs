// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plugin naming, sidecar policy and environment propagation.

use std::collections::BTreeMap;

use crate::devfile::{Devfile, EnvVar};

/// Dashboard origin, always injected into plugin containers
pub const DASHBOARD_URL_ENV: &str = "CHE_DASHBOARD_URL";

/// Plugin registry URL, injected when one is configured
pub const PLUGIN_REGISTRY_URL_ENV: &str = "CHE_PLUGIN_REGISTRY_URL";

/// Devfile attribute selecting the sidecar policy
pub const SIDECAR_POLICY_ATTRIBUTE: &str = "che-theia.eclipse.org/sidecar-policy";

/// Project file listing che-theia plugins
pub const CHE_THEIA_PLUGINS_FILE: &str = ".che/che-theia-plugins.yaml";

/// Project file listing recommended VS Code extensions
pub const VSCODE_EXTENSIONS_FILE: &str = ".vscode/extensions.json";

/// Deterministic template name for a plugin within one workspace.
///
/// Spaces become dashes, the result is lower-cased and the workspace id is
/// appended verbatim: `("My Plugin", "abc123")` → `my-plugin-abc123`.
pub fn normalize_plugin_name(plugin_name: &str, workspace_id: &str) -> String {
    format!("{}-{}", plugin_name.replace(' ', "-").to_lowercase(), workspace_id)
}

/// Where injected tooling runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SidecarPolicy {
    /// Tooling runs inside the user's own dev container
    UseDevContainer,
    /// Tooling runs in sidecars whose image is merged with the plugin's
    #[default]
    MergeImage,
}

crate::simple_display! {
    SidecarPolicy {
        UseDevContainer => "USE_DEV_CONTAINER",
        MergeImage => "MERGE_IMAGE",
    }
}

impl SidecarPolicy {
    /// Only an explicit `USE_DEV_CONTAINER` attribute selects the dev container.
    pub fn from_devfile(devfile: &Devfile) -> Self {
        match devfile.attribute_str(SIDECAR_POLICY_ATTRIBUTE) {
            Some("USE_DEV_CONTAINER") => SidecarPolicy::UseDevContainer,
            _ => SidecarPolicy::MergeImage,
        }
    }
}

/// Optional project files handed to the plugin resolver, keyed by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraFiles {
    files: BTreeMap<String, String>,
}

impl ExtraFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn with(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn che_theia_plugins(&self) -> Option<&str> {
        self.get(CHE_THEIA_PLUGINS_FILE)
    }

    pub fn vscode_extensions(&self) -> Option<&str> {
        self.get(VSCODE_EXTENSIONS_FILE)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FromIterator<(String, String)> for ExtraFiles {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self { files: iter.into_iter().collect() }
    }
}

/// Append the dashboard and (when given) registry URLs to the environment of
/// every container component. Existing entries are kept.
pub fn inject_plugin_env(devfile: &mut Devfile, dashboard_url: &str, registry_url: Option<&str>) {
    for component in devfile.components.iter_mut().flatten() {
        let Some(container) = component.container.as_mut() else {
            continue;
        };
        let env = container.env.get_or_insert_with(Vec::new);
        env.push(EnvVar::new(DASHBOARD_URL_ENV, dashboard_url));
        if let Some(url) = registry_url {
            env.push(EnvVar::new(PLUGIN_REGISTRY_URL_ENV, url));
        }
    }
}

#[cfg(test)]
#[path = "plugin_tests.rs"]
mod tests;
