// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plugin template synthesis.
//!
//! Turns plugin devfiles into DevWorkspaceTemplates owned by a freshly
//! created DevWorkspace. Steps run in a fixed order:
//!
//! 1. name each template `normalize(plugin) + "-" + workspace id` and append
//!    the dashboard (and registry) URLs to every plugin container's env
//! 2. resolve the sidecar policy from the primary devfile, once
//! 3. hand everything to the [`PluginResolver`]
//! 4. stamp each resulting template with the owner's namespace and an owner
//!    reference, so deleting the workspace deletes its templates

use std::sync::Arc;

use dw_adapters::{PluginResolver, ResolveError, ResolveRequest};
use dw_core::{
    inject_plugin_env, normalize_plugin_name, DevWorkspace, DevWorkspaceTemplate, Devfile,
    ExtraFiles, SidecarPolicy,
};

/// Output of [`TemplateSynthesizer::synthesize`]
#[derive(Debug, Clone)]
pub struct Synthesis {
    /// Primary devfile as rewritten by the resolver
    pub devfile: Devfile,
    /// Owner workspace as rewritten by the resolver
    pub workspace: DevWorkspace,
    /// Templates ready to be created, all owned by the workspace
    pub templates: Vec<DevWorkspaceTemplate>,
    pub sidecar_policy: SidecarPolicy,
}

pub struct TemplateSynthesizer<R> {
    resolver: Arc<R>,
    dashboard_url: String,
    plugin_registry_url: Option<String>,
}

impl<R: PluginResolver> TemplateSynthesizer<R> {
    pub fn new(
        resolver: Arc<R>,
        dashboard_url: impl Into<String>,
        plugin_registry_url: Option<String>,
    ) -> Self {
        Self { resolver, dashboard_url: dashboard_url.into(), plugin_registry_url }
    }

    /// Synthesize templates for `plugins`, owned by the created `owner`.
    pub async fn synthesize(
        &self,
        devfile: &Devfile,
        plugins: &[Devfile],
        owner: &DevWorkspace,
        extra_files: &ExtraFiles,
    ) -> Result<Synthesis, ResolveError> {
        let workspace_id = owner.workspace_id();

        let templates = plugins
            .iter()
            .map(|plugin| {
                let name = normalize_plugin_name(plugin.name(), workspace_id);
                let mut spec = plugin.clone();
                inject_plugin_env(&mut spec, &self.dashboard_url, self.plugin_registry_url.as_deref());
                DevWorkspaceTemplate::new(name, Some(owner.namespace().to_string()), spec)
            })
            .collect();

        let sidecar_policy = SidecarPolicy::from_devfile(devfile);
        tracing::debug!(
            name = %owner.name(),
            %workspace_id,
            %sidecar_policy,
            plugins = plugins.len(),
            "resolving plugin templates"
        );

        let resolution = self
            .resolver
            .resolve(ResolveRequest {
                devfile: devfile.clone(),
                workspace: owner.clone(),
                templates,
                extra_files: extra_files.clone(),
                sidecar_policy,
                suffix: workspace_id.to_string(),
            })
            .await?;

        let mut templates = resolution.templates;
        for template in &mut templates {
            template.adopt(owner);
        }

        Ok(Synthesis {
            devfile: resolution.devfile,
            workspace: resolution.workspace,
            templates,
            sidecar_policy,
        })
    }
}

#[cfg(test)]
#[path = "synthesizer_tests.rs"]
mod tests;
