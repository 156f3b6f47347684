// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! DevWorkspace lifecycle client.
//!
//! # Create
//!
//! Template names embed the workspace id, which the cluster assigns only
//! once the DevWorkspace exists. Creation is therefore two-phase: create
//! the workspace stopped, synthesize and create its templates, then replace
//! `/spec` with plugin references added and `started = true`. A failure
//! after the workspace exists deletes it again; owner references take the
//! templates with it.
//!
//! # Update
//!
//! A workspace carrying pending desired state is updated by rewriting only
//! its annotations, so the running spec is left alone until the next start.
//! Otherwise `/spec` is replaced and any pending state found on the fresh
//! cluster copy is removed in the same patch.

use std::sync::Arc;

use dw_adapters::{annotation_path, DevWorkspaceStore, PatchOp, PluginResolver, StoreError};
use dw_core::{
    devfile_to_devworkspace, json_eq, normalize_plugin_name, DevWorkspace, Devfile, ExtraFiles,
    Phase, NEXT_START_ANNOTATION, ROUTING_CLASS,
};
use futures_util::future::try_join_all;
use parking_lot::Mutex;
use serde_json::Value;

use crate::config::{ClientConfig, ReconcileConfig};
use crate::error::{ClientError, UNKNOWN_FAILURE};
use crate::reconcile::{ReconcileCommands, Reconciler, ReconcilerHandle, WorkspaceCallbacks};
use crate::synthesizer::TemplateSynthesizer;

pub struct LifecycleClient<S, R> {
    store: Arc<S>,
    synthesizer: TemplateSynthesizer<R>,
    config: ClientConfig,
    /// Command channel of the running reconciliation loop, if any
    reconciler: Mutex<Option<ReconcileCommands>>,
}

impl<S: DevWorkspaceStore, R: PluginResolver> LifecycleClient<S, R> {
    pub fn new(store: Arc<S>, resolver: Arc<R>, config: ClientConfig) -> Self {
        let synthesizer = TemplateSynthesizer::new(
            resolver,
            config.dashboard_url.clone(),
            config.plugin_registry_url.clone(),
        );
        Self { store, synthesizer, config, reconciler: Mutex::new(None) }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub async fn is_enabled(&self) -> Result<bool, ClientError> {
        Ok(self.store.is_enabled().await?)
    }

    /// Workspaces in `namespace`, without web terminals.
    pub async fn list(&self, namespace: &str) -> Result<Vec<DevWorkspace>, ClientError> {
        let workspaces = self.store.list(namespace).await?;
        Ok(workspaces.into_iter().filter(|ws| !ws.is_web_terminal()).collect())
    }

    /// Create a workspace from `devfile` with one template per plugin, and
    /// start it.
    pub async fn create(
        &self,
        devfile: &Devfile,
        plugins: &[Devfile],
        extra_files: &ExtraFiles,
    ) -> Result<DevWorkspace, ClientError> {
        let mut devfile = devfile.clone();
        if devfile.metadata.namespace.as_deref().unwrap_or_default().is_empty() {
            devfile.metadata.namespace = Some(self.config.namespace.clone());
        }
        devfile.components_mut();

        let created = self.store.create(&devfile_to_devworkspace(&devfile, ROUTING_CLASS, false)).await?;
        let namespace = created.namespace().to_string();
        let name = created.name().to_string();
        tracing::info!(
            %namespace,
            %name,
            workspace_id = %created.workspace_id(),
            plugins = plugins.len(),
            "created DevWorkspace"
        );

        // After creation succeeds, any failure must clean up the workspace.
        let result: Result<DevWorkspace, ClientError> = async {
            let synthesis = self.synthesizer.synthesize(&devfile, plugins, &created, extra_files).await?;
            let templates =
                try_join_all(synthesis.templates.iter().map(|t| self.store.create_template(t)))
                    .await?;

            let mut workspace = synthesis.workspace;
            for template in &templates {
                workspace.add_plugin(template.name(), template.namespace());
            }
            workspace.spec.started = true;
            let ops = [PatchOp::replace("/spec", spec_value(&workspace)?)];
            Ok(self.store.patch(&namespace, &name, &ops).await?)
        }
        .await;

        if let Err(e) = &result {
            tracing::warn!(%namespace, %name, error = %e, "create failed, deleting DevWorkspace");
            if let Err(del_err) = self.store.delete(&namespace, &name).await {
                tracing::warn!(
                    %namespace,
                    %name,
                    error = %del_err,
                    "failed to clean up DevWorkspace after create failure"
                );
            }
        }
        result
    }

    /// Push `workspace` to the cluster with `plugins` referenced.
    ///
    /// The branch is chosen from `workspace` itself: with pending desired
    /// state only the annotations are written.
    pub async fn update(
        &self,
        mut workspace: DevWorkspace,
        plugins: &[Devfile],
    ) -> Result<DevWorkspace, ClientError> {
        let namespace = workspace.namespace().to_string();
        let name = workspace.name().to_string();
        let workspace_id = workspace.workspace_id().to_string();
        for plugin in plugins {
            workspace.add_plugin(&normalize_plugin_name(plugin.name(), &workspace_id), &namespace);
        }

        let ops = if workspace.has_pending() {
            tracing::info!(%namespace, %name, "deferring update to next start");
            let annotations =
                serde_json::to_value(workspace.wire_annotations()).map_err(StoreError::from)?;
            vec![PatchOp::add("/metadata/annotations", annotations)]
        } else {
            let mut ops = vec![PatchOp::replace("/spec", spec_value(&workspace)?)];
            let live = self.store.get(&namespace, &name).await?;
            if live.has_pending() {
                tracing::info!(%namespace, %name, "update supersedes pending start configuration");
                ops.push(PatchOp::remove(annotation_path(NEXT_START_ANNOTATION)));
            }
            ops
        };

        Ok(self.store.patch(&namespace, &name, &ops).await?)
    }

    pub async fn delete(&self, namespace: &str, name: &str) -> Result<(), ClientError> {
        tracing::info!(%namespace, %name, "deleting workspace");
        Ok(self.store.delete(namespace, name).await?)
    }

    /// Fail with [`ClientError::ConcurrentModification`] when the cluster's
    /// `spec.template` differs from `local`'s. Other spec fields (such as
    /// `started`) and status are not compared.
    pub async fn check_for_modified_cluster_resource(
        &self,
        local: &DevWorkspace,
    ) -> Result<(), ClientError> {
        let remote = self.store.get(local.namespace(), local.name()).await?;
        let local_template = template_value(local)?;
        let remote_template = template_value(&remote)?;
        if json_eq(&local_template, &remote_template) {
            return Ok(());
        }
        tracing::warn!(
            namespace = %local.namespace(),
            name = %local.name(),
            "workspace template changed on the cluster"
        );
        Err(ClientError::ConcurrentModification {
            namespace: local.namespace().to_string(),
            name: local.name().to_string(),
        })
    }

    /// Fetch a workspace, polling until it reports a phase and, when
    /// running, a main URL.
    ///
    /// At most `max_status_attempts` fetches are made, `status_delay` apart.
    /// A failure phase on any fetch ends polling immediately.
    pub async fn get_by_name(&self, namespace: &str, name: &str) -> Result<DevWorkspace, ClientError> {
        let attempts = self.config.max_status_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let workspace = self.store.get(namespace, name).await?;
            check_for_terminal_failure(&workspace)?;
            let missing = missing_status(&workspace);
            let Some(missing) = missing else {
                return Ok(workspace);
            };
            if attempt >= attempts {
                return Err(ClientError::StatusUnavailable {
                    namespace: namespace.to_string(),
                    name: name.to_string(),
                    attempts,
                    missing,
                });
            }
            tracing::debug!(%namespace, %name, attempt, missing, "waiting for workspace status");
            tokio::time::sleep(self.config.status_delay).await;
        }
    }

    /// Set `spec.started`.
    ///
    /// Stopping tells the reconciliation loop to forget the workspace's last
    /// message, so the next start reports its messages afresh.
    pub async fn change_status(
        &self,
        namespace: &str,
        name: &str,
        started: bool,
    ) -> Result<DevWorkspace, ClientError> {
        tracing::info!(%namespace, %name, started, "changing workspace status");
        let ops = [PatchOp::replace("/spec/started", Value::Bool(started))];
        let workspace = self.store.patch(namespace, name, &ops).await?;
        if !started && !workspace.workspace_id().is_empty() {
            if let Some(commands) = self.reconciler.lock().as_ref() {
                commands.forget_message(workspace.workspace_id());
            }
        }
        check_for_terminal_failure(&workspace)?;
        Ok(workspace)
    }

    /// Start a workspace, applying its pending start configuration first.
    pub async fn start(
        &self,
        namespace: &str,
        name: &str,
        plugins: &[Devfile],
    ) -> Result<DevWorkspace, ClientError> {
        let live = self.store.get(namespace, name).await?;
        if let Some(pending) = live.pending() {
            tracing::info!(%namespace, %name, "applying pending start configuration");
            let desired = pending.desired()?;
            let mut next = live.clone();
            next.spec.template = desired.spec.template;
            next.set_pending(None);
            self.update(next, plugins).await?;
        }
        self.change_status(namespace, name, true).await
    }

    pub async fn stop(&self, namespace: &str, name: &str) -> Result<DevWorkspace, ClientError> {
        self.change_status(namespace, name, false).await
    }

    /// Provision `namespace`. Failures are logged and reported as `false`.
    pub async fn initialize_namespace(&self, namespace: &str) -> bool {
        match self.store.initialize_namespace(namespace).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(%namespace, error = %e, "failed to initialize namespace");
                false
            }
        }
    }

    /// Start reconciling `namespace` every `config.interval`, reporting to
    /// `callbacks`. The loop stays linked to this client until stopped.
    pub fn subscribe_to_namespace<C: WorkspaceCallbacks>(
        &self,
        namespace: &str,
        callbacks: C,
        config: ReconcileConfig,
    ) -> ReconcilerHandle {
        let handle = Reconciler::new(Arc::clone(&self.store), namespace, callbacks)
            .with_config(config)
            .start();
        *self.reconciler.lock() = Some(handle.commands());
        handle
    }

    /// Link an already running loop.
    pub fn attach_reconciler(&self, commands: ReconcileCommands) {
        *self.reconciler.lock() = Some(commands);
    }
}

/// Raise [`ClientError::TerminalFailure`] for a workspace in a failure phase.
pub fn check_for_terminal_failure(workspace: &DevWorkspace) -> Result<(), ClientError> {
    match workspace.phase() {
        Some(phase) if phase.is_terminal_failure() => Err(ClientError::TerminalFailure(
            workspace.message().filter(|m| !m.is_empty()).unwrap_or(UNKNOWN_FAILURE).to_string(),
        )),
        _ => Ok(()),
    }
}

/// What keeps a status from being usable, if anything
fn missing_status(workspace: &DevWorkspace) -> Option<&'static str> {
    match workspace.phase() {
        None => Some("status phase"),
        Some(Phase::Running) if workspace.main_url().is_none() => Some("main URL"),
        Some(_) => None,
    }
}

fn spec_value(workspace: &DevWorkspace) -> Result<Value, ClientError> {
    Ok(serde_json::to_value(&workspace.spec).map_err(StoreError::from)?)
}

fn template_value(workspace: &DevWorkspace) -> Result<Value, ClientError> {
    Ok(serde_json::to_value(&workspace.spec.template).map_err(StoreError::from)?)
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
