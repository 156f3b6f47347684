// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Polling reconciliation loop.
//!
//! Every interval the loop lists the namespace's workspaces and reports:
//!
//! - one [`StatusUpdate`] per workspace, comparing the observed phase with the
//!   previous update for the same id
//! - the workspaces whose id was not observed on the previous tick (added)
//! - the ids observed on the previous tick but not on this one (removed)
//!
//! All caches are owned by the loop. Other tasks reach them only through
//! [`ReconcileCommands`].

use std::collections::HashMap;
use std::sync::Arc;

use dw_adapters::DevWorkspaceStore;
use dw_core::{DevWorkspace, Phase, StatusUpdate};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::{ReconcileConfig, DEFAULT_WATCH_INTERVAL};
use crate::error::UNKNOWN_FAILURE;

/// Receivers of reconciliation results
pub trait WorkspaceCallbacks: Send + 'static {
    fn update_status(&mut self, workspace: &DevWorkspace, update: &StatusUpdate);

    /// Called only with a non-empty set
    fn update_added(&mut self, workspaces: &[DevWorkspace]);

    /// Called only with a non-empty set
    fn update_removed(&mut self, workspace_ids: &[String]);
}

/// Reconciliation results as channel messages
#[derive(Debug, Clone, PartialEq)]
pub enum WorkspaceEvent {
    Status { workspace: Box<DevWorkspace>, update: StatusUpdate },
    Added(Vec<DevWorkspace>),
    Removed(Vec<String>),
}

/// Callbacks that forward every result as a [`WorkspaceEvent`].
#[derive(Debug, Clone)]
pub struct ChannelCallbacks {
    tx: mpsc::UnboundedSender<WorkspaceEvent>,
}

impl ChannelCallbacks {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<WorkspaceEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, event: WorkspaceEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("workspace event receiver dropped");
        }
    }
}

impl WorkspaceCallbacks for ChannelCallbacks {
    fn update_status(&mut self, workspace: &DevWorkspace, update: &StatusUpdate) {
        self.send(WorkspaceEvent::Status {
            workspace: Box::new(workspace.clone()),
            update: update.clone(),
        });
    }

    fn update_added(&mut self, workspaces: &[DevWorkspace]) {
        self.send(WorkspaceEvent::Added(workspaces.to_vec()));
    }

    fn update_removed(&mut self, workspace_ids: &[String]) {
        self.send(WorkspaceEvent::Removed(workspace_ids.to_vec()));
    }
}

/// Messages into a running loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileCommand {
    /// Drop the last-seen message of a workspace id
    ForgetMessage(String),
}

/// Sending side of a running loop's command channel
#[derive(Debug, Clone)]
pub struct ReconcileCommands {
    tx: mpsc::UnboundedSender<ReconcileCommand>,
}

impl ReconcileCommands {
    pub fn forget_message(&self, workspace_id: &str) {
        if self.tx.send(ReconcileCommand::ForgetMessage(workspace_id.to_string())).is_err() {
            tracing::debug!(%workspace_id, "reconciler stopped, dropping forget-message");
        }
    }
}

/// Handle to a running loop
pub struct ReconcilerHandle {
    cancel: CancellationToken,
    commands: ReconcileCommands,
    join: JoinHandle<()>,
}

impl ReconcilerHandle {
    pub fn commands(&self) -> ReconcileCommands {
        self.commands.clone()
    }

    /// Ask the loop to stop after the tick in progress, if any.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.join.is_finished()
    }

    /// Stop the loop and wait for it to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.join.await {
            tracing::warn!(error = %e, "reconciler task failed");
        }
    }
}

pub struct Reconciler<S, C> {
    store: Arc<S>,
    namespace: String,
    callbacks: C,
    config: ReconcileConfig,
    /// Last update per namespace and workspace id
    previous: HashMap<String, HashMap<String, StatusUpdate>>,
    /// Last forwarded status message per workspace id
    last_message: HashMap<String, String>,
    /// Ids observed on the previous tick
    ids: Vec<String>,
}

impl<S: DevWorkspaceStore, C: WorkspaceCallbacks> Reconciler<S, C> {
    pub fn new(store: Arc<S>, namespace: impl Into<String>, callbacks: C) -> Self {
        Self {
            store,
            namespace: namespace.into(),
            callbacks,
            config: ReconcileConfig::default(),
            previous: HashMap::new(),
            last_message: HashMap::new(),
            ids: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: ReconcileConfig) -> Self {
        self.config = config;
        self
    }

    pub fn callbacks(&self) -> &C {
        &self.callbacks
    }

    pub fn apply(&mut self, command: ReconcileCommand) {
        match command {
            ReconcileCommand::ForgetMessage(id) => {
                self.last_message.remove(&id);
            }
        }
    }

    /// Run one list-and-diff pass. A failed listing skips the pass and
    /// leaves every cache untouched.
    pub async fn tick(&mut self) {
        let workspaces = match self.store.list(&self.namespace).await {
            Ok(list) => list.into_iter().filter(|ws| !ws.is_web_terminal()).collect::<Vec<_>>(),
            Err(e) => {
                tracing::warn!(namespace = %self.namespace, error = %e, "failed to list workspaces");
                return;
            }
        };
        tracing::debug!(namespace = %self.namespace, count = workspaces.len(), "reconciling");

        for workspace in &workspaces {
            let mut update = self.status_update(workspace);
            if let Some(message) = workspace.message().filter(|m| !m.is_empty()) {
                let id = workspace.workspace_id();
                if self.last_message.get(id).map(String::as_str) != Some(message) {
                    update.message = Some(message.to_string());
                    self.last_message.insert(id.to_string(), message.to_string());
                }
            }
            if update.is_transition() {
                tracing::info!(
                    namespace = %self.namespace,
                    name = %workspace.name(),
                    workspace_id = %update.workspace_id,
                    status = %update.status,
                    "workspace status changed"
                );
            }
            self.callbacks.update_status(workspace, &update);
        }

        let ids: Vec<String> =
            workspaces.iter().map(|ws| ws.workspace_id().to_string()).collect();
        let added: Vec<DevWorkspace> = workspaces
            .iter()
            .filter(|ws| !self.ids.iter().any(|id| id == ws.workspace_id()))
            .cloned()
            .collect();
        if !added.is_empty() {
            self.callbacks.update_added(&added);
        }
        let removed: Vec<String> =
            self.ids.iter().filter(|id| !ids.contains(id)).cloned().collect();
        if !removed.is_empty() {
            // Gone ids keep no cached state
            for id in &removed {
                for cache in self.previous.values_mut() {
                    cache.remove(id);
                }
                self.last_message.remove(id);
            }
            self.callbacks.update_removed(&removed);
        }
        self.ids = ids;
    }

    /// Compare with the cached update for this id and replace it.
    fn status_update(&mut self, workspace: &DevWorkspace) -> StatusUpdate {
        let namespace = workspace.namespace().to_string();
        let id = workspace.workspace_id().to_string();
        // No status block yet means the controller has not picked it up
        let status = workspace.phase().unwrap_or(Phase::Starting);

        let cache = self.previous.entry(namespace).or_default();
        let prev_status = cache.get(&id).map(|prev| prev.status.clone());
        let mut update = StatusUpdate::new(id.clone(), status, prev_status);
        if update.status.is_terminal_failure() {
            update.error =
                Some(workspace.message().filter(|m| !m.is_empty()).unwrap_or(UNKNOWN_FAILURE).to_string());
        }
        cache.insert(id, update.clone());
        update
    }

    /// Run the loop on the current runtime until stopped.
    ///
    /// The first pass happens one interval after the start. Passes never
    /// overlap: a slow pass delays the next one.
    pub fn start(mut self) -> ReconcilerHandle {
        let cancel = CancellationToken::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let token = cancel.clone();
        let period = match self.config.interval {
            p if p.is_zero() => {
                tracing::warn!(
                    namespace = %self.namespace,
                    default = ?DEFAULT_WATCH_INTERVAL,
                    "zero reconcile interval, using default"
                );
                DEFAULT_WATCH_INTERVAL
            }
            p => p,
        };

        tracing::info!(namespace = %self.namespace, interval = ?period, "starting reconciler");
        let join = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    Some(command) = rx.recv() => self.apply(command),
                    _ = interval.tick() => self.tick().await,
                }
            }
            tracing::info!(namespace = %self.namespace, "reconciler stopped");
        });

        ReconcilerHandle { cancel, commands: ReconcileCommands { tx }, join }
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
