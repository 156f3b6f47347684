// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Saving an edited devfile back to its workspace.
//!
//! A save never discards the user's edit: every failure comes back as a
//! [`SaveError`] holding the document that was not written.

use dw_adapters::{DevWorkspaceStore, PluginResolver};
use dw_core::{
    DevWorkspace, Devfile, DevfileDocument, PendingDesiredState, Shape, WorkspaceError,
    WorkspaceResource, WorkspaceView,
};

use crate::client::LifecycleClient;
use crate::error::{ClientError, SaveError};

/// How a changed devfile reaches the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Replace the spec now
    Apply,
    /// Store as pending desired state, applied on the next start
    Deferred,
}

dw_core::simple_display! {
    SaveMode {
        Apply => "apply",
        Deferred => "deferred",
    }
}

impl SaveMode {
    /// Deferred for a running workspace whose user declined a restart.
    pub fn for_view(view: &WorkspaceView, restart: bool) -> Self {
        if view.is_running() && !restart {
            SaveMode::Deferred
        } else {
            SaveMode::Apply
        }
    }
}

#[derive(Debug, Clone)]
pub enum SaveOutcome {
    /// The document equals the current content; nothing was written
    Unchanged,
    Saved(WorkspaceView),
}

pub struct DevfileEditor<'a, S, R> {
    client: &'a LifecycleClient<S, R>,
}

impl<S: DevWorkspaceStore, R: PluginResolver> LifecycleClient<S, R> {
    pub fn editor(&self) -> DevfileEditor<'_, S, R> {
        DevfileEditor { client: self }
    }
}

impl<S: DevWorkspaceStore, R: PluginResolver> DevfileEditor<'_, S, R> {
    pub async fn save(
        &self,
        view: &WorkspaceView,
        devfile: DevfileDocument,
        plugins: &[Devfile],
        mode: SaveMode,
    ) -> Result<SaveOutcome, SaveError> {
        let current = match view.devfile_content() {
            Ok(current) => current,
            Err(e) => return Err(SaveError::new(devfile, e)),
        };
        if current.content_eq(&devfile) {
            tracing::debug!(name = %view.name(), "devfile unchanged, skipping save");
            return Ok(SaveOutcome::Unchanged);
        }

        let Some(live) = view.as_devworkspace() else {
            return Err(SaveError::new(
                devfile,
                WorkspaceError::Unsupported { operation: "save devfile", shape: Shape::Legacy },
            ));
        };

        match self.write(view, live, &devfile, plugins, mode).await {
            Ok(saved) => {
                tracing::info!(
                    namespace = %saved.namespace(),
                    name = %saved.name(),
                    %mode,
                    "saved devfile"
                );
                Ok(SaveOutcome::Saved(WorkspaceView::from(saved)))
            }
            Err(e) => {
                tracing::warn!(name = %view.name(), error = %e, "failed to save devfile");
                Err(SaveError::new(devfile, e))
            }
        }
    }

    async fn write(
        &self,
        view: &WorkspaceView,
        live: &DevWorkspace,
        devfile: &DevfileDocument,
        plugins: &[Devfile],
        mode: SaveMode,
    ) -> Result<DevWorkspace, ClientError> {
        self.client.check_for_modified_cluster_resource(live).await?;

        let mut copy = view.clone();
        copy.set_devfile_content(devfile)?;
        let WorkspaceResource::DevWorkspace(mut next) = copy.into_resource() else {
            return Err(WorkspaceError::Unsupported { operation: "save devfile", shape: Shape::Legacy }
                .into());
        };

        // The rebuilt resource only knows what the devfile carries. Keep the
        // live identity and status so plugin names still resolve to this id.
        let rebuilt_annotations = next.metadata.annotations.take().unwrap_or_default();
        next.metadata = live.metadata.clone();
        if !rebuilt_annotations.is_empty() {
            next.metadata.annotations.get_or_insert_with(Default::default).extend(rebuilt_annotations);
        }
        next.status = live.status.clone();

        if mode == SaveMode::Deferred {
            let pending = PendingDesiredState::capture(&next)?;
            next.set_pending(Some(pending));
        }
        self.client.update(next, plugins).await
    }
}

#[cfg(test)]
#[path = "editor_tests.rs"]
mod tests;
