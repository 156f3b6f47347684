// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote resource store for DevWorkspaces and their templates.
//!
//! The store is the only collaborator that talks to the cluster. It offers
//! list/get/create/delete, JSON-patch updates and an enablement probe; it
//! adds no retries of its own.

mod cluster;

pub use cluster::KubeStore;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeStore, StoreCall, StoreOp};

use async_trait::async_trait;
use dw_core::{DevWorkspace, DevWorkspaceTemplate, WorkspaceError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} {namespace}/{name} not found")]
    NotFound { kind: &'static str, namespace: String, name: String },
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("api error: {0}")]
    Api(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error(transparent)]
    Resource(#[from] WorkspaceError),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

/// One JSON-patch (RFC 6902) operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOp {
    Add { path: String, value: Value },
    Replace { path: String, value: Value },
    Remove { path: String },
}

impl PatchOp {
    pub fn add(path: impl Into<String>, value: Value) -> Self {
        PatchOp::Add { path: path.into(), value }
    }

    pub fn replace(path: impl Into<String>, value: Value) -> Self {
        PatchOp::Replace { path: path.into(), value }
    }

    pub fn remove(path: impl Into<String>) -> Self {
        PatchOp::Remove { path: path.into() }
    }

    pub fn path(&self) -> &str {
        match self {
            PatchOp::Add { path, .. } | PatchOp::Replace { path, .. } | PatchOp::Remove { path } => {
                path
            }
        }
    }

    /// Convert a batch into the `json-patch` representation.
    pub fn to_json_patch(ops: &[PatchOp]) -> Result<json_patch::Patch, StoreError> {
        Ok(serde_json::from_value(serde_json::to_value(ops)?)?)
    }
}

/// Escape one JSON-pointer reference token (`~` → `~0`, `/` → `~1`).
pub fn escape_pointer(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

/// Path of a single annotation, e.g. `/metadata/annotations/che.eclipse.org~1next-start-cfg`
pub fn annotation_path(key: &str) -> String {
    format!("/metadata/annotations/{}", escape_pointer(key))
}

/// Remote store of DevWorkspace resources
#[async_trait]
pub trait DevWorkspaceStore: Send + Sync + 'static {
    /// Whether the cluster serves the DevWorkspace API group
    async fn is_enabled(&self) -> Result<bool, StoreError>;

    async fn list(&self, namespace: &str) -> Result<Vec<DevWorkspace>, StoreError>;

    async fn get(&self, namespace: &str, name: &str) -> Result<DevWorkspace, StoreError>;

    /// Create the resource in its own metadata namespace
    async fn create(&self, workspace: &DevWorkspace) -> Result<DevWorkspace, StoreError>;

    /// Apply the operations as one JSON patch and return the patched resource
    async fn patch(
        &self,
        namespace: &str,
        name: &str,
        ops: &[PatchOp],
    ) -> Result<DevWorkspace, StoreError>;

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), StoreError>;

    async fn create_template(
        &self,
        template: &DevWorkspaceTemplate,
    ) -> Result<DevWorkspaceTemplate, StoreError>;

    /// Provision the namespace so workspaces can be created in it
    async fn initialize_namespace(&self, namespace: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
