// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Uniform read/write facade over the two workspace resource shapes.
//!
//! The shape is detected once, in [`WorkspaceView::from_value`], and carried
//! as the [`WorkspaceResource`] variant; every accessor is a single match on
//! that variant.

use serde_json::Value;

use crate::devfile::DevfileDocument;
use crate::devworkspace::{
    devfile_to_devworkspace, devworkspace_to_devfile, DevWorkspace, DEVWORKSPACE_KIND, ROUTING_CLASS,
};
use crate::error::WorkspaceError;
use crate::legacy::LegacyWorkspace;
use crate::phase::Phase;
use crate::storage_type::StorageType;

/// Which schema backs a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Legacy,
    DevWorkspace,
}

crate::simple_display! {
    Shape {
        Legacy => "legacy",
        DevWorkspace => "devworkspace",
    }
}

impl Shape {
    /// Classify a raw object. Legacy keys are checked first.
    pub fn detect(value: &Value) -> Result<Shape, WorkspaceError> {
        let Some(obj) = value.as_object() else {
            return Err(WorkspaceError::UnrecognizedShape);
        };
        if obj.contains_key("id") && obj.contains_key("devfile") && obj.contains_key("status") {
            return Ok(Shape::Legacy);
        }
        if obj.get("kind").and_then(Value::as_str) == Some(DEVWORKSPACE_KIND) {
            return Ok(Shape::DevWorkspace);
        }
        Err(WorkspaceError::UnrecognizedShape)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkspaceResource {
    Legacy(LegacyWorkspace),
    DevWorkspace(DevWorkspace),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceView {
    resource: WorkspaceResource,
}

impl From<DevWorkspace> for WorkspaceView {
    fn from(dw: DevWorkspace) -> Self {
        Self { resource: WorkspaceResource::DevWorkspace(dw) }
    }
}

impl From<LegacyWorkspace> for WorkspaceView {
    fn from(legacy: LegacyWorkspace) -> Self {
        Self { resource: WorkspaceResource::Legacy(legacy) }
    }
}

impl WorkspaceView {
    pub fn from_value(value: Value) -> Result<Self, WorkspaceError> {
        match Shape::detect(&value)? {
            Shape::Legacy => LegacyWorkspace::from_value(value).map(Self::from),
            Shape::DevWorkspace => DevWorkspace::from_value(value).map(Self::from),
        }
    }

    pub fn shape(&self) -> Shape {
        match &self.resource {
            WorkspaceResource::Legacy(_) => Shape::Legacy,
            WorkspaceResource::DevWorkspace(_) => Shape::DevWorkspace,
        }
    }

    pub fn resource(&self) -> &WorkspaceResource {
        &self.resource
    }

    pub fn into_resource(self) -> WorkspaceResource {
        self.resource
    }

    pub fn as_devworkspace(&self) -> Option<&DevWorkspace> {
        match &self.resource {
            WorkspaceResource::DevWorkspace(dw) => Some(dw),
            WorkspaceResource::Legacy(_) => None,
        }
    }

    pub fn as_devworkspace_mut(&mut self) -> Option<&mut DevWorkspace> {
        match &mut self.resource {
            WorkspaceResource::DevWorkspace(dw) => Some(dw),
            WorkspaceResource::Legacy(_) => None,
        }
    }

    pub fn to_value(&self) -> Result<Value, WorkspaceError> {
        match &self.resource {
            WorkspaceResource::Legacy(w) => {
                serde_json::to_value(w).map_err(WorkspaceError::invalid("legacy workspace"))
            }
            WorkspaceResource::DevWorkspace(dw) => dw.to_value(),
        }
    }

    pub fn id(&self) -> &str {
        match &self.resource {
            WorkspaceResource::Legacy(w) => &w.id,
            WorkspaceResource::DevWorkspace(dw) => dw.workspace_id(),
        }
    }

    pub fn name(&self) -> &str {
        match &self.resource {
            WorkspaceResource::Legacy(w) => w.name(),
            WorkspaceResource::DevWorkspace(dw) => dw.name(),
        }
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), WorkspaceError> {
        match &mut self.resource {
            WorkspaceResource::Legacy(w) => {
                w.set_name(name);
                Ok(())
            }
            WorkspaceResource::DevWorkspace(_) => {
                Err(WorkspaceError::Unsupported { operation: "rename", shape: Shape::DevWorkspace })
            }
        }
    }

    pub fn namespace(&self) -> &str {
        match &self.resource {
            WorkspaceResource::Legacy(w) => w.namespace(),
            WorkspaceResource::DevWorkspace(dw) => dw.namespace(),
        }
    }

    pub fn infrastructure_namespace(&self) -> &str {
        match &self.resource {
            WorkspaceResource::Legacy(w) => w.infrastructure_namespace(),
            WorkspaceResource::DevWorkspace(dw) => dw.namespace(),
        }
    }

    /// Creation time in epoch milliseconds, 0 when unknown.
    pub fn created(&self) -> u64 {
        match &self.resource {
            WorkspaceResource::Legacy(w) => w.created(),
            WorkspaceResource::DevWorkspace(dw) => dw
                .metadata
                .creation_timestamp
                .as_ref()
                .map(|t| u64::try_from(t.0.timestamp_millis()).unwrap_or(0))
                .unwrap_or(0),
        }
    }

    /// Last update in epoch milliseconds. DevWorkspaces do not track it and
    /// report their creation time.
    pub fn updated(&self) -> u64 {
        match &self.resource {
            WorkspaceResource::Legacy(w) => w.updated(),
            WorkspaceResource::DevWorkspace(_) => self.created(),
        }
    }

    pub fn status(&self) -> Option<Phase> {
        match &self.resource {
            WorkspaceResource::Legacy(w) => Some(Phase::parse(&w.status)),
            WorkspaceResource::DevWorkspace(dw) => dw.phase(),
        }
    }

    pub fn is_starting(&self) -> bool {
        self.status() == Some(Phase::Starting)
    }

    pub fn is_running(&self) -> bool {
        self.status() == Some(Phase::Running)
    }

    pub fn is_stopping(&self) -> bool {
        self.status() == Some(Phase::Stopping)
    }

    pub fn is_stopped(&self) -> bool {
        self.status() == Some(Phase::Stopped)
    }

    pub fn has_error(&self) -> bool {
        self.status().is_some_and(|p| p.is_terminal_failure())
    }

    pub fn ide_url(&self) -> Option<&str> {
        match &self.resource {
            WorkspaceResource::Legacy(w) => w.ide_url(),
            WorkspaceResource::DevWorkspace(dw) => dw.main_url(),
        }
    }

    /// The devfile a user should see and edit.
    ///
    /// For a DevWorkspace with pending desired state this is the pending
    /// snapshot's devfile, not the live spec's.
    pub fn devfile_content(&self) -> Result<DevfileDocument, WorkspaceError> {
        match &self.resource {
            WorkspaceResource::Legacy(w) => Ok(DevfileDocument::new(w.devfile.clone())),
            WorkspaceResource::DevWorkspace(dw) => {
                let effective = dw.effective()?;
                DevfileDocument::from_devfile(&devworkspace_to_devfile(&effective))
            }
        }
    }

    /// Replace the devfile. A DevWorkspace is rebuilt from the new content;
    /// it stays started iff it is currently running.
    pub fn set_devfile_content(&mut self, content: &DevfileDocument) -> Result<(), WorkspaceError> {
        match &mut self.resource {
            WorkspaceResource::Legacy(w) => {
                w.devfile = content.as_value().clone();
            }
            WorkspaceResource::DevWorkspace(dw) => {
                let devfile = content.to_devfile()?;
                let started = dw.phase() == Some(Phase::Running);
                *dw = devfile_to_devworkspace(&devfile, ROUTING_CLASS, started);
            }
        }
        Ok(())
    }

    pub fn storage_type(&self) -> StorageType {
        match &self.resource {
            WorkspaceResource::Legacy(w) => w.storage_type(),
            WorkspaceResource::DevWorkspace(_) => StorageType::default(),
        }
    }

    pub fn set_storage_type(&mut self, storage_type: StorageType) -> Result<(), WorkspaceError> {
        match &mut self.resource {
            WorkspaceResource::Legacy(w) => {
                w.set_storage_type(storage_type);
                Ok(())
            }
            WorkspaceResource::DevWorkspace(_) => Err(WorkspaceError::Unsupported {
                operation: "set storage type",
                shape: Shape::DevWorkspace,
            }),
        }
    }

    pub fn project_names(&self) -> Vec<String> {
        match &self.resource {
            WorkspaceResource::Legacy(w) => w.project_names(),
            WorkspaceResource::DevWorkspace(dw) => dw
                .spec
                .template
                .iter()
                .flat_map(|t| t.projects.iter().flatten())
                .map(|p| p.name.clone())
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
