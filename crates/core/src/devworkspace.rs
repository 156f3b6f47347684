// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! DevWorkspace and DevWorkspaceTemplate custom resources.
//!
//! # Pending desired state
//!
//! A running workspace can be edited without restarting it: the new desired
//! resource is serialized into the `che.eclipse.org/next-start-cfg`
//! annotation and applied on the next explicit start. On the wire this is an
//! ordinary annotation; in memory it is lifted into
//! [`DevWorkspace::pending`] when the resource is deserialized and folded
//! back into the annotations when serialized, so the annotation map held by
//! a [`DevWorkspace`] never contains that key.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::devfile::{Component, Devfile, DevfileMetadata, DEVFILE_SCHEMA_VERSION};
use crate::error::WorkspaceError;
use crate::phase::Phase;

pub const API_GROUP: &str = "workspace.devfile.io";
pub const API_VERSION: &str = "v1alpha2";
pub const DEVWORKSPACE_KIND: &str = "DevWorkspace";
pub const DEVWORKSPACE_TEMPLATE_KIND: &str = "DevWorkspaceTemplate";

/// Annotation holding the desired resource to apply on next start
pub const NEXT_START_ANNOTATION: &str = "che.eclipse.org/next-start-cfg";

/// Label marking ephemeral web-terminal workspaces
pub const WEB_TERMINAL_LABEL: &str = "console.openshift.io/terminal";

/// Devfile metadata attribute carrying DevWorkspace annotations
pub const ANNOTATIONS_ATTRIBUTE: &str = "dw.metadata.annotations";

/// Routing class used for workspaces created by this client
pub const ROUTING_CLASS: &str = "che";

/// `workspace.devfile.io/v1alpha2`
pub fn group_version() -> String {
    format!("{}/{}", API_GROUP, API_VERSION)
}

/// The primary workspace resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDevWorkspace", into = "RawDevWorkspace")]
pub struct DevWorkspace {
    pub api_version: String,
    pub metadata: ObjectMeta,
    pub spec: DevWorkspaceSpec,
    pub status: Option<DevWorkspaceStatus>,
    pending: Option<PendingDesiredState>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevWorkspaceSpec {
    #[serde(default)]
    pub started: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<DevWorkspaceTemplateSpec>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The devfile-shaped part of the spec (`spec.template`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DevWorkspaceTemplateSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<crate::devfile::Project>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Observed state. Absent until the controller first reconciles the resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevWorkspaceStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devworkspace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Serialized desired resource waiting for the next explicit start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDesiredState {
    raw: String,
}

impl PendingDesiredState {
    /// Snapshot a desired resource. Any pending state nested in `desired`
    /// itself is dropped.
    pub fn capture(desired: &DevWorkspace) -> Result<Self, WorkspaceError> {
        let mut desired = desired.clone();
        desired.pending = None;
        let raw = serde_json::to_string(&desired).map_err(WorkspaceError::InvalidPendingState)?;
        Ok(Self { raw })
    }

    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The annotation value
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn desired(&self) -> Result<DevWorkspace, WorkspaceError> {
        serde_json::from_str(&self.raw).map_err(WorkspaceError::InvalidPendingState)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDevWorkspace {
    #[serde(default)]
    api_version: String,
    #[serde(default)]
    kind: String,
    #[serde(default)]
    metadata: ObjectMeta,
    #[serde(default)]
    spec: DevWorkspaceSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<DevWorkspaceStatus>,
}

impl TryFrom<RawDevWorkspace> for DevWorkspace {
    type Error = WorkspaceError;

    fn try_from(raw: RawDevWorkspace) -> Result<Self, Self::Error> {
        if raw.kind != DEVWORKSPACE_KIND {
            return Err(WorkspaceError::UnrecognizedShape);
        }
        let mut metadata = raw.metadata;
        let pending = take_pending(&mut metadata);
        Ok(Self { api_version: raw.api_version, metadata, spec: raw.spec, status: raw.status, pending })
    }
}

impl From<DevWorkspace> for RawDevWorkspace {
    fn from(dw: DevWorkspace) -> Self {
        let mut metadata = dw.metadata;
        if let Some(pending) = dw.pending {
            metadata
                .annotations
                .get_or_insert_with(BTreeMap::new)
                .insert(NEXT_START_ANNOTATION.to_string(), pending.raw);
        }
        Self {
            api_version: dw.api_version,
            kind: DEVWORKSPACE_KIND.to_string(),
            metadata,
            spec: dw.spec,
            status: dw.status,
        }
    }
}

fn take_pending(metadata: &mut ObjectMeta) -> Option<PendingDesiredState> {
    let annotations = metadata.annotations.as_mut()?;
    let raw = annotations.remove(NEXT_START_ANNOTATION)?;
    if annotations.is_empty() {
        metadata.annotations = None;
    }
    // An empty annotation value carries nothing to apply
    if raw.is_empty() {
        return None;
    }
    Some(PendingDesiredState { raw })
}

impl DevWorkspace {
    pub fn new(metadata: ObjectMeta, spec: DevWorkspaceSpec) -> Self {
        let mut metadata = metadata;
        let pending = take_pending(&mut metadata);
        Self { api_version: group_version(), metadata, spec, status: None, pending }
    }

    pub fn from_value(value: Value) -> Result<Self, WorkspaceError> {
        serde_json::from_value(value).map_err(WorkspaceError::invalid("DevWorkspace"))
    }

    pub fn to_value(&self) -> Result<Value, WorkspaceError> {
        serde_json::to_value(self).map_err(WorkspaceError::invalid("DevWorkspace"))
    }

    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }

    pub fn namespace(&self) -> &str {
        self.metadata.namespace.as_deref().unwrap_or_default()
    }

    pub fn uid(&self) -> &str {
        self.metadata.uid.as_deref().unwrap_or_default()
    }

    /// Controller-assigned workspace id; empty until first reconciled.
    pub fn workspace_id(&self) -> &str {
        self.status.as_ref().and_then(|s| s.devworkspace_id.as_deref()).unwrap_or_default()
    }

    pub fn phase(&self) -> Option<Phase> {
        self.status.as_ref().and_then(|s| s.phase.as_deref()).map(Phase::parse)
    }

    pub fn main_url(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.main_url.as_deref())
    }

    pub fn message(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.message.as_deref())
    }

    pub fn pending(&self) -> Option<&PendingDesiredState> {
        self.pending.as_ref()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn set_pending(&mut self, pending: Option<PendingDesiredState>) {
        self.pending = pending;
    }

    pub fn take_pending(&mut self) -> Option<PendingDesiredState> {
        self.pending.take()
    }

    /// The resource a user should see: the pending snapshot when one is
    /// waiting for the next start, the live resource otherwise.
    pub fn effective(&self) -> Result<DevWorkspace, WorkspaceError> {
        match &self.pending {
            Some(pending) => pending.desired(),
            None => Ok(self.clone()),
        }
    }

    /// All annotations as they appear on the wire, including pending state.
    pub fn wire_annotations(&self) -> BTreeMap<String, String> {
        let mut annotations = self.metadata.annotations.clone().unwrap_or_default();
        if let Some(pending) = &self.pending {
            annotations.insert(NEXT_START_ANNOTATION.to_string(), pending.raw.clone());
        }
        annotations
    }

    pub fn is_web_terminal(&self) -> bool {
        self.metadata
            .labels
            .as_ref()
            .and_then(|labels| labels.get(WEB_TERMINAL_LABEL))
            .is_some_and(|v| v == "true")
    }

    /// Append a plugin-reference component for a DevWorkspaceTemplate.
    pub fn add_plugin(&mut self, plugin_name: &str, namespace: &str) {
        let template = self.spec.template.get_or_insert_with(Default::default);
        template
            .components
            .get_or_insert_with(Vec::new)
            .push(Component::plugin_ref(plugin_name, namespace));
    }

    /// Owner reference used to garbage-collect resources derived from this one.
    pub fn owner_reference(&self) -> OwnerReference {
        OwnerReference {
            api_version: group_version(),
            kind: DEVWORKSPACE_KIND.to_string(),
            name: self.name().to_string(),
            uid: self.uid().to_string(),
            ..Default::default()
        }
    }
}

/// A plugin's configuration, owned by a DevWorkspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevWorkspaceTemplate {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: Devfile,
}

impl DevWorkspaceTemplate {
    pub fn new(name: impl Into<String>, namespace: Option<String>, spec: Devfile) -> Self {
        Self {
            api_version: group_version(),
            kind: DEVWORKSPACE_TEMPLATE_KIND.to_string(),
            metadata: ObjectMeta { name: Some(name.into()), namespace, ..Default::default() },
            spec,
        }
    }

    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }

    pub fn namespace(&self) -> &str {
        self.metadata.namespace.as_deref().unwrap_or_default()
    }

    /// Place the template next to `owner` and make `owner` its sole owner.
    pub fn adopt(&mut self, owner: &DevWorkspace) {
        self.metadata.namespace = Some(owner.namespace().to_string());
        self.metadata.owner_references = Some(vec![owner.owner_reference()]);
    }
}

/// Build a DevWorkspace from a devfile.
///
/// Annotations come from the devfile's `dw.metadata.annotations` metadata
/// attribute; an annotation for the next start becomes pending state.
pub fn devfile_to_devworkspace(devfile: &Devfile, routing_class: &str, started: bool) -> DevWorkspace {
    let annotations: BTreeMap<String, String> = devfile
        .metadata
        .attributes
        .as_ref()
        .and_then(|attrs| attrs.get(ANNOTATIONS_ATTRIBUTE))
        .and_then(Value::as_object)
        .map(|obj| {
            obj.iter()
                .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                .collect()
        })
        .unwrap_or_default();

    let metadata = ObjectMeta {
        name: Some(devfile.metadata.name.clone()).filter(|n| !n.is_empty()),
        namespace: devfile.metadata.namespace.clone(),
        annotations: Some(annotations).filter(|a| !a.is_empty()),
        ..Default::default()
    };

    let template = DevWorkspaceTemplateSpec {
        attributes: devfile.attributes.clone(),
        projects: devfile.projects.clone(),
        components: Some(devfile.components.clone().unwrap_or_default()),
        commands: devfile.commands.clone(),
        events: devfile.events.clone(),
        extra: Map::new(),
    };

    let spec = DevWorkspaceSpec {
        started,
        routing_class: Some(routing_class.to_string()),
        template: Some(template),
        extra: Map::new(),
    };

    DevWorkspace::new(metadata, spec)
}

/// Derive the user-facing devfile of a DevWorkspace.
///
/// Plugin-reference components are left out; they are injected by the
/// client on every update and are not part of what the user edits.
pub fn devworkspace_to_devfile(dw: &DevWorkspace) -> Devfile {
    let template = dw.spec.template.clone().unwrap_or_default();
    let components = template
        .components
        .map(|components| components.into_iter().filter(|c| !c.is_plugin()).collect());

    Devfile {
        schema_version: Some(DEVFILE_SCHEMA_VERSION.to_string()),
        metadata: DevfileMetadata {
            name: dw.name().to_string(),
            namespace: dw.metadata.namespace.clone(),
            ..Default::default()
        },
        attributes: template.attributes,
        projects: template.projects,
        components,
        commands: template.commands,
        events: template.events,
        extra: Map::new(),
    }
}

#[cfg(test)]
#[path = "devworkspace_tests.rs"]
mod tests;
