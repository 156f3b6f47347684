// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Devfile documents.
//!
//! [`DevfileDocument`] is the opaque form handed to and from editors: any
//! JSON object, legacy (v1) or current (v2). [`Devfile`] is the typed v2 view
//! used when the client needs to look inside (components, projects,
//! attributes). Unknown keys are carried in `extra` maps so a document
//! survives a parse/serialize round trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::WorkspaceError;

/// Schema version stamped on devfiles converted from DevWorkspaces
pub const DEVFILE_SCHEMA_VERSION: &str = "2.1.0";

/// Typed devfile v2 document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Devfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(default)]
    pub metadata: DevfileMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DevfileMetadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A devfile component. Only the container and plugin variants are inspected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<Container>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<PluginComponent>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvVar>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

impl EnvVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes: Option<KubernetesRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reference to a cluster object by name and namespace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KubernetesRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl Component {
    /// Plugin-reference component pointing at a DevWorkspaceTemplate.
    pub fn plugin_ref(name: &str, namespace: &str) -> Self {
        Self {
            name: name.to_string(),
            plugin: Some(PluginComponent {
                kubernetes: Some(KubernetesRef {
                    name: name.to_string(),
                    namespace: Some(namespace.to_string()),
                }),
                extra: Map::new(),
            }),
            ..Default::default()
        }
    }

    pub fn is_plugin(&self) -> bool {
        self.plugin.is_some()
    }
}

impl Devfile {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Mutable access to the component list, creating it when absent.
    pub fn components_mut(&mut self) -> &mut Vec<Component> {
        self.components.get_or_insert_with(Vec::new)
    }

    /// Look up a top-level string attribute.
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.as_ref().and_then(|attrs| attrs.get(key)).and_then(Value::as_str)
    }

    pub fn project_names(&self) -> Vec<String> {
        self.projects.iter().flatten().map(|p| p.name.clone()).collect()
    }
}

/// Opaque devfile content, as displayed and edited by users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DevfileDocument(Value);

impl DevfileDocument {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn from_devfile(devfile: &Devfile) -> Result<Self, WorkspaceError> {
        serde_json::to_value(devfile).map(Self).map_err(WorkspaceError::invalid("devfile"))
    }

    /// A devfile v2 document declares its `schemaVersion`.
    pub fn is_v2(&self) -> bool {
        self.0.get("schemaVersion").is_some()
    }

    /// Parse into the typed v2 form.
    pub fn to_devfile(&self) -> Result<Devfile, WorkspaceError> {
        if !self.0.is_object() {
            return Err(WorkspaceError::InvalidDevfile("devfile must be an object".to_string()));
        }
        serde_json::from_value(self.0.clone()).map_err(WorkspaceError::invalid("devfile"))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Key-order independent comparison.
    pub fn content_eq(&self, other: &DevfileDocument) -> bool {
        json_eq(&self.0, &other.0)
    }
}

impl PartialEq for DevfileDocument {
    fn eq(&self, other: &Self) -> bool {
        self.content_eq(other)
    }
}

impl From<Value> for DevfileDocument {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Deep structural equality independent of key order.
///
/// `Value` object equality is map equality, so key order never matters,
/// with or without serde_json's `preserve_order` feature.
pub fn json_eq(a: &Value, b: &Value) -> bool {
    a == b
}

#[cfg(test)]
#[path = "devfile_tests.rs"]
mod tests;
