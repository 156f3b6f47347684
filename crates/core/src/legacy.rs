// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Legacy workspace shape (`id` + `devfile` + `status`).
//!
//! The devfile of a legacy workspace is a v1 document and is kept as raw
//! JSON; only the handful of fields the adapter exposes are read from it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::WorkspaceError;
use crate::storage_type::StorageType;

/// Server attribute value that marks the IDE endpoint
const IDE_SERVER_TYPE: &str = "ide";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyWorkspace {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub status: String,
    pub devfile: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<LegacyAttributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<LegacyRuntime>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAttributes {
    /// Epoch milliseconds, as a decimal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infrastructure_namespace: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyRuntime {
    #[serde(default)]
    pub machines: BTreeMap<String, Machine>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    #[serde(default)]
    pub servers: BTreeMap<String, Server>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Server {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LegacyWorkspace {
    pub fn from_value(value: Value) -> Result<Self, WorkspaceError> {
        serde_json::from_value(value).map_err(WorkspaceError::invalid("legacy workspace"))
    }

    pub fn name(&self) -> &str {
        self.devfile.pointer("/metadata/name").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn set_name(&mut self, name: &str) {
        if let Some(metadata) = self.devfile_object_mut("metadata") {
            metadata.insert("name".to_string(), Value::from(name));
        }
    }

    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or_default()
    }

    pub fn infrastructure_namespace(&self) -> &str {
        self.attributes
            .as_ref()
            .and_then(|a| a.infrastructure_namespace.as_deref())
            .unwrap_or_default()
    }

    pub fn created(&self) -> u64 {
        parse_epoch_ms(self.attributes.as_ref().and_then(|a| a.created.as_deref()))
    }

    pub fn updated(&self) -> u64 {
        parse_epoch_ms(self.attributes.as_ref().and_then(|a| a.updated.as_deref()))
    }

    /// URL of the first runtime server advertised as the IDE.
    pub fn ide_url(&self) -> Option<&str> {
        let runtime = self.runtime.as_ref()?;
        runtime
            .machines
            .values()
            .flat_map(|machine| machine.servers.values())
            .find(|server| {
                server
                    .attributes
                    .as_ref()
                    .and_then(|attrs| attrs.get("type"))
                    .and_then(Value::as_str)
                    == Some(IDE_SERVER_TYPE)
            })
            .and_then(|server| server.url.as_deref())
    }

    pub fn storage_type(&self) -> StorageType {
        StorageType::from_attributes(self.devfile.get("attributes").and_then(Value::as_object))
    }

    pub fn set_storage_type(&mut self, storage_type: StorageType) {
        if let Some(attributes) = self.devfile_object_mut("attributes") {
            storage_type.apply_to(attributes);
        }
    }

    pub fn project_names(&self) -> Vec<String> {
        self.devfile
            .get("projects")
            .and_then(Value::as_array)
            .map(|projects| {
                projects
                    .iter()
                    .filter_map(|p| p.get("name").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Object-valued devfile section, created when missing.
    fn devfile_object_mut(&mut self, key: &str) -> Option<&mut Map<String, Value>> {
        let devfile = self.devfile.as_object_mut()?;
        let section = devfile.entry(key.to_string()).or_insert_with(|| Value::Object(Map::new()));
        if section.is_null() {
            *section = Value::Object(Map::new());
        }
        section.as_object_mut()
    }
}

fn parse_epoch_ms(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok()).unwrap_or(0)
}
