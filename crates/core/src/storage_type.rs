// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace storage types, encoded in legacy devfile attributes.
//!
//! | type         | `persistVolumes` | `asyncPersist` |
//! |--------------|------------------|----------------|
//! | `persistent` | absent           | absent         |
//! | `ephemeral`  | `"false"`        | absent         |
//! | `async`      | `"false"`        | `"true"`       |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const PERSIST_VOLUMES: &str = "persistVolumes";
const ASYNC_PERSIST: &str = "asyncPersist";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    #[default]
    Persistent,
    Ephemeral,
    Async,
}

crate::simple_display! {
    StorageType {
        Persistent => "persistent",
        Ephemeral => "ephemeral",
        Async => "async",
    }
}

impl StorageType {
    pub fn from_attributes(attributes: Option<&Map<String, Value>>) -> Self {
        let Some(attributes) = attributes else {
            return StorageType::Persistent;
        };
        let flag = |key: &str| attributes.get(key).and_then(Value::as_str);
        match (flag(PERSIST_VOLUMES), flag(ASYNC_PERSIST)) {
            (Some("false"), Some("true")) => StorageType::Async,
            (Some("false"), _) => StorageType::Ephemeral,
            _ => StorageType::Persistent,
        }
    }

    /// Rewrite the storage attributes in place, leaving other attributes alone.
    pub fn apply_to(self, attributes: &mut Map<String, Value>) {
        attributes.remove(PERSIST_VOLUMES);
        attributes.remove(ASYNC_PERSIST);
        match self {
            StorageType::Persistent => {}
            StorageType::Ephemeral => {
                attributes.insert(PERSIST_VOLUMES.to_string(), Value::from("false"));
            }
            StorageType::Async => {
                attributes.insert(PERSIST_VOLUMES.to_string(), Value::from("false"));
                attributes.insert(ASYNC_PERSIST.to_string(), Value::from("true"));
            }
        }
    }
}

#[cfg(test)]
#[path = "storage_type_tests.rs"]
mod tests;
