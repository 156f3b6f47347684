// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

fn attrs(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[yare::parameterized(
    no_flags     = { json!({}), StorageType::Persistent },
    persist_true = { json!({"persistVolumes": "true"}), StorageType::Persistent },
    ephemeral    = { json!({"persistVolumes": "false"}), StorageType::Ephemeral },
    async_       = { json!({"persistVolumes": "false", "asyncPersist": "true"}), StorageType::Async },
    async_alone  = { json!({"asyncPersist": "true"}), StorageType::Persistent },
)]
fn reads_storage_type(attributes: Value, expected: StorageType) {
    assert_eq!(StorageType::from_attributes(Some(&attrs(attributes))), expected);
}

#[test]
fn missing_attributes_mean_persistent() {
    assert_eq!(StorageType::from_attributes(None), StorageType::Persistent);
}

#[test]
fn apply_switches_between_types_and_keeps_other_attributes() {
    let mut attributes = attrs(json!({"editor": "theia", "persistVolumes": "false", "asyncPersist": "true"}));

    StorageType::Ephemeral.apply_to(&mut attributes);
    assert_eq!(Value::Object(attributes.clone()), json!({"editor": "theia", "persistVolumes": "false"}));

    StorageType::Persistent.apply_to(&mut attributes);
    assert_eq!(Value::Object(attributes.clone()), json!({"editor": "theia"}));

    StorageType::Async.apply_to(&mut attributes);
    assert_eq!(StorageType::from_attributes(Some(&attributes)), StorageType::Async);
}

#[test]
fn displays_lowercase_names() {
    assert_eq!(StorageType::Async.to_string(), "async");
    assert_eq!(StorageType::default().to_string(), "persistent");
}
