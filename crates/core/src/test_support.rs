// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

#![allow(clippy::panic)]

use serde_json::{json, Value};

use crate::devfile::Devfile;
use crate::devworkspace::DevWorkspace;

pub const TEST_NAMESPACE: &str = "user-che";

// ── Resource fixtures ───────────────────────────────────────────────────────

/// A DevWorkspace with one container and one plugin component.
///
/// `phase == None` produces a resource the controller has not reconciled
/// yet (no status block at all).
pub fn devworkspace_value(name: &str, id: &str, phase: Option<&str>) -> Value {
    let mut value = json!({
        "apiVersion": "workspace.devfile.io/v1alpha2",
        "kind": "DevWorkspace",
        "metadata": {
            "name": name,
            "namespace": TEST_NAMESPACE,
            "uid": format!("uid-{name}"),
            "creationTimestamp": "2020-09-13T12:26:40Z",
        },
        "spec": {
            "started": phase == Some("Running"),
            "routingClass": "che",
            "template": {
                "components": [
                    {"name": "tools", "container": {"image": "quay.io/devfile/universal-developer-image"}},
                    {"name": format!("theia-ide-{id}"), "plugin": {"kubernetes": {"name": format!("theia-ide-{id}"), "namespace": TEST_NAMESPACE}}},
                ],
                "projects": [{"name": "web-nodejs-sample"}],
            },
        },
    });
    if let Some(phase) = phase {
        value["status"] = json!({
            "phase": phase,
            "devworkspaceId": id,
            "mainUrl": format!("https://ide.example.com/{id}"),
        });
    }
    value
}

pub fn devworkspace(name: &str, id: &str, phase: Option<&str>) -> DevWorkspace {
    match DevWorkspace::from_value(devworkspace_value(name, id, phase)) {
        Ok(dw) => dw,
        Err(e) => panic!("fixture DevWorkspace is invalid: {e}"),
    }
}

/// A legacy workspace with an IDE server and ephemeral storage.
pub fn legacy_value(name: &str, status: &str) -> Value {
    json!({
        "id": "workspacelegacy1",
        "namespace": "admin",
        "status": status,
        "attributes": {
            "created": "1600000000000",
            "updated": "1600000100000",
            "infrastructureNamespace": "admin-che",
            "stackName": "Java Maven",
        },
        "devfile": {
            "apiVersion": "1.0.0",
            "metadata": {"name": name},
            "attributes": {"persistVolumes": "false"},
            "projects": [{"name": "console-java-simple", "source": {"type": "git", "location": "https://example.com/console-java-simple.git"}}],
        },
        "runtime": {
            "machines": {
                "theia-ide": {
                    "servers": {
                        "theia": {"url": "https://theia.example.com/", "attributes": {"type": "ide"}},
                        "theia-dev": {"url": "https://dev.example.com/", "attributes": {"type": "ide-dev"}},
                    },
                },
            },
        },
    })
}

/// A devfile v2 with a single container component.
pub fn devfile(name: &str) -> Devfile {
    let value = json!({
        "schemaVersion": "2.1.0",
        "metadata": {"name": name, "namespace": TEST_NAMESPACE},
        "components": [{"name": "tools", "container": {"image": "quay.io/devfile/universal-developer-image"}}],
        "projects": [{"name": "web-nodejs-sample"}],
    });
    match serde_json::from_value(value) {
        Ok(devfile) => devfile,
        Err(e) => panic!("fixture devfile is invalid: {e}"),
    }
}

/// A plugin devfile carrying one sidecar container.
pub fn plugin_devfile(name: &str) -> Devfile {
    let value = json!({
        "schemaVersion": "2.1.0",
        "metadata": {"name": name},
        "components": [
            {"name": format!("{}-sidecar", name.to_lowercase().replace(' ', "-")), "container": {
                "image": "quay.io/eclipse/che-sidecar",
                "env": [{"name": "EXISTING", "value": "1"}],
            }},
            {"name": "plugin-volume", "volume": {}},
        ],
    });
    match serde_json::from_value(value) {
        Ok(devfile) => devfile,
        Err(e) => panic!("fixture plugin devfile is invalid: {e}"),
    }
}
