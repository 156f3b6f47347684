// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end lifecycle against the in-memory store

use dw_adapters::{FakeStore, StoreOp};
use dw_core::test_support::{devfile, plugin_devfile, TEST_NAMESPACE};
use dw_core::{ExtraFiles, WorkspaceView, NEXT_START_ANNOTATION};
use dw_engine::{ClientError, SaveMode, SaveOutcome};
use serde_json::json;
use similar_asserts::assert_eq;

use crate::prelude::*;

fn running_status(id: &str) -> serde_json::Value {
    json!({
        "phase": "Running",
        "devworkspaceId": id,
        "mainUrl": format!("https://ide.example.com/{id}"),
    })
}

#[tokio::test]
async fn edit_while_running_applies_on_next_start() {
    let store = FakeStore::new();
    let client = fake_client(&store);
    let plugins = [plugin_devfile("Theia IDE")];

    let created = client.create(&devfile("nodejs-web-app"), &plugins, &ExtraFiles::new()).await.unwrap();
    let name = created.name().to_string();
    assert_eq!(created.workspace_id(), "workspace1");
    assert!(created.spec.started);

    // The controller brings it up
    store.set_status(TEST_NAMESPACE, &name, running_status("workspace1"));
    let running = client.get_by_name(TEST_NAMESPACE, &name).await.unwrap();
    assert_eq!(running.main_url(), Some("https://ide.example.com/workspace1"));

    let view = WorkspaceView::from(running);
    let before = component_names(&store, &name);
    let mode = SaveMode::for_view(&view, false);
    assert_eq!(mode, SaveMode::Deferred);

    let outcome = client.editor().save(&view, with_database(&view), &plugins, mode).await.unwrap();
    assert!(matches!(outcome, SaveOutcome::Saved(_)));
    assert_eq!(component_names(&store, &name), before);
    assert!(store.workspace(TEST_NAMESPACE, &name).unwrap().has_pending());

    let started = client.start(TEST_NAMESPACE, &name, &plugins).await.unwrap();

    assert!(started.spec.started);
    assert!(!started.has_pending());
    assert!(component_names(&store, &name).contains(&"database".to_string()));
    let value = store.value(TEST_NAMESPACE, &name).unwrap();
    assert!(value["metadata"]["annotations"][NEXT_START_ANNOTATION].is_null());
}

#[tokio::test]
async fn plugin_templates_are_linked_and_deleted_with_the_workspace() {
    let store = FakeStore::new();
    let client = fake_client(&store);

    let created = client
        .create(&devfile("nodejs-web-app"), &[plugin_devfile("Theia IDE")], &ExtraFiles::new())
        .await
        .unwrap();
    let name = created.name().to_string();

    let templates = store.templates();
    assert_eq!(templates.len(), 1);
    assert!(templates[0].name().ends_with("workspace1"));
    assert!(component_names(&store, &name).contains(&templates[0].name().to_string()));

    client.delete(TEST_NAMESPACE, &name).await.unwrap();

    assert!(store.workspace(TEST_NAMESPACE, &name).is_none());
    assert!(store.templates().is_empty());
}

#[tokio::test]
async fn failed_template_creation_leaves_nothing_behind() {
    let store = FakeStore::new();
    store.fail(StoreOp::CreateTemplate);
    let client = fake_client(&store);

    let result =
        client.create(&devfile("nodejs-web-app"), &[plugin_devfile("Theia IDE")], &ExtraFiles::new()).await;

    assert!(result.is_err());
    assert!(store.workspace(TEST_NAMESPACE, "nodejs-web-app").is_none());
    assert!(store.templates().is_empty());
}

#[tokio::test]
async fn failed_workspace_surfaces_controller_message() {
    let store = FakeStore::new();
    let client = fake_client(&store);
    let created = client.create(&devfile("nodejs-web-app"), &[], &ExtraFiles::new()).await.unwrap();
    let name = created.name().to_string();

    store.set_status(
        TEST_NAMESPACE,
        &name,
        json!({"phase": "Failed", "devworkspaceId": "workspace1", "message": "image pull backoff"}),
    );

    let err = client.get_by_name(TEST_NAMESPACE, &name).await.unwrap_err();
    match err {
        ClientError::TerminalFailure(message) => assert_eq!(message, "image pull backoff"),
        other => panic!("expected terminal failure, got {other}"),
    }
}
