// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciliation driven through the lifecycle client

use std::time::Duration;

use dw_adapters::FakeStore;
use dw_core::test_support::{devfile, TEST_NAMESPACE};
use dw_core::{ExtraFiles, Phase};
use dw_engine::{ChannelCallbacks, ReconcileConfig, WorkspaceEvent};
use serde_json::json;
use similar_asserts::assert_eq;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::prelude::*;

async fn next_status(events: &mut UnboundedReceiver<WorkspaceEvent>) -> dw_core::StatusUpdate {
    match events.recv().await {
        Some(WorkspaceEvent::Status { update, .. }) => update,
        other => panic!("expected a status event, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn watch_reports_a_workspace_from_creation_to_deletion() {
    let store = FakeStore::new();
    let client = fake_client(&store);
    let created = client.create(&devfile("nodejs-web-app"), &[], &ExtraFiles::new()).await.unwrap();
    let name = created.name().to_string();

    let (callbacks, mut events) = ChannelCallbacks::new();
    let config = ReconcileConfig::default().interval(Duration::from_secs(1));
    let handle = client.subscribe_to_namespace(TEST_NAMESPACE, callbacks, config);

    // No status block yet: reported as starting, then announced
    let first = next_status(&mut events).await;
    assert_eq!(first.workspace_id, "workspace1");
    assert_eq!(first.status, Phase::Starting);
    assert_eq!(first.prev_status, None);
    match events.recv().await {
        Some(WorkspaceEvent::Added(added)) => assert_eq!(added.len(), 1),
        other => panic!("expected added, got {other:?}"),
    }

    store.set_status(
        TEST_NAMESPACE,
        &name,
        json!({"phase": "Running", "devworkspaceId": "workspace1", "message": "Ready"}),
    );
    let running = next_status(&mut events).await;
    assert_eq!(running.status, Phase::Running);
    assert_eq!(running.prev_status, Some(Phase::Starting));
    assert_eq!(running.message.as_deref(), Some("Ready"));

    // Same message is not repeated
    let steady = next_status(&mut events).await;
    assert_eq!(steady.prev_status, Some(Phase::Running));
    assert_eq!(steady.message, None);

    // Stopping forgets the message so it is reported again
    client.stop(TEST_NAMESPACE, &name).await.unwrap();
    let after_stop = next_status(&mut events).await;
    assert_eq!(after_stop.message.as_deref(), Some("Ready"));

    client.delete(TEST_NAMESPACE, &name).await.unwrap();
    match events.recv().await {
        Some(WorkspaceEvent::Removed(ids)) => assert_eq!(ids, vec!["workspace1".to_string()]),
        other => panic!("expected removed, got {other:?}"),
    }

    handle.shutdown().await;
}
