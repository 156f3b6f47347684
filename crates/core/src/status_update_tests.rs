// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn serializes_camel_case_and_omits_absent_fields() {
    let update = StatusUpdate::new("ws1", Phase::Running, Some(Phase::Starting));
    assert_eq!(
        serde_json::to_value(&update).unwrap(),
        json!({"workspaceId": "ws1", "status": "Running", "prevStatus": "Starting"})
    );

    let update = StatusUpdate::new("ws1", Phase::Failed, None).message("boom").error("failed");
    assert_eq!(
        serde_json::to_value(&update).unwrap(),
        json!({"workspaceId": "ws1", "status": "Failed", "message": "boom", "error": "failed"})
    );
}

#[yare::parameterized(
    first_seen = { None, true },
    unchanged  = { Some(Phase::Running), false },
    changed    = { Some(Phase::Starting), true },
)]
fn detects_transitions(prev: Option<Phase>, expected: bool) {
    assert_eq!(StatusUpdate::new("ws1", Phase::Running, prev).is_transition(), expected);
}
