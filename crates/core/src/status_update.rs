// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status transition records emitted by the reconciliation loop

use serde::{Deserialize, Serialize};

use crate::phase::Phase;

/// One observed transition of a workspace's phase.
///
/// `prev_status` is `None` the first time a workspace id is observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub workspace_id: String,
    pub status: Phase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_status: Option<Phase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusUpdate {
    pub fn new(workspace_id: impl Into<String>, status: Phase, prev_status: Option<Phase>) -> Self {
        Self { workspace_id: workspace_id.into(), status, prev_status, message: None, error: None }
    }

    crate::setters! {
        option {
            message: String,
            error: String,
        }
    }

    /// True when the phase differs from the previous observation.
    pub fn is_transition(&self) -> bool {
        self.prev_status.as_ref() != Some(&self.status)
    }
}

#[cfg(test)]
#[path = "status_update_tests.rs"]
mod tests;
