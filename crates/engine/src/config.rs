// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine configuration.

use std::time::Duration;

pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_DASHBOARD_URL: &str = "http://localhost:8080";
pub const DEFAULT_STATUS_ATTEMPTS: u32 = 10;
pub const DEFAULT_STATUS_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_WATCH_INTERVAL: Duration = Duration::from_millis(3000);

/// Settings for [`crate::LifecycleClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Namespace for devfiles that do not name one
    pub namespace: String,
    /// Injected into plugin containers as `CHE_DASHBOARD_URL`
    pub dashboard_url: String,
    /// Injected into plugin containers as `CHE_PLUGIN_REGISTRY_URL`
    pub plugin_registry_url: Option<String>,
    /// Upper bound on fetches while waiting for a usable status
    pub max_status_attempts: u32,
    pub status_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            dashboard_url: DEFAULT_DASHBOARD_URL.to_string(),
            plugin_registry_url: None,
            max_status_attempts: DEFAULT_STATUS_ATTEMPTS,
            status_delay: DEFAULT_STATUS_DELAY,
        }
    }
}

impl ClientConfig {
    dw_core::setters! {
        into {
            namespace: String,
            dashboard_url: String,
        }
        set {
            max_status_attempts: u32,
            status_delay: Duration,
        }
        option {
            plugin_registry_url: String,
        }
    }
}

/// Settings for [`crate::Reconciler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileConfig {
    pub interval: Duration,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self { interval: DEFAULT_WATCH_INTERVAL }
    }
}

impl ReconcileConfig {
    dw_core::setters! {
        set {
            interval: Duration,
        }
    }
}
