// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::time::Duration;

use dw_engine::{
    ClientConfig, ReconcileConfig, DEFAULT_DASHBOARD_URL, DEFAULT_NAMESPACE, DEFAULT_STATUS_ATTEMPTS,
    DEFAULT_STATUS_DELAY, DEFAULT_WATCH_INTERVAL,
};

/// Namespace for commands that do not pass `--namespace`
pub fn namespace() -> String {
    std::env::var("DW_NAMESPACE")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
}

/// Dashboard origin injected into plugin containers
pub fn dashboard_url() -> String {
    std::env::var("DW_DASHBOARD_URL")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_DASHBOARD_URL.to_string())
}

/// Plugin registry injected into plugin containers, when set
pub fn plugin_registry_url() -> Option<String> {
    std::env::var("DW_PLUGIN_REGISTRY_URL").ok().filter(|s| !s.is_empty())
}

/// Reconciliation interval (default 3s, configurable via `DW_WATCH_INTERVAL_MS`).
/// Zero is ignored.
pub fn watch_interval() -> Duration {
    millis("DW_WATCH_INTERVAL_MS").filter(|d| !d.is_zero()).unwrap_or(DEFAULT_WATCH_INTERVAL)
}

pub fn status_attempts() -> u32 {
    std::env::var("DW_STATUS_ATTEMPTS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_STATUS_ATTEMPTS)
}

pub fn status_delay() -> Duration {
    millis("DW_STATUS_DELAY_MS").unwrap_or(DEFAULT_STATUS_DELAY)
}

fn millis(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

/// Client settings from the environment, with `namespace` taking precedence
/// over `DW_NAMESPACE`.
pub fn client_config(namespace: Option<&str>) -> ClientConfig {
    let config = ClientConfig::default()
        .namespace(namespace.map(str::to_string).unwrap_or_else(self::namespace))
        .dashboard_url(dashboard_url())
        .max_status_attempts(status_attempts())
        .status_delay(status_delay());
    match plugin_registry_url() {
        Some(url) => config.plugin_registry_url(url),
        None => config,
    }
}

pub fn reconcile_config() -> ReconcileConfig {
    ReconcileConfig::default().interval(watch_interval())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
