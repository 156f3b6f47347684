// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

const VARS: &[&str] = &[
    "DW_NAMESPACE",
    "DW_DASHBOARD_URL",
    "DW_PLUGIN_REGISTRY_URL",
    "DW_WATCH_INTERVAL_MS",
    "DW_STATUS_ATTEMPTS",
    "DW_STATUS_DELAY_MS",
];

fn clear() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn defaults_without_environment() {
    clear();

    let config = client_config(None);
    assert_eq!(config, ClientConfig::default());
    assert_eq!(reconcile_config().interval, Duration::from_secs(3));
}

#[test]
#[serial]
fn environment_overrides_defaults() {
    clear();
    std::env::set_var("DW_NAMESPACE", "user-che");
    std::env::set_var("DW_DASHBOARD_URL", "https://che.example.com");
    std::env::set_var("DW_PLUGIN_REGISTRY_URL", "https://registry.example.com/v3");
    std::env::set_var("DW_STATUS_ATTEMPTS", "3");
    std::env::set_var("DW_STATUS_DELAY_MS", "50");
    std::env::set_var("DW_WATCH_INTERVAL_MS", "1000");

    let config = client_config(None);
    assert_eq!(config.namespace, "user-che");
    assert_eq!(config.dashboard_url, "https://che.example.com");
    assert_eq!(config.plugin_registry_url.as_deref(), Some("https://registry.example.com/v3"));
    assert_eq!(config.max_status_attempts, 3);
    assert_eq!(config.status_delay, Duration::from_millis(50));
    assert_eq!(watch_interval(), Duration::from_secs(1));
    clear();
}

#[test]
#[serial]
fn flag_namespace_beats_environment() {
    clear();
    std::env::set_var("DW_NAMESPACE", "user-che");

    assert_eq!(client_config(Some("team-a")).namespace, "team-a");
    clear();
}

#[test]
#[serial]
fn invalid_attempts_fall_back() {
    for raw in ["0", "ten", ""] {
        clear();
        std::env::set_var("DW_STATUS_ATTEMPTS", raw);
        assert_eq!(status_attempts(), DEFAULT_STATUS_ATTEMPTS, "raw {:?}", raw);
    }
    clear();
}

#[test]
#[serial]
fn invalid_watch_interval_falls_back() {
    for raw in ["0", "-5", "soon", ""] {
        clear();
        std::env::set_var("DW_WATCH_INTERVAL_MS", raw);
        assert_eq!(watch_interval(), DEFAULT_WATCH_INTERVAL, "raw {:?}", raw);
        assert_eq!(reconcile_config().interval, DEFAULT_WATCH_INTERVAL);
    }
    clear();
}
