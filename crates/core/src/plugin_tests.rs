// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::plugin_devfile;
use serde_json::json;

#[yare::parameterized(
    spaces_and_case = { "My Plugin", "abc123", "my-plugin-abc123" },
    already_normal  = { "che-theia", "ws1", "che-theia-ws1" },
    each_space      = { "a  b", "x", "a--b-x" },
    id_verbatim     = { "Plugin", "WS-Id", "plugin-WS-Id" },
    empty_id        = { "Plugin", "", "plugin-" },
)]
fn normalizes_plugin_names(name: &str, id: &str, expected: &str) {
    assert_eq!(normalize_plugin_name(name, id), expected);
}

#[test]
fn normalization_is_deterministic() {
    assert_eq!(normalize_plugin_name("My Plugin", "abc123"), normalize_plugin_name("My Plugin", "abc123"));
}

#[yare::parameterized(
    explicit_dev_container = { json!({"che-theia.eclipse.org/sidecar-policy": "USE_DEV_CONTAINER"}), SidecarPolicy::UseDevContainer },
    explicit_merge         = { json!({"che-theia.eclipse.org/sidecar-policy": "MERGE_IMAGE"}), SidecarPolicy::MergeImage },
    unknown_value          = { json!({"che-theia.eclipse.org/sidecar-policy": "use_dev_container"}), SidecarPolicy::MergeImage },
    absent                 = { json!({}), SidecarPolicy::MergeImage },
)]
fn resolves_sidecar_policy(attributes: serde_json::Value, expected: SidecarPolicy) {
    let devfile = Devfile { attributes: attributes.as_object().cloned(), ..Default::default() };
    assert_eq!(SidecarPolicy::from_devfile(&devfile), expected);
}

#[test]
fn env_injection_is_additive() {
    let mut devfile = plugin_devfile("My Plugin");
    inject_plugin_env(&mut devfile, "https://che.example.com", Some("https://registry.example.com"));

    let components = devfile.components.as_ref().unwrap();
    let env = components[0].container.as_ref().unwrap().env.as_ref().unwrap();
    assert_eq!(
        env,
        &vec![
            EnvVar::new("EXISTING", "1"),
            EnvVar::new(DASHBOARD_URL_ENV, "https://che.example.com"),
            EnvVar::new(PLUGIN_REGISTRY_URL_ENV, "https://registry.example.com"),
        ]
    );
    // non-container components are untouched
    assert!(components[1].container.is_none());
}

#[test]
fn registry_env_is_skipped_without_url() {
    let mut devfile = plugin_devfile("plugin");
    devfile.components_mut()[0].container.as_mut().unwrap().env = None;
    inject_plugin_env(&mut devfile, "https://che.example.com", None);

    let env = devfile.components.as_ref().unwrap()[0].container.as_ref().unwrap().env.clone();
    assert_eq!(env, Some(vec![EnvVar::new(DASHBOARD_URL_ENV, "https://che.example.com")]));
}

#[test]
fn extra_files_expose_known_paths() {
    let files = ExtraFiles::new()
        .with(CHE_THEIA_PLUGINS_FILE, "- id: redhat/java/latest")
        .with(VSCODE_EXTENSIONS_FILE, r#"{"recommendations":[]}"#);
    assert_eq!(files.che_theia_plugins(), Some("- id: redhat/java/latest"));
    assert_eq!(files.vscode_extensions(), Some(r#"{"recommendations":[]}"#));
    assert!(ExtraFiles::new().che_theia_plugins().is_none());
}
