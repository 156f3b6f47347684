// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use dw_core::plugin::{CHE_THEIA_PLUGINS_FILE, VSCODE_EXTENSIONS_FILE};
use dw_core::test_support::{devfile, devworkspace, plugin_devfile};

fn request(extra_files: ExtraFiles) -> ResolveRequest {
    ResolveRequest {
        devfile: devfile("wksp"),
        workspace: devworkspace("wksp", "ws1", None),
        templates: vec![DevWorkspaceTemplate::new("my-plugin-ws1", None, plugin_devfile("My Plugin"))],
        extra_files,
        sidecar_policy: SidecarPolicy::MergeImage,
        suffix: "ws1".to_string(),
    }
}

#[tokio::test]
async fn passthrough_keeps_templates() {
    let resolution = PassthroughResolver.resolve(request(ExtraFiles::new())).await.unwrap();
    assert_eq!(resolution.templates.len(), 1);
    assert_eq!(resolution.templates[0].name(), "my-plugin-ws1");
    assert_eq!(resolution.devfile, devfile("wksp"));
}

#[tokio::test]
async fn passthrough_rejects_malformed_extensions_file() {
    let files = ExtraFiles::new().with(VSCODE_EXTENSIONS_FILE, "{recommendations: [");
    let err = PassthroughResolver.resolve(request(files)).await.unwrap_err();
    assert!(matches!(err, ResolveError::InvalidFile { file: VSCODE_EXTENSIONS_FILE, .. }));
}

#[tokio::test]
async fn fake_records_requests_and_emits_extra_templates() {
    let resolver = FakeResolver::new();
    resolver.emit(DevWorkspaceTemplate::new("extension-ws1", None, Default::default()));

    let files = ExtraFiles::new().with(CHE_THEIA_PLUGINS_FILE, "- id: redhat/java/latest");
    let resolution = resolver.resolve(request(files)).await.unwrap();

    let names: Vec<&str> = resolution.templates.iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["my-plugin-ws1", "extension-ws1"]);

    let calls = resolver.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].suffix, "ws1");
    assert_eq!(calls[0].che_theia_plugins.as_deref(), Some("- id: redhat/java/latest"));
    assert_eq!(calls[0].vscode_extensions, None);
}
