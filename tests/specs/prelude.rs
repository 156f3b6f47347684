// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for specs

use std::process::Output;
use std::sync::Arc;

use dw_adapters::{FakeResolver, FakeStore};
use dw_core::test_support::TEST_NAMESPACE;
use dw_core::{DevfileDocument, WorkspaceView};
use dw_engine::{ClientConfig, LifecycleClient};
use serde_json::json;

use similar_asserts::assert_eq;

/// A `dw` invocation that cannot reach a cluster.
pub fn cli() -> Cli {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = assert_cmd::Command::cargo_bin("dw").unwrap();
    cmd.env("HOME", home.path())
        .env("KUBECONFIG", home.path().join("missing-kubeconfig"))
        .env("NO_COLOR", "1")
        .env_remove("KUBERNETES_SERVICE_HOST")
        .env_remove("KUBERNETES_SERVICE_PORT")
        .env_remove("DW_NAMESPACE")
        .env_remove("RUST_LOG");
    Cli { cmd, _home: home }
}

pub struct Cli {
    cmd: assert_cmd::Command,
    _home: tempfile::TempDir,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    /// Run and require exit code 0.
    pub fn passes(mut self) -> RunResult {
        let output = self.cmd.output().unwrap();
        let result = RunResult { output };
        assert!(result.output.status.success(), "expected success\n{}", result.describe());
        result
    }

    /// Run and require a non-zero exit code.
    pub fn fails(mut self) -> RunResult {
        let output = self.cmd.output().unwrap();
        let result = RunResult { output };
        assert!(!result.output.status.success(), "expected failure\n{}", result.describe());
        result
    }
}

pub struct RunResult {
    output: Output,
}

impl RunResult {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(&self, needle: &str) -> &Self {
        assert!(self.stdout().contains(needle), "stdout missing {:?}\n{}", needle, self.describe());
        self
    }

    pub fn stderr_has(&self, needle: &str) -> &Self {
        assert!(self.stderr().contains(needle), "stderr missing {:?}\n{}", needle, self.describe());
        self
    }

    pub fn code(&self, expected: i32) -> &Self {
        assert_eq!(self.output.status.code(), Some(expected), "{}", self.describe());
        self
    }

    fn describe(&self) -> String {
        format!("status: {}\nstdout:\n{}\nstderr:\n{}", self.output.status, self.stdout(), self.stderr())
    }
}

pub type FakeClient = LifecycleClient<FakeStore, FakeResolver>;

pub fn fake_client(store: &FakeStore) -> FakeClient {
    LifecycleClient::new(
        Arc::new(store.clone()),
        Arc::new(FakeResolver::new()),
        ClientConfig::default().namespace(TEST_NAMESPACE),
    )
}

/// The view's devfile with a database container appended
pub fn with_database(view: &WorkspaceView) -> DevfileDocument {
    let mut doc = view.devfile_content().unwrap().into_value();
    doc["components"]
        .as_array_mut()
        .unwrap()
        .push(json!({"name": "database", "container": {"image": "quay.io/eclipse/che--centos--postgresql"}}));
    DevfileDocument::new(doc)
}

pub fn component_names(store: &FakeStore, name: &str) -> Vec<String> {
    let value = store.value(TEST_NAMESPACE, name).unwrap();
    value["spec"]["template"]["components"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["name"].as_str().map(str::to_string))
        .collect()
}
