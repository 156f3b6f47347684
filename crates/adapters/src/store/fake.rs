// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory store for tests.
//!
//! Resources are held in wire form so JSON patches apply exactly as they
//! would on the cluster. Every call is recorded; `get` can be scripted with a
//! queue of responses to drive polling and concurrency scenarios.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use dw_core::{DevWorkspace, DevWorkspaceTemplate, DEVWORKSPACE_KIND, DEVWORKSPACE_TEMPLATE_KIND};
use parking_lot::Mutex;
use serde_json::{json, Value};

use super::{DevWorkspaceStore, PatchOp, StoreError};

/// Recorded store call
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    IsEnabled,
    List { namespace: String },
    Get { namespace: String, name: String },
    Create { namespace: String, name: String },
    Patch { namespace: String, name: String, ops: Vec<PatchOp> },
    Delete { namespace: String, name: String },
    CreateTemplate { namespace: String, name: String },
    InitializeNamespace { namespace: String },
}

/// Operation selector for injected failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    List,
    Get,
    Create,
    Patch,
    Delete,
    CreateTemplate,
    InitializeNamespace,
}

#[derive(Default)]
struct FakeStoreState {
    enabled: bool,
    workspaces: BTreeMap<(String, String), Value>,
    templates: Vec<DevWorkspaceTemplate>,
    calls: Vec<StoreCall>,
    scripted_gets: VecDeque<Value>,
    failures: HashSet<StoreOp>,
    next_id: u64,
}

/// Fake store for testing
#[derive(Clone)]
pub struct FakeStore {
    inner: Arc<Mutex<FakeStoreState>>,
}

impl Default for FakeStore {
    fn default() -> Self {
        Self { inner: Arc::new(Mutex::new(FakeStoreState { enabled: true, ..Default::default() })) }
    }
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().calls.clear();
    }

    /// Recorded patch batches, in order
    pub fn patches(&self) -> Vec<Vec<PatchOp>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                StoreCall::Patch { ops, .. } => Some(ops),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, matches: impl Fn(&StoreCall) -> bool) -> usize {
        self.inner.lock().calls.iter().filter(|c| matches(c)).count()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.inner.lock().enabled = enabled;
    }

    /// Seed or overwrite a resource (wire form).
    pub fn insert(&self, value: Value) {
        let key = key_of(&value);
        self.inner.lock().workspaces.insert(key, value);
    }

    pub fn insert_workspace(&self, workspace: &DevWorkspace) {
        if let Ok(value) = workspace.to_value() {
            self.insert(value);
        }
    }

    /// Remove a resource without recording a call, as another client would.
    pub fn remove(&self, namespace: &str, name: &str) {
        self.inner.lock().workspaces.remove(&(namespace.to_string(), name.to_string()));
    }

    /// Stored wire form of a resource
    pub fn value(&self, namespace: &str, name: &str) -> Option<Value> {
        self.inner.lock().workspaces.get(&(namespace.to_string(), name.to_string())).cloned()
    }

    pub fn workspace(&self, namespace: &str, name: &str) -> Option<DevWorkspace> {
        self.value(namespace, name).and_then(|v| DevWorkspace::from_value(v).ok())
    }

    pub fn templates(&self) -> Vec<DevWorkspaceTemplate> {
        self.inner.lock().templates.clone()
    }

    /// Simulate the controller reporting a new status.
    pub fn set_status(&self, namespace: &str, name: &str, status: Value) {
        let mut state = self.inner.lock();
        if let Some(value) = state.workspaces.get_mut(&(namespace.to_string(), name.to_string())) {
            value["status"] = status;
        }
    }

    /// Queue a response for the next `get`, served before the stored copy.
    pub fn script_get(&self, value: Value) {
        self.inner.lock().scripted_gets.push_back(value);
    }

    /// Make every subsequent call of `op` fail until [`FakeStore::heal`].
    pub fn fail(&self, op: StoreOp) {
        self.inner.lock().failures.insert(op);
    }

    pub fn heal(&self, op: StoreOp) {
        self.inner.lock().failures.remove(&op);
    }
}

fn key_of(value: &Value) -> (String, String) {
    let field = |f: &str| value["metadata"][f].as_str().unwrap_or_default().to_string();
    (field("namespace"), field("name"))
}

fn injected(op: StoreOp) -> StoreError {
    StoreError::Api(format!("injected {:?} failure", op))
}

fn not_found(kind: &'static str, namespace: &str, name: &str) -> StoreError {
    StoreError::NotFound { kind, namespace: namespace.to_string(), name: name.to_string() }
}

impl FakeStoreState {
    fn check(&self, op: StoreOp) -> Result<(), StoreError> {
        if self.failures.contains(&op) {
            return Err(injected(op));
        }
        Ok(())
    }
}

#[async_trait]
impl DevWorkspaceStore for FakeStore {
    async fn is_enabled(&self) -> Result<bool, StoreError> {
        let mut state = self.inner.lock();
        state.calls.push(StoreCall::IsEnabled);
        Ok(state.enabled)
    }

    async fn list(&self, namespace: &str) -> Result<Vec<DevWorkspace>, StoreError> {
        let mut state = self.inner.lock();
        state.calls.push(StoreCall::List { namespace: namespace.to_string() });
        state.check(StoreOp::List)?;
        state
            .workspaces
            .iter()
            .filter(|((ns, _), _)| ns == namespace)
            .map(|(_, v)| DevWorkspace::from_value(v.clone()).map_err(StoreError::from))
            .collect()
    }

    async fn get(&self, namespace: &str, name: &str) -> Result<DevWorkspace, StoreError> {
        let mut state = self.inner.lock();
        state.calls.push(StoreCall::Get { namespace: namespace.to_string(), name: name.to_string() });
        state.check(StoreOp::Get)?;
        if let Some(scripted) = state.scripted_gets.pop_front() {
            return Ok(DevWorkspace::from_value(scripted)?);
        }
        let value = state
            .workspaces
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| not_found(DEVWORKSPACE_KIND, namespace, name))?;
        Ok(DevWorkspace::from_value(value)?)
    }

    async fn create(&self, workspace: &DevWorkspace) -> Result<DevWorkspace, StoreError> {
        let mut state = self.inner.lock();
        let key = (workspace.namespace().to_string(), workspace.name().to_string());
        state.calls.push(StoreCall::Create { namespace: key.0.clone(), name: key.1.clone() });
        state.check(StoreOp::Create)?;
        if state.workspaces.contains_key(&key) {
            return Err(StoreError::Conflict(format!("{}/{} already exists", key.0, key.1)));
        }
        state.next_id += 1;
        let n = state.next_id;
        let mut value = workspace.to_value()?;
        value["metadata"]["uid"] = json!(format!("uid-{n}"));
        value["status"] = json!({"devworkspaceId": format!("workspace{n}")});
        state.workspaces.insert(key, value.clone());
        Ok(DevWorkspace::from_value(value)?)
    }

    async fn patch(
        &self,
        namespace: &str,
        name: &str,
        ops: &[PatchOp],
    ) -> Result<DevWorkspace, StoreError> {
        let mut state = self.inner.lock();
        state.calls.push(StoreCall::Patch {
            namespace: namespace.to_string(),
            name: name.to_string(),
            ops: ops.to_vec(),
        });
        state.check(StoreOp::Patch)?;
        let key = (namespace.to_string(), name.to_string());
        let current = state
            .workspaces
            .get(&key)
            .cloned()
            .ok_or_else(|| not_found(DEVWORKSPACE_KIND, namespace, name))?;
        let mut doc = current;
        json_patch::patch(&mut doc, &PatchOp::to_json_patch(ops)?)
            .map_err(|e| StoreError::Api(format!("patch rejected: {}", e)))?;
        let patched = DevWorkspace::from_value(doc.clone())?;
        state.workspaces.insert(key, doc);
        Ok(patched)
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), StoreError> {
        let mut state = self.inner.lock();
        state
            .calls
            .push(StoreCall::Delete { namespace: namespace.to_string(), name: name.to_string() });
        state.check(StoreOp::Delete)?;
        let removed = state.workspaces.remove(&(namespace.to_string(), name.to_string()));
        let Some(removed) = removed else {
            return Err(not_found(DEVWORKSPACE_KIND, namespace, name));
        };
        // Cascade to owned templates, as the garbage collector would
        let uid = removed["metadata"]["uid"].as_str().unwrap_or_default().to_string();
        state.templates.retain(|t| {
            !t.metadata.owner_references.iter().flatten().any(|r| !uid.is_empty() && r.uid == uid)
        });
        Ok(())
    }

    async fn create_template(
        &self,
        template: &DevWorkspaceTemplate,
    ) -> Result<DevWorkspaceTemplate, StoreError> {
        let mut state = self.inner.lock();
        state.calls.push(StoreCall::CreateTemplate {
            namespace: template.namespace().to_string(),
            name: template.name().to_string(),
        });
        state.check(StoreOp::CreateTemplate)?;
        if template.kind != DEVWORKSPACE_TEMPLATE_KIND {
            return Err(StoreError::Api(format!("unexpected kind {}", template.kind)));
        }
        state.templates.push(template.clone());
        Ok(template.clone())
    }

    async fn initialize_namespace(&self, namespace: &str) -> Result<(), StoreError> {
        let mut state = self.inner.lock();
        state.calls.push(StoreCall::InitializeNamespace { namespace: namespace.to_string() });
        state.check(StoreOp::InitializeNamespace)
    }
}
