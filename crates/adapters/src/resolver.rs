// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Devfile plugin resolution boundary.
//!
//! A resolver receives the primary devfile, the workspace it was created
//! as, the plugin templates synthesized so far and the optional project
//! files, and may rewrite any of them (merge sidecars into the dev
//! container, add templates for recommended extensions, ...).

use async_trait::async_trait;
use dw_core::{DevWorkspace, DevWorkspaceTemplate, Devfile, ExtraFiles, SidecarPolicy};
use thiserror::Error;

/// Errors from plugin resolution
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid {file}: {message}")]
    InvalidFile { file: &'static str, message: String },
    #[error("plugin resolution failed: {0}")]
    Failed(String),
}

/// Everything a resolver may inspect or rewrite
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub devfile: Devfile,
    pub workspace: DevWorkspace,
    pub templates: Vec<DevWorkspaceTemplate>,
    pub extra_files: ExtraFiles,
    pub sidecar_policy: SidecarPolicy,
    /// Appended to generated names; the workspace id
    pub suffix: String,
}

/// Resolver output: the rewritten primary devfile and workspace, and the
/// final set of templates to create.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub devfile: Devfile,
    pub workspace: DevWorkspace,
    pub templates: Vec<DevWorkspaceTemplate>,
}

#[async_trait]
pub trait PluginResolver: Send + Sync + 'static {
    async fn resolve(&self, request: ResolveRequest) -> Result<Resolution, ResolveError>;
}

/// Resolver that keeps the synthesized templates as they are.
///
/// It still validates `.vscode/extensions.json` so a malformed project file
/// fails creation instead of being silently ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughResolver;

#[async_trait]
impl PluginResolver for PassthroughResolver {
    async fn resolve(&self, request: ResolveRequest) -> Result<Resolution, ResolveError> {
        if let Some(content) = request.extra_files.vscode_extensions() {
            serde_json::from_str::<serde_json::Value>(content).map_err(|e| {
                ResolveError::InvalidFile {
                    file: dw_core::plugin::VSCODE_EXTENSIONS_FILE,
                    message: e.to_string(),
                }
            })?;
        }
        tracing::debug!(
            sidecar_policy = %request.sidecar_policy,
            suffix = %request.suffix,
            templates = request.templates.len(),
            "passing plugin templates through unchanged"
        );
        Ok(Resolution {
            devfile: request.devfile,
            workspace: request.workspace,
            templates: request.templates,
        })
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{PluginResolver, ResolveError, ResolveRequest, Resolution};
    use async_trait::async_trait;
    use dw_core::{DevWorkspaceTemplate, SidecarPolicy};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded resolve request
    #[derive(Debug, Clone)]
    pub struct ResolveCall {
        pub sidecar_policy: SidecarPolicy,
        pub suffix: String,
        pub template_names: Vec<String>,
        pub che_theia_plugins: Option<String>,
        pub vscode_extensions: Option<String>,
    }

    #[derive(Default)]
    struct FakeResolverState {
        calls: Vec<ResolveCall>,
        fail: Option<String>,
        extra_templates: Vec<DevWorkspaceTemplate>,
    }

    /// Fake resolver for testing
    #[derive(Clone, Default)]
    pub struct FakeResolver {
        inner: Arc<Mutex<FakeResolverState>>,
    }

    impl FakeResolver {
        pub fn new() -> Self {
            Self::default()
        }

        /// Get all recorded requests
        pub fn calls(&self) -> Vec<ResolveCall> {
            self.inner.lock().calls.clone()
        }

        /// Fail every subsequent request with `message`.
        pub fn fail_with(&self, message: impl Into<String>) {
            self.inner.lock().fail = Some(message.into());
        }

        /// Emit `template` in addition to the requested ones.
        pub fn emit(&self, template: DevWorkspaceTemplate) {
            self.inner.lock().extra_templates.push(template);
        }
    }

    #[async_trait]
    impl PluginResolver for FakeResolver {
        async fn resolve(&self, request: ResolveRequest) -> Result<Resolution, ResolveError> {
            let mut state = self.inner.lock();
            state.calls.push(ResolveCall {
                sidecar_policy: request.sidecar_policy,
                suffix: request.suffix.clone(),
                template_names: request.templates.iter().map(|t| t.name().to_string()).collect(),
                che_theia_plugins: request.extra_files.che_theia_plugins().map(str::to_string),
                vscode_extensions: request.extra_files.vscode_extensions().map(str::to_string),
            });
            if let Some(message) = &state.fail {
                return Err(ResolveError::Failed(message.clone()));
            }
            let mut templates = request.templates;
            templates.extend(state.extra_templates.iter().cloned());
            Ok(Resolution { devfile: request.devfile, workspace: request.workspace, templates })
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeResolver, ResolveCall};

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
