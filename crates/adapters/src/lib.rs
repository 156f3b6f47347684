// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for external I/O: the cluster resource store and plugin resolution

pub mod resolver;
pub mod store;

pub use resolver::{PassthroughResolver, PluginResolver, ResolveError, ResolveRequest, Resolution};
pub use store::{annotation_path, escape_pointer, DevWorkspaceStore, KubeStore, PatchOp, StoreError};

// Test support exports
#[cfg(any(test, feature = "test-support"))]
pub use resolver::{FakeResolver, ResolveCall};
#[cfg(any(test, feature = "test-support"))]
pub use store::{FakeStore, StoreCall, StoreOp};
