// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dw-engine: Lifecycle orchestration for DevWorkspaces
//!
//! - [`TemplateSynthesizer`] turns plugin devfiles into owned templates
//! - [`LifecycleClient`] creates, updates, deletes and starts workspaces
//! - [`Reconciler`] polls a namespace and reports status transitions
//! - [`DevfileEditor`] saves edited devfiles with a concurrency check

mod client;
mod config;
mod editor;
mod error;
mod reconcile;
mod synthesizer;

pub use client::{check_for_terminal_failure, LifecycleClient};
pub use config::{
    ClientConfig, ReconcileConfig, DEFAULT_DASHBOARD_URL, DEFAULT_NAMESPACE, DEFAULT_STATUS_ATTEMPTS,
    DEFAULT_STATUS_DELAY, DEFAULT_WATCH_INTERVAL,
};
pub use editor::{DevfileEditor, SaveMode, SaveOutcome};
pub use error::{ClientError, SaveError, UNKNOWN_FAILURE};
pub use reconcile::{
    ChannelCallbacks, ReconcileCommand, ReconcileCommands, Reconciler, ReconcilerHandle,
    WorkspaceCallbacks, WorkspaceEvent,
};
pub use synthesizer::{Synthesis, TemplateSynthesizer};
