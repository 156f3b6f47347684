// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine error types

use dw_adapters::{ResolveError, StoreError};
use dw_core::{DevfileDocument, WorkspaceError};
use thiserror::Error;

/// Generic message for a failed workspace that reports no message
pub const UNKNOWN_FAILURE: &str = "Unknown error occurred when trying to process the devworkspace";

/// Errors from lifecycle operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// Polling ran out of attempts before the workspace reported a usable status
    #[error("could not retrieve {missing} of {namespace}/{name} after {attempts} attempts")]
    StatusUnavailable { namespace: String, name: String, attempts: u32, missing: &'static str },

    /// The workspace reports a failure phase; carries its status message
    #[error("{0}")]
    TerminalFailure(String),

    #[error(
        "{namespace}/{name} was modified on the cluster since it was loaded; reload it and retry"
    )]
    ConcurrentModification { namespace: String, name: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// A save that did not go through. The edited document is handed back so it
/// is not lost.
#[derive(Debug, Error)]
#[error("failed to save devfile: {source}")]
pub struct SaveError {
    pub devfile: DevfileDocument,
    #[source]
    pub source: ClientError,
}

impl SaveError {
    pub fn new(devfile: DevfileDocument, source: impl Into<ClientError>) -> Self {
        Self { devfile, source: source.into() }
    }
}
