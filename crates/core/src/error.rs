// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised while reading or rewriting workspace resources

use thiserror::Error;

use crate::view::Shape;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The object is neither a legacy workspace nor a DevWorkspace
    #[error("unexpected workspace object shape")]
    UnrecognizedShape,

    #[error("invalid {kind}: {source}")]
    InvalidResource {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid pending start configuration: {0}")]
    InvalidPendingState(#[source] serde_json::Error),

    #[error("invalid devfile: {0}")]
    InvalidDevfile(String),

    #[error("{operation} is not implemented for {shape} workspaces")]
    Unsupported { operation: &'static str, shape: Shape },
}

impl WorkspaceError {
    pub(crate) fn invalid(kind: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| WorkspaceError::InvalidResource { kind, source }
    }
}
