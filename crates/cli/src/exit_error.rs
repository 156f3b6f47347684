// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors that end the process with a specific exit code.
//!
//! `main()` downcasts to `ExitError` and exits with its code; anything else
//! exits with 1.

use std::fmt;

use dw_engine::ClientError;

/// Polling gave up before the workspace reported a usable status
pub const EXIT_STATUS_UNAVAILABLE: i32 = 2;
/// The workspace is in a failure phase
pub const EXIT_TERMINAL_FAILURE: i32 = 3;
/// The workspace changed on the cluster since it was loaded
pub const EXIT_CONCURRENT_MODIFICATION: i32 = 4;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Exit code for lifecycle errors that callers script against; other
    /// errors exit with 1.
    pub fn from_client(error: &ClientError) -> Option<Self> {
        let code = match error {
            ClientError::StatusUnavailable { .. } => EXIT_STATUS_UNAVAILABLE,
            ClientError::TerminalFailure(_) => EXIT_TERMINAL_FAILURE,
            ClientError::ConcurrentModification { .. } => EXIT_CONCURRENT_MODIFICATION,
            _ => return None,
        };
        Some(Self::new(code, error.to_string()))
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

/// Wrap a client error, keeping its exit code when it has one.
pub fn client_error(error: ClientError) -> anyhow::Error {
    match ExitError::from_client(&error) {
        Some(exit) => exit.into(),
        None => error.into(),
    }
}
