// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coarse lifecycle phase of a workspace.
//!
//! Both resource shapes report their phase as a free-form string: the legacy
//! shape uses upper-case names (`RUNNING`, `ERROR`), DevWorkspaces use
//! capitalised names (`Running`, `Failed`). Resources keep the raw string so
//! they round-trip unchanged; [`Phase`] is the parsed, shape-independent view.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle phase shared by legacy workspaces and DevWorkspaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Phase {
    Starting,
    Running,
    Stopping,
    Stopped,
    Failed,
    /// Legacy-only failure phase; same class as [`Phase::Failed`]
    Error,
    /// A phase this client does not know about (e.g. `Terminating`)
    Other(String),
}

impl Phase {
    /// Parse a phase as reported by either resource shape (case-insensitive).
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "STARTING" => Phase::Starting,
            "RUNNING" => Phase::Running,
            "STOPPING" => Phase::Stopping,
            "STOPPED" => Phase::Stopped,
            "FAILED" => Phase::Failed,
            "ERROR" => Phase::Error,
            _ => Phase::Other(raw.to_string()),
        }
    }

    /// True for the phases that mean the workspace has failed for good.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, Phase::Failed | Phase::Error)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Starting => f.write_str("Starting"),
            Phase::Running => f.write_str("Running"),
            Phase::Stopping => f.write_str("Stopping"),
            Phase::Stopped => f.write_str("Stopped"),
            Phase::Failed => f.write_str("Failed"),
            Phase::Error => f.write_str("Error"),
            Phase::Other(raw) => f.write_str(raw),
        }
    }
}

impl FromStr for Phase {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Phase::parse(s))
    }
}

impl From<String> for Phase {
    fn from(s: String) -> Self {
        Phase::parse(&s)
    }
}

impl From<Phase> for String {
    fn from(phase: Phase) -> Self {
        phase.to_string()
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
