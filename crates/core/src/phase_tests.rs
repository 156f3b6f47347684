// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    devworkspace_running = { "Running", Phase::Running },
    legacy_running       = { "RUNNING", Phase::Running },
    starting             = { "Starting", Phase::Starting },
    stopping             = { "STOPPING", Phase::Stopping },
    stopped              = { "Stopped", Phase::Stopped },
    failed               = { "Failed", Phase::Failed },
    legacy_error         = { "ERROR", Phase::Error },
)]
fn parses_both_spellings(raw: &str, expected: Phase) {
    assert_eq!(Phase::parse(raw), expected);
}

#[test]
fn unknown_phase_is_kept_verbatim() {
    let phase = Phase::parse("Terminating");
    assert_eq!(phase, Phase::Other("Terminating".to_string()));
    assert_eq!(phase.to_string(), "Terminating");
}

#[test]
fn failed_and_error_share_the_terminal_class() {
    assert!(Phase::Failed.is_terminal_failure());
    assert!(Phase::Error.is_terminal_failure());
    assert!(!Phase::Running.is_terminal_failure());
    assert!(!Phase::Stopped.is_terminal_failure());
}

#[test]
fn serde_uses_display_spelling() {
    let json = serde_json::to_string(&Phase::Running).unwrap();
    assert_eq!(json, "\"Running\"");

    let parsed: Phase = serde_json::from_str("\"STOPPED\"").unwrap();
    assert_eq!(parsed, Phase::Stopped);
}
