// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn force_color(on: bool) {
    if on {
        std::env::set_var("COLOR", "1");
        std::env::remove_var("NO_COLOR");
    } else {
        std::env::set_var("NO_COLOR", "1");
        std::env::remove_var("COLOR");
    }
}

#[test]
#[serial]
fn styles_are_plain_when_no_color() {
    force_color(false);
    assert_eq!(format!("{:?}", styles()), format!("{:?}", Styles::plain()));
}

#[test]
#[serial]
fn styles_are_styled_when_color_forced() {
    force_color(true);
    assert_ne!(format!("{:?}", styles()), format!("{:?}", Styles::plain()));
}

#[test]
#[serial]
fn phases_are_plain_text_without_color() {
    force_color(false);
    assert_eq!(phase(Some(&Phase::Running)), "Running");
    assert_eq!(phase(Some(&Phase::Error)), "Error");
    assert_eq!(phase(None), "-");
    assert_eq!(header("wksp"), "wksp");
}

#[test]
#[serial]
fn phases_use_lifecycle_colors() {
    force_color(true);
    assert!(phase(Some(&Phase::Running)).contains("38;5;108"));
    assert!(phase(Some(&Phase::Failed)).contains("38;5;174"));
    assert!(phase(Some(&Phase::Error)).contains("38;5;174"));
    assert!(phase(Some(&Phase::Stopped)).contains("38;5;245"));
    assert!(muted("ws1").ends_with("\x1b[0m"));
    std::env::remove_var("COLOR");
}
