// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use dw_core::Phase;
use std::io::IsTerminal;

pub mod codes {
    /// Section headers and workspace names: steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Descriptions and context: medium grey
    pub const CONTEXT: u8 = 245;
    /// Secondary text such as ids: darker grey
    pub const MUTED: u8 = 240;
    /// Running workspaces: soft green
    pub const RUNNING: u8 = 108;
    /// Failed workspaces: soft red
    pub const FAILED: u8 = 174;
}

/// `NO_COLOR=1` wins over `COLOR=1`; otherwise color follows stdout being a TTY.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn fg(code: u8) -> Style {
    Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))))
}

/// Help output styles; plain when color is off.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(fg(codes::HEADER))
        .usage(fg(codes::HEADER))
        .literal(fg(codes::LITERAL))
        .placeholder(fg(codes::CONTEXT))
}

fn paint(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("\x1b[38;5;{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

pub fn muted(text: &str) -> String {
    paint(codes::MUTED, text)
}

/// Phase name colored by lifecycle class; `-` when no phase is reported.
pub fn phase(phase: Option<&Phase>) -> String {
    match phase {
        None => paint(codes::MUTED, "-"),
        Some(Phase::Running) => paint(codes::RUNNING, "Running"),
        Some(p) if p.is_terminal_failure() => paint(codes::FAILED, &p.to_string()),
        Some(p) => paint(codes::CONTEXT, &p.to_string()),
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
