// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs
//!
//! Help and version never need a cluster.

use crate::prelude::*;

#[test]
fn dw_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn dw_help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("create")
        .stdout_has("save")
        .stdout_has("start")
        .stdout_has("watch");
}

#[test]
fn dw_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn dw_create_help_shows_plugin_options() {
    cli()
        .args(&["create", "--help"])
        .passes()
        .stdout_has("--plugin")
        .stdout_has("--project-dir");
}

#[test]
fn dw_save_help_shows_defer() {
    cli().args(&["save", "--help"]).passes().stdout_has("--defer");
}

#[test]
fn global_namespace_flag_appears_on_subcommands() {
    cli().args(&["list", "--help"]).passes().stdout_has("--namespace");
}
