// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI failure specs

use crate::prelude::*;

#[test]
fn unknown_subcommand_is_a_usage_error() {
    cli().args(&["bogus"]).fails().code(2).stderr_has("unrecognized subcommand");
}

#[test]
fn get_requires_a_name() {
    cli().args(&["get"]).fails().code(2).stderr_has("<NAME>");
}

#[test]
fn unreachable_cluster_exits_one() {
    cli()
        .args(&["list"])
        .fails()
        .code(1)
        .stderr_has("Error:")
        .stderr_has("failed to connect to the cluster");
}
