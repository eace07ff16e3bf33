// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help, version and usage errors.

use crate::prelude::*;

#[test]
fn help_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:").stdout_has("--force");
}

#[test]
fn slash_question_mark_shows_usage() {
    cli().args(&["/?"]).passes().stdout_has("Usage:");
}

#[test]
fn slash_help_wins_over_positionals() {
    cli().args(&["missing-in", "missing-out", "/?"]).passes().stdout_has("Usage:");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("loudq 0.2.0+");
}

#[test]
fn no_args_is_usage_error() {
    cli().fails().stderr_has("Usage:");
}

#[test]
fn missing_output_dir_is_usage_error() {
    cli().args(&["in"]).fails().stderr_has("<OUTPUT_DIR>");
}

#[test]
fn unknown_flag_is_usage_error() {
    cli().args(&["in", "out", "--loud"]).fails().stderr_has("--loud");
}
