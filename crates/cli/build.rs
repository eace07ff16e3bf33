// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stamps `LOUDQ_BUILD_HASH` into the binary for `loudq --version`.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=LOUDQ_BUILD_HASH");
    println!("cargo:rerun-if-changed=../../.git/HEAD");

    let hash = std::env::var("LOUDQ_BUILD_HASH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(git_short_hash)
        .unwrap_or_else(|| "dev".to_string());

    println!("cargo:rustc-env=LOUDQ_BUILD_HASH={}", hash.trim());
}

fn git_short_hash() -> Option<String> {
    let out = Command::new("git").args(["rev-parse", "--short", "HEAD"]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    String::from_utf8(out.stdout).ok()
}
