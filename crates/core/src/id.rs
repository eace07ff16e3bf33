// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier helpers

/// Returns a string slice truncated to at most `n` characters.
///
/// Cuts on a character boundary, so multi-byte file names never split.
pub fn short(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
