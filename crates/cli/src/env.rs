// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the loudq binary.

use std::path::PathBuf;

/// Default log file when `LOUDQ_LOG` is set without `LOUDQ_LOG_FILE`.
pub const DEFAULT_LOG_FILE: &str = "loudq.log";

/// Tracing filter directive. When set, logs go to a file instead of stderr.
pub fn log_filter() -> Option<String> {
    std::env::var("LOUDQ_LOG").ok().filter(|s| !s.is_empty())
}

/// Log file path: LOUDQ_LOG_FILE > loudq.log
pub fn log_file() -> PathBuf {
    std::env::var("LOUDQ_LOG_FILE")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
}
