// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing subscriber setup.
//!
//! Stdout belongs to the dashboard. With `LOUDQ_LOG` set, events matching
//! that filter are appended to a log file; otherwise only errors reach
//! stderr.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::env;

/// Install the global subscriber. Keep the guard alive until exit so the
/// file writer flushes.
pub fn init() -> Option<WorkerGuard> {
    match env::log_filter() {
        Some(filter) => init_file(&filter, &env::log_file()),
        None => {
            init_stderr();
            None
        }
    }
}

fn init_file(filter: &str, path: &Path) -> Option<WorkerGuard> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let Some(file_name) = path.file_name() else {
        init_stderr();
        return None;
    };
    if std::fs::create_dir_all(dir).is_err() {
        init_stderr();
        return None;
    }

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .is_ok();
    installed.then_some(guard)
}

fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("error"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
