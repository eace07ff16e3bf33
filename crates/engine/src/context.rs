// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared state of one run.

use std::path::PathBuf;

use crate::error_log::ErrorLog;
use crate::queue::JobQueue;
use crate::status::StatusTable;

/// Everything workers and the dashboard share, built once per run and
/// handed out behind an `Arc`.
///
/// Queue and status table carry their own locks; the error log has a
/// third. None is ever taken while another is held.
pub struct RunContext {
    queue: JobQueue,
    status: StatusTable,
    error_log: ErrorLog,
    target_lufs: f64,
}

impl RunContext {
    pub fn new(error_log: impl Into<PathBuf>, target_lufs: f64) -> Self {
        Self::with_status(StatusTable::new(), error_log, target_lufs)
    }

    /// Build a context around an existing status table (e.g. a recording one).
    pub fn with_status(status: StatusTable, error_log: impl Into<PathBuf>, target_lufs: f64) -> Self {
        Self { queue: JobQueue::new(), status, error_log: ErrorLog::new(error_log), target_lufs }
    }

    pub fn queue(&self) -> &JobQueue {
        &self.queue
    }

    pub fn status(&self) -> &StatusTable {
        &self.status
    }

    pub fn error_log(&self) -> &ErrorLog {
        &self.error_log
    }

    /// Integrated loudness target handed to every transform, in LUFS.
    pub fn target_lufs(&self) -> f64 {
        self.target_lufs
    }
}
