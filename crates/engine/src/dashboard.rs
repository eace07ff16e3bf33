// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live progress view.
//!
//! A single polling loop: snapshot the status table, build a frame, draw it,
//! sleep. The loop stops after drawing a frame in which nothing is pending
//! or working. Terminal errors switch the renderer into a silent mode for
//! the rest of the run; they never reach the workers.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use lq_adapters::terminal::FALLBACK_WIDTH;
use lq_adapters::TerminalAdapter;
use lq_core::{short, JobId, StateCounts};
use tracing::debug;

use crate::status::{StatusSnapshot, StatusTable};

/// Delay between two redraws.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Outcome of a renderer run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Poll cycles performed (one snapshot and one frame each)
    pub cycles: usize,
    /// Whether drawing was abandoned after a terminal error
    pub degraded: bool,
}

/// Redraws the progress region until every job is terminal.
pub struct DashboardRenderer<T: TerminalAdapter> {
    terminal: T,
    slots: usize,
    input_dir: PathBuf,
    interval: Duration,
    degraded: bool,
}

impl<T: TerminalAdapter> DashboardRenderer<T> {
    /// `slots` detail rows are drawn, one per worker.
    pub fn new(terminal: T, slots: usize, input_dir: impl Into<PathBuf>) -> Self {
        Self { terminal, slots, input_dir: input_dir.into(), interval: POLL_INTERVAL, degraded: false }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Poll `status` until settled.
    pub fn run(mut self, status: &StatusTable) -> RenderReport {
        let width = match self.terminal.size() {
            Ok((cols, _)) => cols,
            Err(e) => {
                self.degrade(&e);
                FALLBACK_WIDTH
            }
        };
        self.attempt(|t| t.begin());

        let mut cycles = 0;
        let height = loop {
            let snapshot = status.snapshot();
            let counts = snapshot.counts();
            let input_dir = self.input_dir.as_path();
            let frame = render_frame(&snapshot, self.slots, width, |id| file_size(input_dir, id));
            self.draw(&frame);
            cycles += 1;

            if counts.is_settled() {
                break frame.len();
            }
            thread::sleep(self.interval);
        };

        let rows = u16::try_from(height).unwrap_or(u16::MAX);
        self.attempt(|t| t.finish(rows));
        RenderReport { cycles, degraded: self.degraded }
    }

    fn draw(&mut self, frame: &[String]) {
        for (row, line) in frame.iter().enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            self.attempt(|t| t.write_row(row, line));
        }
        self.attempt(|t| t.flush());
    }

    fn attempt(&mut self, op: impl FnOnce(&mut T) -> std::io::Result<()>) {
        if self.degraded {
            return;
        }
        if let Err(e) = op(&mut self.terminal) {
            self.degrade(&e);
        }
    }

    fn degrade(&mut self, error: &std::io::Error) {
        debug!(error = %error, "terminal unavailable, dashboard disabled");
        self.degraded = true;
    }
}

/// Build the dashboard rows for one snapshot.
///
/// Layout: separator, summary, separator, then one row per worker slot
/// showing a working job (blank when the slot is idle). Slot rows are
/// omitted entirely when the run has no jobs. Every row is cut to
/// `width - 1` columns; a glyph in the last column is wiped by the
/// clear-to-end-of-line that follows it on xterm-style terminals.
pub fn render_frame(
    snapshot: &StatusSnapshot,
    slots: usize,
    width: u16,
    size_of: impl Fn(&JobId) -> Option<u64>,
) -> Vec<String> {
    let width = usize::from(width).saturating_sub(1);
    let separator = format!(" {} ", "=".repeat(width.saturating_sub(2)));
    let mut frame = vec![
        separator.clone(),
        format!(" {}", summary_line(&snapshot.counts())),
        separator,
    ];

    if !snapshot.is_empty() {
        let mut working = snapshot.working();
        for slot in 1..=slots {
            let row = match working.next() {
                Some(id) => {
                    let size = size_of(id).map(|bytes| format!(" ({})", format_size(bytes)));
                    format!("[Thread {slot}] {id}{}", size.unwrap_or_default())
                }
                None => String::new(),
            };
            frame.push(row);
        }
    }

    frame.into_iter().map(|row| short(&row, width).to_string()).collect()
}

/// `Pending: n - Working: n - Done: n - Error: n - Skipped: n`
pub fn summary_line(counts: &StateCounts) -> String {
    format!(
        "Pending: {} - Working: {} - Done: {} - Error: {} - Skipped: {}",
        counts.pending, counts.working, counts.done, counts.error, counts.skipped
    )
}

/// Human-readable size in mebibytes with two decimals.
pub fn format_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

fn file_size(input_dir: &Path, id: &JobId) -> Option<u64> {
    fs::metadata(input_dir.join(id.as_str())).ok().map(|m| m.len())
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
