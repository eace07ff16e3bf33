// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job lifecycle state machine.
//!
//! ```text
//! Pending ──► Working ──► Done
//!    │                └──► Error
//!    └──► Skipped
//! ```
//!
//! `Done`, `Error` and `Skipped` are terminal.

use serde::Serialize;
use thiserror::Error;

use crate::job::JobId;

/// Lifecycle state of a single job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// Seeded, waiting in the queue
    Pending,
    /// Picked up by a worker, transform running
    Working,
    /// Transform succeeded
    Done,
    /// Transform failed
    Error,
    /// Never run (destination already present)
    Skipped,
}

impl JobState {
    /// All states, in display order.
    pub const ALL: [JobState; 5] =
        [JobState::Pending, JobState::Working, JobState::Done, JobState::Error, JobState::Skipped];

    /// True for states no job ever leaves.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Done | JobState::Error | JobState::Skipped)
    }

    /// Whether moving from `self` to `next` is a forward transition.
    pub fn can_transition_to(self, next: JobState) -> bool {
        matches!(
            (self, next),
            (JobState::Pending, JobState::Working)
                | (JobState::Pending, JobState::Skipped)
                | (JobState::Working, JobState::Done)
                | (JobState::Working, JobState::Error)
        )
    }
}

crate::simple_display! {
    JobState {
        Pending => "pending",
        Working => "working",
        Done => "done",
        Error => "error",
        Skipped => "skipped",
    }
}

/// Rejected state change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("job {id}: illegal transition {from} -> {to}")]
pub struct TransitionError {
    pub id: JobId,
    pub from: JobState,
    pub to: JobState,
}

/// Per-state job totals for one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StateCounts {
    pub pending: usize,
    pub working: usize,
    pub done: usize,
    pub error: usize,
    pub skipped: usize,
}

impl StateCounts {
    /// Tally an iterator of states.
    pub fn tally<I>(states: I) -> Self
    where
        I: IntoIterator<Item = JobState>,
    {
        let mut counts = Self::default();
        for state in states {
            counts.add(state);
        }
        counts
    }

    pub fn add(&mut self, state: JobState) {
        match state {
            JobState::Pending => self.pending += 1,
            JobState::Working => self.working += 1,
            JobState::Done => self.done += 1,
            JobState::Error => self.error += 1,
            JobState::Skipped => self.skipped += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.working + self.done + self.error + self.skipped
    }

    /// No job is waiting or running: every job reached a terminal state.
    pub fn is_settled(&self) -> bool {
        self.pending == 0 && self.working == 0
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
