// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared job status table.
//!
//! Workers write through [`StatusTable::set`]; the dashboard reads through
//! [`StatusTable::snapshot`]. One lock guards the whole map and is never
//! held across I/O.

use std::collections::BTreeMap;

use lq_core::{JobId, JobState, StateCounts, TransitionError};
use parking_lot::Mutex;
use thiserror::Error;

/// Errors from status table operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    #[error("unknown job: {0}")]
    UnknownJob(JobId),
    #[error("job {0} is already seeded")]
    AlreadySeeded(JobId),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// One accepted state change, as recorded by [`StatusTable::recording`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub id: JobId,
    /// `None` when the job was seeded
    pub from: Option<JobState>,
    pub to: JobState,
}

#[derive(Default)]
struct StatusInner {
    states: BTreeMap<JobId, JobState>,
    history: Option<Vec<Transition>>,
}

impl StatusInner {
    fn record(&mut self, id: &JobId, from: Option<JobState>, to: JobState) {
        if let Some(history) = self.history.as_mut() {
            history.push(Transition { id: id.clone(), from, to });
        }
    }
}

/// Thread-safe map from job ID to lifecycle state.
///
/// Keys are only added by seeding and never removed. Every accepted
/// [`set`](Self::set) is a forward transition of [`JobState`].
#[derive(Default)]
pub struct StatusTable {
    inner: Mutex<StatusInner>,
}

impl StatusTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table that also keeps a log of every accepted transition.
    pub fn recording() -> Self {
        Self { inner: Mutex::new(StatusInner { states: BTreeMap::new(), history: Some(Vec::new()) }) }
    }

    /// Register a job as `Pending`.
    pub fn seed(&self, id: JobId) -> Result<(), StatusError> {
        let mut inner = self.inner.lock();
        if inner.states.contains_key(&id) {
            return Err(StatusError::AlreadySeeded(id));
        }
        inner.record(&id, None, JobState::Pending);
        inner.states.insert(id, JobState::Pending);
        Ok(())
    }

    /// Register a job the run decided not to execute.
    ///
    /// Recorded as `Pending` followed by `Skipped` so the transition log
    /// stays a valid path through the state machine.
    pub fn seed_skipped(&self, id: JobId) -> Result<(), StatusError> {
        let mut inner = self.inner.lock();
        if inner.states.contains_key(&id) {
            return Err(StatusError::AlreadySeeded(id));
        }
        inner.record(&id, None, JobState::Pending);
        inner.record(&id, Some(JobState::Pending), JobState::Skipped);
        inner.states.insert(id, JobState::Skipped);
        Ok(())
    }

    /// Move a job to `state`, returning the state it left.
    pub fn set(&self, id: &JobId, state: JobState) -> Result<JobState, StatusError> {
        let mut inner = self.inner.lock();
        let current = match inner.states.get_mut(id) {
            Some(current) => current,
            None => return Err(StatusError::UnknownJob(id.clone())),
        };
        let from = *current;
        if !from.can_transition_to(state) {
            return Err(TransitionError { id: id.clone(), from, to: state }.into());
        }
        *current = state;
        inner.record(id, Some(from), state);
        Ok(from)
    }

    pub fn get(&self, id: &str) -> Option<JobState> {
        self.inner.lock().states.get(id).copied()
    }

    /// Point-in-time copy of every entry, ordered by job ID.
    pub fn snapshot(&self) -> StatusSnapshot {
        let entries = {
            let inner = self.inner.lock();
            inner.states.iter().map(|(id, state)| (id.clone(), *state)).collect()
        };
        StatusSnapshot { entries }
    }

    pub fn counts(&self) -> StateCounts {
        StateCounts::tally(self.inner.lock().states.values().copied())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Accepted transitions in order. Empty unless built with [`recording`](Self::recording).
    pub fn transitions(&self) -> Vec<Transition> {
        self.inner.lock().history.clone().unwrap_or_default()
    }
}

/// Immutable copy of the status table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    entries: Vec<(JobId, JobState)>,
}

impl StatusSnapshot {
    pub fn entries(&self) -> &[(JobId, JobState)] {
        &self.entries
    }

    pub fn counts(&self) -> StateCounts {
        StateCounts::tally(self.entries.iter().map(|(_, state)| *state))
    }

    /// IDs of jobs currently `Working`, in ID order.
    pub fn working(&self) -> impl Iterator<Item = &JobId> {
        self.entries.iter().filter(|(_, state)| *state == JobState::Working).map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_map(self) -> BTreeMap<JobId, JobState> {
        self.entries.into_iter().collect()
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
