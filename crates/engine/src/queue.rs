// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blocking FIFO hand-off between the producer and the worker pool.

use std::collections::VecDeque;

use lq_core::JobDescriptor;
use parking_lot::{Condvar, Mutex};
use thiserror::Error;

/// Errors from queue operations
#[derive(Debug, Error)]
pub enum QueueError {
    /// The queue was already marked drained; the rejected job is returned.
    #[error("queue is drained, rejected job {}", .0.id())]
    Drained(Box<JobDescriptor>),
}

#[derive(Default)]
struct QueueInner {
    jobs: VecDeque<JobDescriptor>,
    drained: bool,
}

/// Thread-safe FIFO of jobs with a one-way "no more work" flag.
///
/// Consumers block in [`JobQueue::pop`] until a job arrives or the queue is
/// drained and empty. Jobs pushed before draining are still handed out
/// after it.
#[derive(Default)]
pub struct JobQueue {
    inner: Mutex<QueueInner>,
    available: Condvar,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a job to the tail. Never blocks on consumers.
    pub fn push(&self, job: JobDescriptor) -> Result<(), QueueError> {
        {
            let mut inner = self.inner.lock();
            if inner.drained {
                return Err(QueueError::Drained(Box::new(job)));
            }
            inner.jobs.push_back(job);
        }
        self.available.notify_one();
        Ok(())
    }

    /// Take the next job, blocking while the queue is empty but not drained.
    ///
    /// Returns `None` once the queue is drained and empty; every later call
    /// returns `None` immediately.
    pub fn pop(&self) -> Option<JobDescriptor> {
        let mut inner = self.inner.lock();
        // Re-check after every wake: wakes may be spurious or lost to another consumer.
        while inner.jobs.is_empty() && !inner.drained {
            self.available.wait(&mut inner);
        }
        inner.jobs.pop_front()
    }

    /// Signal that no more jobs will be pushed and wake every blocked consumer.
    ///
    /// Idempotent.
    pub fn mark_drained(&self) {
        self.inner.lock().drained = true;
        self.available.notify_all();
    }

    pub fn is_drained(&self) -> bool {
        self.inner.lock().drained
    }

    /// Jobs waiting to be popped.
    pub fn len(&self) -> usize {
        self.inner.lock().jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
