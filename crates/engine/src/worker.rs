// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-size pool of worker threads draining the job queue.

use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use lq_adapters::{TransformAdapter, TransformRequest};
use lq_core::{JobDescriptor, JobState};
use tracing::{debug, info, warn};

use crate::context::RunContext;

/// Pool size used when none is given and detection is unavailable.
pub const DEFAULT_POOL_SIZE: usize = 4;

/// Resolve the requested pool size.
///
/// `None` means "not given" and yields [`DEFAULT_POOL_SIZE`]. A value that
/// is not a positive integer falls back to `detected`, and to the default
/// when detection yields nothing.
pub fn resolve_pool_size(requested: Option<&str>, detected: Option<usize>) -> usize {
    let Some(raw) = requested else {
        return DEFAULT_POOL_SIZE;
    };
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => usize::try_from(n).unwrap_or(DEFAULT_POOL_SIZE),
        _ => detected.filter(|&n| n > 0).unwrap_or(DEFAULT_POOL_SIZE),
    }
}

/// Hardware concurrency as reported by the OS.
pub fn detected_concurrency() -> Option<usize> {
    thread::available_parallelism().ok().map(NonZeroUsize::get)
}

/// Jobs handled by one worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub done: usize,
    pub failed: usize,
}

/// Handles of the running workers.
pub struct WorkerPool {
    workers: Vec<(usize, JoinHandle<WorkerStats>)>,
}

impl WorkerPool {
    /// Start `size` workers on `ctx`.
    ///
    /// Workers that fail to start are logged and skipped; an error is
    /// returned only when none could start.
    pub fn spawn<T: TransformAdapter>(
        size: usize,
        ctx: Arc<RunContext>,
        transform: Arc<T>,
    ) -> std::io::Result<Self> {
        let mut workers = Vec::with_capacity(size);
        let mut last_err = None;
        for worker in 1..=size.max(1) {
            let ctx = Arc::clone(&ctx);
            let transform = Arc::clone(&transform);
            let spawned = thread::Builder::new()
                .name(format!("loudq-worker-{worker}"))
                .spawn(move || run_worker(worker, &ctx, transform.as_ref()));
            match spawned {
                Ok(handle) => workers.push((worker, handle)),
                Err(e) => {
                    warn!(worker, error = %e, "failed to start worker");
                    last_err = Some(e);
                }
            }
        }
        match last_err {
            Some(e) if workers.is_empty() => Err(e),
            _ => Ok(Self { workers }),
        }
    }

    /// Number of workers actually running.
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Wait for every worker to exit.
    pub fn join(self) -> WorkerStats {
        let mut total = WorkerStats::default();
        for (worker, handle) in self.workers {
            match handle.join() {
                Ok(stats) => {
                    total.done += stats.done;
                    total.failed += stats.failed;
                }
                Err(_) => warn!(worker, "worker thread panicked"),
            }
        }
        total
    }
}

/// Worker loop: pop until the queue is drained and empty.
pub fn run_worker(worker: usize, ctx: &RunContext, transform: &dyn TransformAdapter) -> WorkerStats {
    debug!(worker, "worker started");
    let mut stats = WorkerStats::default();
    while let Some(job) = ctx.queue().pop() {
        match process_job(worker, ctx, transform, &job) {
            JobState::Done => stats.done += 1,
            _ => stats.failed += 1,
        }
    }
    debug!(worker, done = stats.done, failed = stats.failed, "worker finished");
    stats
}

/// Run one job to a terminal state and return that state.
///
/// Never retries. Transform errors and panics become `Error` plus an error
/// log entry.
pub fn process_job(
    worker: usize,
    ctx: &RunContext,
    transform: &dyn TransformAdapter,
    job: &JobDescriptor,
) -> JobState {
    let id = job.id();
    if let Err(e) = ctx.status().set(id, JobState::Working) {
        warn!(worker, job = %id, error = %e, "status update rejected");
    }

    let request = TransformRequest {
        source: job.source(),
        destination: job.destination(),
        target_lufs: ctx.target_lufs(),
    };
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| transform.normalize(&request)));
    let state = match outcome {
        Ok(Ok(())) => {
            debug!(worker, job = %id, "job done");
            JobState::Done
        }
        Ok(Err(e)) => {
            info!(worker, job = %id, error = %e, "job failed");
            JobState::Error
        }
        Err(_) => {
            warn!(worker, job = %id, "transform panicked");
            JobState::Error
        }
    };

    if let Err(e) = ctx.status().set(id, state) {
        warn!(worker, job = %id, error = %e, "status update rejected");
    }
    if state == JobState::Error {
        ctx.error_log().append(job.source());
    }
    state
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
