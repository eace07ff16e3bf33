// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run orchestration: validate, enumerate, seed, run, summarize.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use lq_adapters::transform::DEFAULT_TARGET_LUFS;
use lq_adapters::{TerminalAdapter, TransformAdapter};
use lq_core::{JobId, JobState, StateCounts};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::context::RunContext;
use crate::dashboard::{DashboardRenderer, RenderReport, POLL_INTERVAL};
use crate::discover::{discover, Discovered, DEFAULT_EXTENSION};
use crate::queue::QueueError;
use crate::status::StatusError;
use crate::worker::{WorkerPool, DEFAULT_POOL_SIZE};

/// Default error log file name.
pub const DEFAULT_ERROR_LOG: &str = "failed_jobs.txt";

/// Errors that stop a run before or while jobs are seeded
#[derive(Debug, Error)]
pub enum RunError {
    #[error("input directory does not exist or is not a directory: {}", .0.display())]
    InvalidInputDir(PathBuf),
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateOutputDir { path: PathBuf, source: io::Error },
    #[error("failed to reset error log {}: {source}", path.display())]
    ResetErrorLog { path: PathBuf, source: io::Error },
    #[error("failed to read input directory {}: {source}", path.display())]
    ReadInputDir { path: PathBuf, source: io::Error },
    #[error("failed to start workers: {0}")]
    SpawnWorkers(#[source] io::Error),
    #[error(transparent)]
    Status(#[from] StatusError),
    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Settings of one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub pool_size: usize,
    pub force: bool,
    pub target_lufs: f64,
    pub extension: String,
    pub error_log: PathBuf,
    pub poll_interval: Duration,
}

impl RunConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            pool_size: DEFAULT_POOL_SIZE,
            force: false,
            target_lufs: DEFAULT_TARGET_LUFS,
            extension: DEFAULT_EXTENSION.to_string(),
            error_log: PathBuf::from(DEFAULT_ERROR_LOG),
            poll_interval: POLL_INTERVAL,
        }
    }

    lq_core::setters! {
        into {
            extension: String,
            error_log: PathBuf,
        }
        set {
            pool_size: usize,
            force: bool,
            target_lufs: f64,
            poll_interval: Duration,
        }
    }
}

/// Final state of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub counts: StateCounts,
    pub jobs: BTreeMap<JobId, JobState>,
    pub error_log: PathBuf,
    pub error_log_has_entries: bool,
    pub pool_size: usize,
}

/// Entry point of a run.
pub struct Orchestrator;

impl Orchestrator {
    /// Validate the input directory and make sure the output directory exists.
    pub fn prepare(config: RunConfig) -> Result<PreparedRun, RunError> {
        if !config.input_dir.is_dir() {
            return Err(RunError::InvalidInputDir(config.input_dir));
        }
        if !config.output_dir.is_dir() {
            fs::create_dir_all(&config.output_dir).map_err(|source| RunError::CreateOutputDir {
                path: config.output_dir.clone(),
                source,
            })?;
        }
        Ok(PreparedRun { config })
    }
}

/// A run whose directories are in place.
pub struct PreparedRun {
    config: RunConfig,
}

impl PreparedRun {
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Execute every job and wait for the pool and the dashboard to finish.
    pub fn run<T, R>(self, transform: T, terminal: R) -> Result<RunSummary, RunError>
    where
        T: TransformAdapter,
        R: TerminalAdapter,
    {
        let ctx = RunContext::new(self.config.error_log.clone(), self.config.target_lufs);
        self.run_with(ctx, transform, terminal)
    }

    /// Like [`run`](Self::run), over a caller-built context.
    pub fn run_with<T, R>(self, ctx: RunContext, transform: T, terminal: R) -> Result<RunSummary, RunError>
    where
        T: TransformAdapter,
        R: TerminalAdapter,
    {
        let config = self.config;
        let ctx = Arc::new(ctx);

        ctx.error_log().reset().map_err(|source| RunError::ResetErrorLog {
            path: ctx.error_log().path().to_path_buf(),
            source,
        })?;

        let found = discover(&config.input_dir, &config.output_dir, &config.extension, config.force)
            .map_err(|source| RunError::ReadInputDir { path: config.input_dir.clone(), source })?;
        seed(&ctx, found)?;
        info!(
            jobs = ctx.status().len(),
            queued = ctx.queue().len(),
            pool_size = config.pool_size,
            "starting run"
        );

        let pool = WorkerPool::spawn(config.pool_size, Arc::clone(&ctx), Arc::new(transform))
            .map_err(|e| {
                ctx.queue().mark_drained();
                RunError::SpawnWorkers(e)
            })?;
        let dashboard = spawn_dashboard(&ctx, terminal, pool.size(), &config);
        ctx.queue().mark_drained();

        let stats = pool.join();
        let report = match dashboard {
            Some(handle) => handle.join().unwrap_or_else(|_| {
                warn!("dashboard thread panicked");
                RenderReport { cycles: 0, degraded: true }
            }),
            None => RenderReport::default(),
        };
        info!(
            done = stats.done,
            failed = stats.failed,
            redraws = report.cycles,
            dashboard_degraded = report.degraded,
            "run finished"
        );

        let snapshot = ctx.status().snapshot();
        Ok(RunSummary {
            counts: snapshot.counts(),
            jobs: snapshot.into_map(),
            error_log: ctx.error_log().path().to_path_buf(),
            error_log_has_entries: ctx.error_log().has_entries(),
            pool_size: config.pool_size,
        })
    }
}

/// Seed every discovered job. A job whose ID is already taken is not run;
/// its source goes to the error log and the rest of the run proceeds.
fn seed(ctx: &RunContext, found: Vec<Discovered>) -> Result<(), RunError> {
    for entry in found {
        let seeded = if entry.skip {
            ctx.status().seed_skipped(entry.job.id().clone())
        } else {
            ctx.status().seed(entry.job.id().clone())
        };
        match seeded {
            Ok(()) if !entry.skip => ctx.queue().push(entry.job)?,
            Ok(()) => {}
            Err(StatusError::AlreadySeeded(id)) => {
                warn!(job = %id, source = %entry.job.source().display(), "duplicate job id");
                ctx.error_log().append(entry.job.source());
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Start the renderer thread; a failure to start only loses the dashboard.
fn spawn_dashboard<R: TerminalAdapter>(
    ctx: &Arc<RunContext>,
    terminal: R,
    slots: usize,
    config: &RunConfig,
) -> Option<thread::JoinHandle<RenderReport>> {
    let ctx = Arc::clone(ctx);
    let renderer = DashboardRenderer::new(terminal, slots, config.input_dir.clone())
        .with_interval(config.poll_interval);
    let spawned = thread::Builder::new()
        .name("loudq-dashboard".to_string())
        .spawn(move || renderer.run(ctx.status()));
    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(error = %e, "failed to start dashboard");
            None
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
