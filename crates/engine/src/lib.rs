// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lq-engine: job queue, status table, worker pool, dashboard and run
//! orchestration for loudq.

mod context;
pub mod dashboard;
pub mod discover;
mod error_log;
mod orchestrator;
mod queue;
mod status;
pub mod worker;

pub use context::RunContext;
pub use dashboard::{DashboardRenderer, RenderReport};
pub use discover::Discovered;
pub use error_log::ErrorLog;
pub use orchestrator::{
    Orchestrator, PreparedRun, RunConfig, RunError, RunSummary, DEFAULT_ERROR_LOG,
};
pub use queue::{JobQueue, QueueError};
pub use status::{StatusError, StatusSnapshot, StatusTable, Transition};
pub use worker::{
    detected_concurrency, resolve_pool_size, WorkerPool, WorkerStats, DEFAULT_POOL_SIZE,
};
