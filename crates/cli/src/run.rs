// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire parsed arguments to the engine.

use std::io::IsTerminal;

use anyhow::Result;
use lq_adapters::{CrosstermTerminal, FfmpegTransform, NoopTerminal};
use lq_engine::{detected_concurrency, resolve_pool_size, Orchestrator, RunConfig, RunSummary};
use tracing::{debug, info};

use crate::args::Cli;
use crate::config;
use crate::exit_error::ExitError;

/// Run one normalization pass and print its summary.
pub fn execute(cli: &Cli) -> Result<()> {
    let summary = normalize(cli)?;
    crate::output::print_summary(&summary, cli.format)
}

fn normalize(cli: &Cli) -> Result<RunSummary> {
    let pool_size = resolve_pool_size(cli.threads.as_deref(), detected_concurrency());
    let run_config = RunConfig::new(&cli.input_dir, &cli.output_dir)
        .pool_size(pool_size)
        .force(cli.force)
        .target_lufs(cli.target)
        .extension(cli.ext.as_str())
        .error_log(&cli.error_log);

    let prepared = Orchestrator::prepare(run_config).map_err(fatal)?;
    let transform = FfmpegTransform::new(config::load_ffmpeg_path(&cli.config).map_err(fatal)?);
    info!(ffmpeg = %transform.program().display(), pool_size, "resolved transform");

    let summary = if !cli.no_dashboard && std::io::stdout().is_terminal() {
        prepared.run(transform, CrosstermTerminal::new())
    } else {
        prepared.run(transform, NoopTerminal)
    };
    summary.map_err(fatal)
}

fn fatal(e: impl std::fmt::Display) -> anyhow::Error {
    debug!(error = %e, "run aborted");
    ExitError::usage(e).into()
}
