// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use lq_engine::RunSummary;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render the end-of-run summary.
pub fn format_summary(summary: &RunSummary, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(format_text(summary)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
    }
}

pub fn print_summary(summary: &RunSummary, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", format_summary(summary, format)?);
    Ok(())
}

fn format_text(summary: &RunSummary) -> String {
    let c = &summary.counts;
    let mut out = format!(
        "{} {}",
        crate::color::header("Done."),
        crate::color::context(&format!(
            "{} processed, {} failed, {} skipped",
            c.done, c.error, c.skipped
        )),
    );
    if summary.error_log_has_entries {
        out.push('\n');
        out.push_str(&crate::color::failure(&format!(
            "Some files could not be processed. See: {}",
            summary.error_log.display()
        )));
    }
    out
}
