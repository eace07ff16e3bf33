// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line surface.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use lq_adapters::transform::DEFAULT_TARGET_LUFS;
use lq_engine::discover::DEFAULT_EXTENSION;
use lq_engine::DEFAULT_ERROR_LOG;

use crate::output::OutputFormat;

/// Alternate help switch accepted anywhere on the command line.
pub const SLASH_HELP: &str = "/?";

#[derive(Debug, Parser)]
#[command(
    name = "loudq",
    version = concat!(env!("CARGO_PKG_VERSION"), "+", env!("LOUDQ_BUILD_HASH")),
    about = "Loudness-normalize a directory of audio files in parallel",
    styles = crate::color::styles()
)]
pub struct Cli {
    /// Directory holding the source files
    pub input_dir: PathBuf,

    /// Directory receiving normalized files (created if missing)
    pub output_dir: PathBuf,

    /// Worker count; non-positive or non-numeric values use the detected CPU count
    #[arg(allow_negative_numbers = true)]
    pub threads: Option<String>,

    /// Re-process files whose output already exists
    #[arg(long)]
    pub force: bool,

    /// Integrated loudness target in LUFS
    #[arg(long, default_value_t = DEFAULT_TARGET_LUFS, allow_negative_numbers = true)]
    pub target: f64,

    /// Configuration file holding `ffmpeg_path=<path>`
    #[arg(long, env = "LOUDQ_CONFIG", default_value = "config.ini")]
    pub config: PathBuf,

    /// File receiving the source path of every failed job
    #[arg(long, default_value = DEFAULT_ERROR_LOG)]
    pub error_log: PathBuf,

    /// Extension of eligible input files (case-insensitive)
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    pub ext: String,

    /// Do not draw the live dashboard
    #[arg(long)]
    pub no_dashboard: bool,

    /// Final summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Outcome of argument parsing.
#[derive(Debug)]
pub enum Parsed {
    Run(Box<Cli>),
    /// Help or version text for stdout; exit 0.
    Help(String),
    /// Usage error for stderr; exit 1.
    Invalid(String),
}

pub fn parse_args<I, T>(args: I) -> Parsed
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.iter().skip(1).any(|a| a == SLASH_HELP) {
        return Parsed::Help(Cli::command().render_help().to_string());
    }

    match Cli::try_parse_from(args) {
        Ok(cli) => Parsed::Run(Box::new(cli)),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Parsed::Help(e.render().to_string()),
            _ => Parsed::Invalid(e.render().to_string()),
        },
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
