// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! loudq: parallel loudness normalization with a live terminal dashboard.

mod args;
mod color;
mod config;
mod env;
mod exit_error;
mod logging;
mod output;
mod run;

use std::process::ExitCode;

use args::Parsed;
use exit_error::{ExitError, EXIT_USAGE};

fn main() -> ExitCode {
    let _guard = logging::init();

    match args::parse_args(std::env::args_os()) {
        Parsed::Help(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Parsed::Invalid(text) => {
            eprint!("{text}");
            exit_code(EXIT_USAGE)
        }
        Parsed::Run(cli) => match run::execute(&cli) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                let code = e.downcast_ref::<ExitError>().map_or(EXIT_USAGE, |x| x.code);
                eprintln!("{} {e:#}", color::failure("error:"));
                exit_code(code)
            }
        },
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
