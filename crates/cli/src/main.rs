// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod batch;
mod calendar;
mod commands;
mod error;

use crate::args::{BatchArgs, Cli, Command};
use crate::batch::{BatchSummary, run_batch};
use crate::error::CliError;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let cli: Cli = Cli::parse();

    let default_level: &str = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let stdout: io::Stdout = io::stdout();
    let mut out: io::StdoutLock<'_> = stdout.lock();

    match run(&cli.command, &mut out) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            error!(error = %err, "command failed");
            let _ = writeln!(io::stderr(), "conges : {err}");
            ExitCode::from(2)
        }
    }
}

/// Dispatches a parsed command. Returns whether every outcome was valid.
fn run(command: &Command, out: &mut dyn Write) -> Result<bool, CliError> {
    match command {
        Command::Annual(args) => commands::annual(args, out),
        Command::Deduct(args) => commands::deduct(args, out),
        Command::Holidays(args) => commands::holidays(args, out),
        Command::Codes(args) => commands::codes(args, out),
        Command::Batch(args) => batch(args, out),
    }
}

fn batch(args: &BatchArgs, out: &mut dyn Write) -> Result<bool, CliError> {
    let input: Box<dyn Read> = if args.input.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file: File = File::open(&args.input).map_err(|source| CliError::Input {
            path: args.input.display().to_string(),
            source,
        })?;
        Box::new(BufReader::new(file))
    };

    info!(input = %args.input.display(), "running batch");
    let summary: BatchSummary = run_batch(input, out, &args.holidays)?;
    Ok(summary.invalid_count == 0)
}
