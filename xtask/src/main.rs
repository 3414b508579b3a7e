// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask
//!
//! Developer and CI entry points for the `conges` workspace.
//!
//! - `cargo xtask ci` lints, checks for unused dependencies, builds, tests,
//!   and runs the CLI smoke scenario
//! - `cargo xtask smoke-cli` runs the `conges` binary on a known paid-leave
//!   request and checks the JSON it prints
//!
//! `cargo-machete` and `cargo-llvm-cov` must be on `PATH` for the commands
//! that use them. Formatting and doc lints use the nightly toolchain.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{io, process::Output};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    eyre::{bail, Context},
    Result,
};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    if let Err(err) = args.command.run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Everything CI runs, in order
    CI,

    /// Build every target
    #[command(visible_alias = "b")]
    Build,

    /// Type-check every target
    #[command(visible_alias = "c")]
    Check,

    /// Write an lcov report to target/lcov.info
    #[command(visible_alias = "cov")]
    Coverage,

    /// Look for unused dependencies
    #[command(visible_alias = "m")]
    Machete,

    /// Clippy, docs and formatting
    #[command(visible_alias = "l")]
    Lint,

    /// Clippy with warnings denied
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Build the docs with warnings denied
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check formatting
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Apply clippy suggestions
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Format the workspace
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Unit and doc tests
    #[command(visible_alias = "t")]
    Test,

    /// Run the CLI on a known request
    #[command(visible_alias = "s")]
    SmokeCli,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => run_cargo(&["build", "--all-targets", "--all-features"]),
            Self::Check => run_cargo(&["check", "--all-targets", "--all-features"]),
            Self::Coverage => run_cargo(&[
                "llvm-cov",
                "--lcov",
                "--output-path",
                "target/lcov.info",
                "--all-features",
            ]),
            Self::Machete => machete(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => run_cargo_nightly(&["fmt", "--all", "--check"]),
            Self::FixClippy => run_cargo(&[
                "clippy",
                "--all-targets",
                "--all-features",
                "--fix",
                "--allow-dirty",
                "--allow-staged",
            ]),
            Self::FixFormatting => run_cargo_nightly(&["fmt", "--all"]),
            Self::Test => test(),
            Self::SmokeCli => smoke_cli(),
        }
    }
}

fn ci() -> Result<()> {
    lint()?;
    machete()?;
    run_cargo(&["build", "--all-targets", "--all-features"])?;
    test()?;
    smoke_cli()
}

fn machete() -> Result<()> {
    cmd!("cargo-machete").run_with_trace()?;
    Ok(())
}

fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    run_cargo_nightly(&["fmt", "--all", "--check"])
}

fn lint_clippy() -> Result<()> {
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Builds each package's docs the way docs.rs would.
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to read cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            ["doc", "--no-deps", "--all-features", "--package", &package.name],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

fn test() -> Result<()> {
    run_cargo(&["test", "--all-targets", "--all-features"])?;
    // doc tests are not part of --all-targets
    run_cargo(&["test", "--doc", "--all-features"])
}

fn run_cargo(args: &[&str]) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

fn run_cargo_nightly(args: &[&str]) -> Result<()> {
    cmd("cargo", args)
        // CARGO points at the toolchain that launched xtask
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Paid leave from Saturday 2025-10-11 to Sunday 2025-10-19 with a local
/// holiday on the Wednesday: 9 days requested, 6 deducted.
const SMOKE_ANNUAL_ARGS: &[&str] = &[
    "annual",
    "--start",
    "2025-10-11",
    "--end",
    "2025-10-19",
    "--holiday",
    "2025-10-15=Fête locale",
    "--json",
];

/// Runs the `conges` binary with `args` and returns its standard output.
fn run_cli(args: &[&str]) -> Result<String> {
    let mut cargo_args: Vec<&str> = vec!["run", "--quiet", "--package", "conges-cli", "--"];
    cargo_args.extend_from_slice(args);

    let output: String = cmd("cargo", cargo_args)
        .env("RUST_LOG", "warn")
        .read()
        .wrap_err_with(|| format!("failed to run conges {}", args.join(" ")))?;
    tracing::debug!("{output}");
    Ok(output)
}

fn smoke_cli() -> Result<()> {
    let annual: String = run_cli(SMOKE_ANNUAL_ARGS)?;
    for expected in [
        "\"totalRequestedDays\": 9",
        "\"deductedAmount\": 6.0",
        "\"sundays\": 2",
        "\"holidays\": 1",
        "\"sickLeaveDays\": 0",
    ] {
        if !annual.contains(expected) {
            bail!("smoke test: expected {expected} in CLI output");
        }
    }

    let codes: usize = run_cli(&["codes"])?.lines().count();
    if codes != 16 {
        bail!("smoke test: expected 16 absence codes, got {codes}");
    }

    tracing::info!("CLI smoke test passed");
    Ok(())
}

/// Logs a `duct::Expression` before running it.
trait ExpressionExt {
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // output may have pushed the command off screen
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
