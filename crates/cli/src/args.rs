// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::{Args, Parser, Subcommand};
use conges_domain::{DEFAULT_HOLIDAY_NAME, DomainError, Holiday, parse_iso_date};
use std::path::PathBuf;

/// Conges - leave and absence deduction calculator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log at debug level (`RUST_LOG` takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Paid-leave (CP) deduction, with sick-leave restoration
    Annual(AnnualArgs),
    /// Deduction for any absence code
    Deduct(DeductArgs),
    /// List French public holidays for a year
    Holidays(HolidaysArgs),
    /// List absence codes and their rules
    Codes(CodesArgs),
    /// Compute one deduction per CSV row
    Batch(BatchArgs),
}

/// Options shared by the calculating commands.
#[derive(Args, Debug, Clone)]
pub struct PeriodArgs {
    /// First day of the absence (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,

    /// Last day of the absence (YYYY-MM-DD)
    #[arg(long)]
    pub end: String,

    /// Extra holiday, as DATE or DATE=NAME (repeatable)
    #[arg(long = "holiday", value_name = "DATE[=NAME]", value_parser = parse_extra_holiday)]
    pub holidays: Vec<Holiday>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AnnualArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Day covered by a sick-leave certificate (repeatable)
    #[arg(long = "sick", value_name = "DATE")]
    pub sick_leave_dates: Vec<String>,

    /// Paid-leave days already taken this year
    #[arg(long)]
    pub prior_days: Option<f64>,
}

#[derive(Args, Debug, Clone)]
pub struct DeductArgs {
    /// Absence code (see `conges codes`)
    #[arg(long)]
    pub code: String,

    #[command(flatten)]
    pub period: PeriodArgs,

    /// Hours per working day for hours-based codes
    #[arg(long, default_value_t = conges::DEFAULT_DAILY_HOURS)]
    pub daily_hours: f64,

    /// Dependent children, for per-child limits
    #[arg(long)]
    pub children: Option<u32>,

    /// Amount of this absence already taken this year
    #[arg(long)]
    pub prior_days: Option<f64>,

    /// Hours of this absence already taken in the starting month
    #[arg(long)]
    pub prior_hours_month: Option<f64>,

    /// Monthly credit in hours, replacing the legal default
    #[arg(long)]
    pub monthly_credit: Option<f64>,
}

#[derive(Args, Debug, Clone)]
pub struct HolidaysArgs {
    /// Calendar year
    #[arg(long)]
    pub year: i32,

    /// Print the list as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CodesArgs {
    /// Print the rule table as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// CSV file with `code,start,end` columns, or `-` for standard input
    #[arg(long, short)]
    pub input: PathBuf,

    /// Extra holiday, as DATE or DATE=NAME (repeatable)
    #[arg(long = "holiday", value_name = "DATE[=NAME]", value_parser = parse_extra_holiday)]
    pub holidays: Vec<Holiday>,
}

/// Parses `DATE` or `DATE=NAME`.
pub fn parse_extra_holiday(value: &str) -> Result<Holiday, DomainError> {
    let (date, name): (&str, &str) = value
        .split_once('=')
        .map_or((value, DEFAULT_HOLIDAY_NAME), |(d, n)| (d, n.trim()));

    Ok(Holiday {
        date: parse_iso_date(date)?,
        name: if name.is_empty() {
            DEFAULT_HOLIDAY_NAME.to_string()
        } else {
            name.to_string()
        },
    })
}
