// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One function per subcommand. Each writes to `out` and returns whether
//! the outcome was valid.

use crate::args::{AnnualArgs, CodesArgs, DeductArgs, HolidaysArgs};
use crate::calendar::calendar_for;
use crate::error::CliError;
use conges::{
    AbsenceContext, DeductionResult, EmployeeContext, ValidationOutcome,
    calculate_absence_deduction, calculate_annual_leave_deduction, format_amount, format_report,
    validate_deduction,
};
use conges_domain::{AbsenceTypeRule, Holiday, HolidayCalendar, all_rules, french_public_holidays};
use serde::Serialize;
use std::io::Write;
use tracing::info;

/// JSON shape of a calculation.
#[derive(Debug, Serialize)]
struct CalculationOutput<'a> {
    result: &'a DeductionResult,
    validation: &'a ValidationOutcome,
}

/// Runs `conges annual`.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn annual(args: &AnnualArgs, out: &mut dyn Write) -> Result<bool, CliError> {
    let holidays: HolidayCalendar =
        calendar_for(&args.period.start, &args.period.end, &args.period.holidays);
    let result: DeductionResult = calculate_annual_leave_deduction(
        &args.period.start,
        &args.period.end,
        &holidays,
        args.sick_leave_dates.as_slice(),
    );
    let employee: Option<EmployeeContext> = args.prior_days.map(|prior| EmployeeContext {
        prior_days_this_year: prior,
        ..EmployeeContext::default()
    });
    let validation: ValidationOutcome =
        validate_deduction(&result.absence_code, &result, employee.as_ref());

    info!(
        start = %args.period.start,
        end = %args.period.end,
        deducted = result.deducted_amount,
        valid = result.is_valid,
        "annual leave computed"
    );
    write_calculation(&result, &validation, args.period.json, out)
}

/// Runs `conges deduct`.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn deduct(args: &DeductArgs, out: &mut dyn Write) -> Result<bool, CliError> {
    let holidays: HolidayCalendar =
        calendar_for(&args.period.start, &args.period.end, &args.period.holidays);
    let context: AbsenceContext = AbsenceContext::with_daily_hours(args.daily_hours);
    let result: DeductionResult = calculate_absence_deduction(
        &args.code,
        &args.period.start,
        &args.period.end,
        &holidays,
        &context,
    );
    let validation: ValidationOutcome =
        validate_deduction(&args.code, &result, employee_context(args).as_ref());

    info!(
        code = %args.code,
        start = %args.period.start,
        end = %args.period.end,
        deducted = result.deducted_amount,
        valid = result.is_valid,
        "absence deduction computed"
    );
    write_calculation(&result, &validation, args.period.json, out)
}

/// Runs `conges holidays`.
///
/// # Errors
///
/// Returns an error if the year is outside the supported range or the
/// output cannot be written.
pub fn holidays(args: &HolidaysArgs, out: &mut dyn Write) -> Result<bool, CliError> {
    let holidays: Vec<Holiday> = french_public_holidays(args.year)?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &holidays)?;
        writeln!(out)?;
    } else {
        for holiday in &holidays {
            writeln!(out, "{}  {} {}", holiday.date, weekday_fr(holiday.date), holiday.name)?;
        }
    }
    Ok(true)
}

/// Runs `conges codes`.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn codes(args: &CodesArgs, out: &mut dyn Write) -> Result<bool, CliError> {
    let rules: Vec<AbsenceTypeRule> = all_rules();

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &rules)?;
        writeln!(out)?;
        return Ok(true);
    }

    for rule in &rules {
        writeln!(
            out,
            "{:<4} {:<42} {:<18} {}{}",
            rule.code.as_str(),
            rule.display_name,
            rule.deduction_method.label(),
            rule.payroll_impact.description(),
            limits(rule)
        )?;
    }
    Ok(true)
}

fn employee_context(args: &DeductArgs) -> Option<EmployeeContext> {
    if args.children.is_none()
        && args.prior_days.is_none()
        && args.prior_hours_month.is_none()
        && args.monthly_credit.is_none()
    {
        return None;
    }

    Some(EmployeeContext {
        prior_days_this_year: args.prior_days.unwrap_or_default(),
        prior_hours_this_month: args.prior_hours_month.unwrap_or_default(),
        children_count: args.children,
        monthly_credit_hours: args.monthly_credit,
        ..EmployeeContext::default()
    })
}

fn write_calculation(
    result: &DeductionResult,
    validation: &ValidationOutcome,
    json: bool,
    out: &mut dyn Write,
) -> Result<bool, CliError> {
    if json {
        serde_json::to_writer_pretty(&mut *out, &CalculationOutput { result, validation })?;
        writeln!(out)?;
    } else {
        write!(out, "{}", format_report(result, validation))?;
    }
    Ok(result.is_valid && validation.is_valid)
}

fn limits(rule: &AbsenceTypeRule) -> String {
    let unit: &str = if rule.counts_hours() { "h" } else { "j" };
    let mut parts: Vec<String> = Vec::new();
    if let Some(annual) = rule.annual_limit {
        parts.push(format!("{} {unit}/an", format_amount(annual)));
    }
    if let Some(monthly) = rule.monthly_limit {
        parts.push(format!("{} {unit}/mois", format_amount(monthly)));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!(" (plafond {})", parts.join(", "))
    }
}

fn weekday_fr(date: time::Date) -> &'static str {
    match date.weekday() {
        time::Weekday::Monday => "lundi",
        time::Weekday::Tuesday => "mardi",
        time::Weekday::Wednesday => "mercredi",
        time::Weekday::Thursday => "jeudi",
        time::Weekday::Friday => "vendredi",
        time::Weekday::Saturday => "samedi",
        time::Weekday::Sunday => "dimanche",
    }
}
