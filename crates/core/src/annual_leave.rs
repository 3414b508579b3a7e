// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Statutory paid leave (congés payés) deduction.
//!
//! Leave is counted in working days (jours ouvrables): Monday through
//! Saturday. Sundays and holidays are not deducted, and a day covered by
//! sick leave is given back to the employee.

use crate::error::CoreError;
use crate::result::{DeductionResult, DeductionUnit};
use crate::walk::{Walk, check_span, sub_periods, walk_range};
use conges_domain::{
    AbsenceCode, AbsenceTypeRule, DateRange, DayClass, DomainError, HolidayCalendar,
    parse_iso_date,
};
use std::collections::BTreeSet;
use time::Date;
use tracing::{debug, warn};

/// Computes the paid-leave deduction for a request given as ISO strings.
///
/// Never fails: unparseable dates, inverted or over-long ranges and
/// unusable sick-leave dates yield a result with `is_valid` false and the
/// reason in `warnings`.
///
/// # Arguments
///
/// * `start` - First requested day (`YYYY-MM-DD`)
/// * `end` - Last requested day (`YYYY-MM-DD`)
/// * `holidays` - Holidays for the years the request covers
/// * `sick_leave_dates` - Days covered by a sick-leave certificate
pub fn calculate_annual_leave_deduction<S: AsRef<str>>(
    start: &str,
    end: &str,
    holidays: &HolidayCalendar,
    sick_leave_dates: &[S],
) -> DeductionResult {
    let rule: AbsenceTypeRule = AbsenceCode::CongesPayes.rule();

    match try_calculate(start, end, holidays, sick_leave_dates) {
        Ok(result) => result,
        Err(err) => {
            warn!(start, end, error = %err, "annual leave calculation rejected");
            DeductionResult::invalid(rule.code.as_str(), Some(&rule), err.to_string())
        }
    }
}

/// Computes the paid-leave deduction for an already parsed range.
///
/// # Errors
///
/// Returns an error if the range exceeds the rule's ceiling, the iteration
/// guard is exhausted, or the computed result breaks its invariants.
pub fn annual_leave_deduction(
    range: DateRange,
    holidays: &HolidayCalendar,
    sick_leave_dates: &BTreeSet<Date>,
) -> Result<DeductionResult, CoreError> {
    let rule: AbsenceTypeRule = AbsenceCode::CongesPayes.rule();
    check_span(&range, rule.max_days_per_period)?;

    let walk: Walk = walk_range(
        &range,
        holidays,
        sick_leave_dates,
        rule.iteration_guard(),
        |_, class| match class {
            DayClass::Saturday | DayClass::OrdinaryWorkingDay => 1.0,
            DayClass::SickLeaveOverlap | DayClass::Holiday | DayClass::Sunday => 0.0,
        },
    )?;

    let mut warnings: Vec<String> = Vec::new();
    if walk.breakdown.working_days == 0 {
        warnings.push(String::from("Aucun jour ouvrable décompté sur la période"));
    }

    let result: DeductionResult = DeductionResult {
        absence_code: rule.code.as_str().to_string(),
        display_name: rule.display_name.to_string(),
        period: Some(range),
        total_requested_days: walk.total_days,
        deducted_amount: walk.deducted,
        unit: DeductionUnit::Days,
        sub_periods: sub_periods(&walk.breakdown)?,
        breakdown: walk.breakdown,
        payroll_impact: Some(rule.payroll_impact),
        legal_basis: rule.legal_basis.to_string(),
        is_valid: true,
        warnings,
    };
    result.check_invariants()?;

    debug!(
        period = %range,
        requested = result.total_requested_days,
        deducted = result.deducted_amount,
        restored = result.breakdown.sick_leave_days,
        "annual leave deduction computed"
    );

    Ok(result)
}

fn try_calculate<S: AsRef<str>>(
    start: &str,
    end: &str,
    holidays: &HolidayCalendar,
    sick_leave_dates: &[S],
) -> Result<DeductionResult, CoreError> {
    let range: DateRange = DateRange::parse(start, end)?;
    let sick: BTreeSet<Date> = parse_sick_leave_dates(sick_leave_dates)?;
    annual_leave_deduction(range, holidays, &sick)
}

/// Parses sick-leave dates, failing on the first invalid one.
fn parse_sick_leave_dates<S: AsRef<str>>(dates: &[S]) -> Result<BTreeSet<Date>, DomainError> {
    dates.iter().map(|d| parse_iso_date(d.as_ref())).collect()
}
