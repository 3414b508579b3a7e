// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rule-driven deduction for every absence code.

use crate::error::CoreError;
use crate::result::{DeductionResult, DeductionUnit};
use crate::walk::{Walk, check_span, walk_range};
use conges_domain::{
    AbsenceCode, AbsenceTypeRule, DateRange, DayClass, DeductionMethod, DomainError,
    HolidayCalendar,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::{Date, Weekday};
use tracing::{debug, warn};

/// Hours in a standard working day of a 35-hour week.
pub const DEFAULT_DAILY_HOURS: f64 = 7.0;

/// Per-employee parameters of a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceContext {
    /// Hours credited per working day for hours-based absences.
    pub daily_hours: f64,
}

impl Default for AbsenceContext {
    fn default() -> Self {
        Self {
            daily_hours: DEFAULT_DAILY_HOURS,
        }
    }
}

impl AbsenceContext {
    /// Creates a context with an explicit daily hours value.
    #[must_use]
    pub const fn with_daily_hours(daily_hours: f64) -> Self {
        Self { daily_hours }
    }
}

/// Computes the deduction for any absence code given as UI strings.
///
/// Unknown codes, unusable dates and over-long periods yield a result with
/// `is_valid` false, nothing deducted and the reason in `warnings`. There is
/// no fallback rule.
///
/// Sick leave does not interrupt absences computed here; use
/// [`calculate_annual_leave_deduction`](crate::calculate_annual_leave_deduction)
/// for paid leave that must honour it.
pub fn calculate_absence_deduction(
    absence_code: &str,
    start: &str,
    end: &str,
    holidays: &HolidayCalendar,
    context: &AbsenceContext,
) -> DeductionResult {
    let code: AbsenceCode = match absence_code.parse() {
        Ok(code) => code,
        Err(err) => {
            warn!(absence_code, "unknown absence code");
            return DeductionResult::invalid(absence_code, None, err.to_string());
        }
    };
    let rule: AbsenceTypeRule = code.rule();

    let outcome: Result<DeductionResult, CoreError> = DateRange::parse(start, end)
        .map_err(CoreError::from)
        .and_then(|range| absence_deduction(code, range, holidays, context));

    match outcome {
        Ok(result) => result,
        Err(err) => {
            warn!(absence_code, start, end, error = %err, "absence calculation rejected");
            DeductionResult::invalid(absence_code, Some(&rule), err.to_string())
        }
    }
}

/// Computes the deduction for a parsed code and range.
///
/// # Errors
///
/// Returns an error if the range exceeds the rule's ceiling, the daily
/// hours are unusable for an hours-based rule, the iteration guard is
/// exhausted, or the result breaks its invariants.
pub fn absence_deduction(
    code: AbsenceCode,
    range: DateRange,
    holidays: &HolidayCalendar,
    context: &AbsenceContext,
) -> Result<DeductionResult, CoreError> {
    let rule: AbsenceTypeRule = code.rule();
    check_span(&range, rule.max_days_per_period)?;

    if rule.deduction_method == DeductionMethod::Hours {
        validate_daily_hours(context.daily_hours)?;
    }

    let walk: Walk = walk_range(
        &range,
        holidays,
        &BTreeSet::new(),
        rule.iteration_guard(),
        |date, class| day_amount(&rule, context, date, class),
    )?;

    let mut warnings: Vec<String> = Vec::new();
    if code == AbsenceCode::CongesPayes {
        warnings.push(String::from(
            "Calcul général : les jours d'arrêt maladie ne sont pas restitués",
        ));
    }

    let result: DeductionResult = DeductionResult {
        absence_code: code.as_str().to_string(),
        display_name: rule.display_name.to_string(),
        period: Some(range),
        total_requested_days: walk.total_days,
        deducted_amount: walk.deducted,
        unit: if rule.counts_hours() {
            DeductionUnit::Hours
        } else {
            DeductionUnit::Days
        },
        breakdown: walk.breakdown,
        sub_periods: vec![range],
        payroll_impact: Some(rule.payroll_impact),
        legal_basis: rule.legal_basis.to_string(),
        is_valid: true,
        warnings,
    };
    result.check_invariants()?;

    debug!(
        code = %code,
        period = %range,
        method = ?rule.deduction_method,
        requested = result.total_requested_days,
        deducted = result.deducted_amount,
        "absence deduction computed"
    );

    Ok(result)
}

/// Amount one classified day costs under `rule`.
fn day_amount(rule: &AbsenceTypeRule, context: &AbsenceContext, date: Date, class: DayClass) -> f64 {
    let is_sunday: bool = date.weekday() == Weekday::Sunday;
    let is_saturday: bool = date.weekday() == Weekday::Saturday;

    match rule.deduction_method {
        DeductionMethod::CalendarDays => 1.0,
        DeductionMethod::None => 0.0,
        DeductionMethod::WorkingDays => match class {
            DayClass::Saturday | DayClass::OrdinaryWorkingDay => 1.0,
            DayClass::Sunday if !rule.exclude_sundays => 1.0,
            DayClass::Holiday if !rule.exclude_holidays && !(is_sunday && rule.exclude_sundays) => {
                1.0
            }
            _ => 0.0,
        },
        DeductionMethod::Hours => match class {
            DayClass::OrdinaryWorkingDay => context.daily_hours,
            DayClass::Holiday if !rule.exclude_holidays && !is_sunday && !is_saturday => {
                context.daily_hours
            }
            _ => 0.0,
        },
    }
}

fn validate_daily_hours(daily_hours: f64) -> Result<(), DomainError> {
    if daily_hours.is_finite() && daily_hours > 0.0 && daily_hours <= 24.0 {
        Ok(())
    } else {
        Err(DomainError::InvalidDailyHours(daily_hours.to_string()))
    }
}
