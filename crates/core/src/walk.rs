// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bounded day-by-day walk shared by both calculators.

use crate::result::DayBreakdown;
use conges_domain::{DateRange, DayClass, DomainError, HolidayCalendar, classify_day};
use std::collections::BTreeSet;
use time::Date;

/// What a walk over a date range produced.
pub struct Walk {
    /// Requested calendar days.
    pub total_days: u32,
    /// Sum of the per-day amounts.
    pub deducted: f64,
    /// Per-day classification.
    pub breakdown: DayBreakdown,
}

/// Rejects ranges longer than `max_days` before anything is iterated.
///
/// # Errors
///
/// Returns `DomainError::PeriodTooLong` if the range exceeds `max_days`.
pub fn check_span(range: &DateRange, max_days: u32) -> Result<u32, DomainError> {
    let days: i64 = range.day_count();
    match u32::try_from(days) {
        Ok(count) if count <= max_days => Ok(count),
        _ => Err(DomainError::PeriodTooLong {
            days,
            max: max_days,
        }),
    }
}

/// Walks every day of `range` once, classifying it and asking `amount_for`
/// how much it costs.
///
/// The loop stops after `guard` iterations whatever the dates say.
///
/// # Errors
///
/// Returns an error if the guard is exhausted or date arithmetic overflows.
pub fn walk_range<F>(
    range: &DateRange,
    holidays: &HolidayCalendar,
    sick_leave_dates: &BTreeSet<Date>,
    guard: u32,
    mut amount_for: F,
) -> Result<Walk, DomainError>
where
    F: FnMut(Date, DayClass) -> f64,
{
    let mut breakdown: DayBreakdown = DayBreakdown::default();
    let mut deducted: f64 = 0.0;
    let mut iterations: u32 = 0;
    let mut current: Date = range.start();

    loop {
        if iterations >= guard {
            return Err(DomainError::IterationGuardExhausted { guard });
        }
        iterations += 1;

        let class: DayClass = classify_day(current, holidays, sick_leave_dates);
        let amount: f64 = amount_for(current, class);
        breakdown.record(current, class, holidays.name_of(current), amount);
        deducted += amount;

        if current >= range.end() {
            break;
        }
        current = current
            .next_day()
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("le passage au lendemain de {current}"),
            })?;
    }

    Ok(Walk {
        total_days: iterations,
        deducted,
        breakdown,
    })
}

/// Splits the walked days into contiguous runs that were not sick leave.
///
/// # Errors
///
/// Returns an error if a run cannot form a valid range.
pub fn sub_periods(breakdown: &DayBreakdown) -> Result<Vec<DateRange>, DomainError> {
    let mut periods: Vec<DateRange> = Vec::new();
    let mut run: Option<(Date, Date)> = None;

    for entry in &breakdown.days {
        if entry.class == DayClass::SickLeaveOverlap {
            if let Some((start, end)) = run.take() {
                periods.push(DateRange::new(start, end)?);
            }
        } else {
            run = Some(run.map_or((entry.date, entry.date), |(start, _)| (start, entry.date)));
        }
    }
    if let Some((start, end)) = run {
        periods.push(DateRange::new(start, end)?);
    }

    Ok(periods)
}
