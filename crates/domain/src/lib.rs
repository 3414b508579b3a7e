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
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod absence_code;
mod calendar;
mod day_class;
mod error;
mod rules;

#[cfg(test)]
mod tests;

pub use absence_code::AbsenceCode;
pub use calendar::{
    DEFAULT_HOLIDAY_NAME, DateRange, Holiday, HolidayCalendar, easter_sunday,
    french_public_holidays, iso_date, parse_iso_date,
};
pub use day_class::{DayClass, classify_day};
pub use error::DomainError;
pub use rules::{
    AbsenceTypeRule, CHILD_SICKNESS_DAYS_PER_CHILD, DELEGATION_MONTHLY_HOURS, DeductionMethod,
    ITERATION_GUARD_MARGIN, LimitScope, MAX_PERIOD_DAYS, PayrollImpact, all_rules, find_rule,
};
