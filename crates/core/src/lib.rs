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

//! Leave and absence deduction engine.
//!
//! Two calculators share one bounded day walk:
//!
//! * [`calculate_annual_leave_deduction`] for statutory paid leave, which
//!   counts Monday through Saturday and gives back days covered by sick leave
//! * [`calculate_absence_deduction`] for every other absence code, driven by
//!   the code's rule
//!
//! Both return a [`DeductionResult`] that is never an error: invalid input
//! produces a result flagged invalid with nothing deducted. The typed
//! variants ([`annual_leave_deduction`], [`absence_deduction`]) return
//! `Result` for callers that hold parsed values.

mod absence;
mod annual_leave;
mod error;
mod report;
mod result;
mod validation;
mod walk;

#[cfg(test)]
mod tests;

pub use absence::{
    AbsenceContext, DEFAULT_DAILY_HOURS, absence_deduction, calculate_absence_deduction,
};
pub use annual_leave::{annual_leave_deduction, calculate_annual_leave_deduction};
pub use error::CoreError;
pub use report::format_report;
pub use result::{DayBreakdown, DayEntry, DeductionResult, DeductionUnit, format_amount};
pub use validation::{EmployeeContext, MonthlyUsage, ValidationOutcome, validate_deduction};
