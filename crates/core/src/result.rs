// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calculation output types.

use crate::error::CoreError;
use conges_domain::{AbsenceTypeRule, DateRange, DayClass, PayrollImpact};
use serde::{Deserialize, Serialize};
use time::Date;

/// Unit of a deducted amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeductionUnit {
    /// Days.
    #[serde(rename = "jours")]
    Days,
    /// Hours.
    #[serde(rename = "heures")]
    Hours,
}

impl DeductionUnit {
    /// The label shown to users.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Days => "jours",
            Self::Hours => "heures",
        }
    }
}

/// One classified day of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    /// The day.
    #[serde(with = "conges_domain::iso_date")]
    pub date: Date,
    /// Its classification.
    pub class: DayClass,
    /// Holiday name when the day is a holiday.
    pub holiday_name: Option<String>,
    /// Amount this day contributed to the deduction.
    pub deducted: f64,
}

/// Per-bucket counts of the days of a request.
///
/// For every valid result `working_days + sundays + holidays +
/// sick_leave_days` equals the number of requested days. Saturdays are
/// working days and are also counted separately in `saturdays`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBreakdown {
    /// Monday through Saturday, not holidays.
    pub working_days: u32,
    /// Saturdays among `working_days`.
    pub saturdays: u32,
    /// Sundays.
    pub sundays: u32,
    /// Holidays.
    pub holidays: u32,
    /// Days restored because of sick leave.
    pub sick_leave_days: u32,
    /// Every day, in order.
    pub days: Vec<DayEntry>,
}

impl DayBreakdown {
    /// Records one classified day.
    pub(crate) fn record(
        &mut self,
        date: Date,
        class: DayClass,
        holiday_name: Option<&str>,
        deducted: f64,
    ) {
        match class {
            DayClass::SickLeaveOverlap => self.sick_leave_days += 1,
            DayClass::Holiday => self.holidays += 1,
            DayClass::Sunday => self.sundays += 1,
            DayClass::Saturday => {
                self.working_days += 1;
                self.saturdays += 1;
            }
            DayClass::OrdinaryWorkingDay => self.working_days += 1,
        }

        self.days.push(DayEntry {
            date,
            class,
            holiday_name: holiday_name.map(str::to_string),
            deducted,
        });
    }

    /// Sum of the four exclusive buckets.
    #[must_use]
    pub const fn bucket_total(&self) -> u32 {
        self.working_days + self.sundays + self.holidays + self.sick_leave_days
    }

    /// Holidays hit by the request, with their names.
    pub fn holiday_hits(&self) -> impl Iterator<Item = (Date, &str)> {
        self.days
            .iter()
            .filter(|entry| entry.class == DayClass::Holiday)
            .map(|entry| (entry.date, entry.holiday_name.as_deref().unwrap_or_default()))
    }

    /// Days given back because of sick leave.
    pub fn restored_dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.days
            .iter()
            .filter(|entry| entry.class == DayClass::SickLeaveOverlap)
            .map(|entry| entry.date)
    }
}

/// The outcome of one deduction calculation.
///
/// Invalid inputs never raise: they produce a result with `is_valid` false,
/// zero deduction and the reason in `warnings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionResult {
    /// The absence code as supplied by the caller.
    pub absence_code: String,
    /// Display name of the rule, empty for unknown codes.
    pub display_name: String,
    /// The requested period, when the dates were usable.
    pub period: Option<DateRange>,
    /// Calendar days in the requested period.
    pub total_requested_days: u32,
    /// Amount deducted from the entitlement, in `unit`.
    pub deducted_amount: f64,
    /// Unit of `deducted_amount`.
    pub unit: DeductionUnit,
    /// Per-day classification.
    pub breakdown: DayBreakdown,
    /// Contiguous periods left once sick-leave days are taken out.
    pub sub_periods: Vec<DateRange>,
    /// Effect on pay, absent for unknown codes.
    pub payroll_impact: Option<PayrollImpact>,
    /// Legal citation.
    pub legal_basis: String,
    /// Whether the calculation could be carried out.
    pub is_valid: bool,
    /// Explanations, in order.
    pub warnings: Vec<String>,
}

impl DeductionResult {
    /// Builds a fail-closed result.
    #[must_use]
    pub fn invalid(absence_code: &str, rule: Option<&AbsenceTypeRule>, reason: String) -> Self {
        Self {
            absence_code: absence_code.to_string(),
            display_name: rule.map_or_else(String::new, |r| r.display_name.to_string()),
            period: None,
            total_requested_days: 0,
            deducted_amount: 0.0,
            unit: if rule.is_some_and(AbsenceTypeRule::counts_hours) {
                DeductionUnit::Hours
            } else {
                DeductionUnit::Days
            },
            breakdown: DayBreakdown::default(),
            sub_periods: Vec::new(),
            payroll_impact: rule.map(|r| r.payroll_impact),
            legal_basis: rule.map_or_else(String::new, |r| r.legal_basis.to_string()),
            is_valid: false,
            warnings: vec![reason],
        }
    }

    /// Days not charged to the employee (`total - deducted`), for day units.
    #[must_use]
    pub fn savings(&self) -> Option<f64> {
        match self.unit {
            DeductionUnit::Days => Some(f64::from(self.total_requested_days) - self.deducted_amount),
            DeductionUnit::Hours => None,
        }
    }

    /// Checks the guarantees every valid result must hold.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvariantViolation` naming the broken guarantee.
    pub fn check_invariants(&self) -> Result<(), CoreError> {
        let total: u32 = self.total_requested_days;

        if self.breakdown.bucket_total() != total {
            return Err(CoreError::InvariantViolation(format!(
                "le détail couvre {} jours pour {total} jours demandés",
                self.breakdown.bucket_total()
            )));
        }
        if self.deducted_amount < 0.0 || !self.deducted_amount.is_finite() {
            return Err(CoreError::InvariantViolation(format!(
                "montant décompté invalide ({})",
                self.deducted_amount
            )));
        }
        if self.unit == DeductionUnit::Days && self.deducted_amount > f64::from(total) {
            return Err(CoreError::InvariantViolation(format!(
                "{} jours décomptés pour {total} jours demandés",
                self.deducted_amount
            )));
        }

        Ok(())
    }
}

/// Renders an amount without trailing zeros for whole values.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    if amount.fract().abs() < 1e-9 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}
