// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Post-hoc checks of a deduction against legal ceilings.
//!
//! Validation is advisory: errors tell the caller a limit is breached, they
//! do not stop it from going ahead.

use crate::result::{DeductionResult, DeductionUnit, format_amount};
use conges_domain::{AbsenceCode, AbsenceTypeRule, LimitScope};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;
use tracing::debug;

/// Hours of an absence type already taken in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyUsage {
    /// Calendar year.
    pub year: i32,
    /// Month, 1 to 12.
    pub month: u8,
    /// Hours taken.
    pub hours: f64,
}

impl MonthlyUsage {
    /// Key of the month `date` falls in.
    #[must_use]
    pub fn month_of(date: Date) -> (i32, u8) {
        (date.year(), u8::from(date.month()))
    }
}

/// What is already known about the employee's consumption.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeContext {
    /// Amount of this absence type already taken this year, in the rule's unit.
    pub prior_days_this_year: f64,
    /// Hours of this absence type already taken in the month the request
    /// starts in.
    pub prior_hours_this_month: f64,
    /// Hours already taken per month. Added to `prior_hours_this_month` for
    /// the starting month.
    #[serde(default)]
    pub prior_hours_by_month: Vec<MonthlyUsage>,
    /// Number of dependent children.
    pub children_count: Option<u32>,
    /// Monthly credit replacing the rule's default, in hours.
    pub monthly_credit_hours: Option<f64>,
}

impl EmployeeContext {
    /// Hours already taken in `month`, where `first` marks the month the
    /// request starts in.
    fn prior_hours_in(&self, month: (i32, u8), first: bool) -> f64 {
        let recorded: f64 = self
            .prior_hours_by_month
            .iter()
            .filter(|usage| (usage.year, usage.month) == month)
            .map(|usage| usage.hours)
            .sum();
        if first {
            recorded + self.prior_hours_this_month
        } else {
            recorded
        }
    }

    /// Lists the counters that cannot be compared against a limit.
    fn counter_errors(&self) -> Vec<String> {
        let mut errors: Vec<String> = Vec::new();
        let mut check = |label: &str, value: f64| {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("Compteur salarié invalide : {label} = {value}"));
            }
        };

        check("jours déjà pris dans l'année", self.prior_days_this_year);
        check("heures déjà prises dans le mois", self.prior_hours_this_month);
        for usage in &self.prior_hours_by_month {
            check(
                &format!("heures déjà prises en {:02}/{}", usage.month, usage.year),
                usage.hours,
            );
        }
        if let Some(credit) = self.monthly_credit_hours
            && (!credit.is_finite() || credit <= 0.0)
        {
            errors.push(format!("Crédit mensuel invalide : {credit} heures"));
        }

        errors
    }
}

/// Verdict on a deduction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    /// True when `errors` is empty.
    pub is_valid: bool,
    /// Blocking findings.
    pub errors: Vec<String>,
    /// Informational findings.
    pub warnings: Vec<String>,
}

impl ValidationOutcome {
    fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Checks `result` against the legal limits of `absence_code`.
///
/// Never mutates `result`. Warnings already carried by the result are
/// repeated in the outcome's warnings.
///
/// # Arguments
///
/// * `absence_code` - The code the caller asked for
/// * `result` - The calculation to check
/// * `employee` - Prior consumption, needed for capped codes
#[must_use]
pub fn validate_deduction(
    absence_code: &str,
    result: &DeductionResult,
    employee: Option<&EmployeeContext>,
) -> ValidationOutcome {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = result.warnings.clone();

    let code: AbsenceCode = match absence_code.parse() {
        Ok(code) => code,
        Err(err) => {
            errors.push(err.to_string());
            return ValidationOutcome::from_findings(errors, warnings);
        }
    };
    let rule: AbsenceTypeRule = code.rule();

    if result.absence_code != code.as_str() {
        errors.push(format!(
            "Résultat incohérent : calculé pour '{}', validé pour '{code}'",
            result.absence_code
        ));
    }
    if !result.is_valid {
        errors.push(String::from("Le calcul du décompte est invalide"));
        return ValidationOutcome::from_findings(errors, warnings);
    }
    if result.unit == DeductionUnit::Days
        && result.deducted_amount > f64::from(result.total_requested_days)
    {
        errors.push(format!(
            "Décompte supérieur à la période : {} pour {} jours demandés",
            format_amount(result.deducted_amount),
            result.total_requested_days
        ));
    }

    let counter_errors: Vec<String> = employee
        .map(EmployeeContext::counter_errors)
        .unwrap_or_default();
    if counter_errors.is_empty() {
        check_annual_limit(&rule, result, employee, &mut errors, &mut warnings);
        check_monthly_limit(&rule, result, employee, &mut errors, &mut warnings);
    } else {
        errors.extend(counter_errors);
    }

    if result.total_requested_days > rule.usual_days_per_period {
        warnings.push(format!(
            "Période inhabituellement longue pour {} : {} jours (habituellement au plus {})",
            rule.display_name, result.total_requested_days, rule.usual_days_per_period
        ));
    }

    let outcome: ValidationOutcome = ValidationOutcome::from_findings(errors, warnings);
    debug!(
        code = %code,
        is_valid = outcome.is_valid,
        errors = outcome.errors.len(),
        warnings = outcome.warnings.len(),
        "deduction validated"
    );
    outcome
}

fn check_annual_limit(
    rule: &AbsenceTypeRule,
    result: &DeductionResult,
    employee: Option<&EmployeeContext>,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    let Some(base_limit) = rule.annual_limit else {
        return;
    };
    let Some(employee) = employee else {
        warnings.push(format!(
            "Plafond annuel de {} {} non vérifié : historique du salarié non fourni",
            format_amount(base_limit),
            result.unit.label()
        ));
        return;
    };

    let limit: f64 = match rule.limit_scope {
        LimitScope::PerEmployee => base_limit,
        LimitScope::PerChild => match employee.children_count {
            Some(children) if children > 0 => base_limit * f64::from(children),
            _ => {
                errors.push(format!(
                    "{} : aucun enfant à charge déclaré",
                    rule.display_name
                ));
                return;
            }
        },
    };

    let consumed: f64 = employee.prior_days_this_year + result.deducted_amount;
    if consumed > limit {
        errors.push(format!(
            "Plafond annuel dépassé pour {} : {} déjà pris + {} demandés > {} {}",
            rule.display_name,
            format_amount(employee.prior_days_this_year),
            format_amount(result.deducted_amount),
            format_amount(limit),
            result.unit.label()
        ));
    }
}

fn check_monthly_limit(
    rule: &AbsenceTypeRule,
    result: &DeductionResult,
    employee: Option<&EmployeeContext>,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    let Some(default_limit) = rule.monthly_limit else {
        return;
    };
    let Some(employee) = employee else {
        warnings.push(format!(
            "Crédit mensuel de {} {} non vérifié : historique du salarié non fourni",
            format_amount(default_limit),
            result.unit.label()
        ));
        return;
    };

    let limit: f64 = employee.monthly_credit_hours.unwrap_or(default_limit);
    let first_month: Option<(i32, u8)> = result
        .period
        .map(|period| MonthlyUsage::month_of(period.start()));

    let mut requested_by_month: BTreeMap<(i32, u8), f64> = BTreeMap::new();
    for entry in result.breakdown.days.iter().filter(|entry| entry.deducted > 0.0) {
        *requested_by_month
            .entry(MonthlyUsage::month_of(entry.date))
            .or_default() += entry.deducted;
    }

    for (month, requested) in requested_by_month {
        let prior: f64 = employee.prior_hours_in(month, Some(month) == first_month);
        if prior + requested > limit {
            errors.push(format!(
                "Crédit mensuel dépassé pour {} ({:02}/{}) : {} déjà pris + {} demandés > {} {}",
                rule.display_name,
                month.1,
                month.0,
                format_amount(prior),
                format_amount(requested),
                format_amount(limit),
                result.unit.label()
            ));
        }
    }
}
