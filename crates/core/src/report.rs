// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Human-readable rendering of a deduction for HR staff.

use crate::result::{DayBreakdown, DeductionResult, format_amount};
use crate::validation::ValidationOutcome;
use std::fmt;

/// Renders a calculation and its validation as a French plain-text report.
///
/// Warnings and errors are reproduced verbatim, in order.
#[must_use]
pub fn format_report(result: &DeductionResult, validation: &ValidationOutcome) -> String {
    Report { result, validation }.to_string()
}

struct Report<'a> {
    result: &'a DeductionResult,
    validation: &'a ValidationOutcome,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result: &DeductionResult = self.result;

        if result.display_name.is_empty() {
            writeln!(f, "Absence : {}", result.absence_code)?;
        } else {
            writeln!(
                f,
                "Absence : {} - {}",
                result.absence_code, result.display_name
            )?;
        }
        if let Some(period) = &result.period {
            writeln!(f, "Période : {period}")?;
        }
        writeln!(f, "Jours demandés : {}", result.total_requested_days)?;
        writeln!(
            f,
            "Décompté : {} {}",
            format_amount(result.deducted_amount),
            result.unit.label()
        )?;
        if result.is_valid
            && let Some(savings) = result.savings()
        {
            writeln!(f, "Jours économisés : {}", format_amount(savings))?;
        }

        if !result.breakdown.days.is_empty() {
            write_breakdown(f, &result.breakdown)?;
        }

        if result.sub_periods.len() > 1 {
            writeln!(f, "Sous-périodes :")?;
            for period in &result.sub_periods {
                writeln!(f, "  • {period}")?;
            }
        }

        if !result.legal_basis.is_empty() {
            writeln!(f, "Base légale : {}", result.legal_basis)?;
        }
        if let Some(impact) = result.payroll_impact {
            writeln!(f, "Impact paie : {}", impact.description())?;
        }

        let valid: bool = result.is_valid && self.validation.is_valid;
        writeln!(f, "Statut : {}", if valid { "valide" } else { "invalide" })?;

        write_list(f, "Avertissements :", &self.validation.warnings)?;
        write_list(f, "Erreurs :", &self.validation.errors)
    }
}

fn write_breakdown(f: &mut fmt::Formatter<'_>, breakdown: &DayBreakdown) -> fmt::Result {
    writeln!(f, "Détail :")?;
    writeln!(
        f,
        "  Jours ouvrables : {} (dont samedis : {})",
        breakdown.working_days, breakdown.saturdays
    )?;
    writeln!(f, "  Dimanches : {}", breakdown.sundays)?;
    writeln!(f, "  Jours fériés : {}", breakdown.holidays)?;
    for (date, name) in breakdown.holiday_hits() {
        writeln!(f, "    • {date} {name}")?;
    }
    if breakdown.sick_leave_days > 0 {
        writeln!(
            f,
            "  Arrêt maladie restitué : {}",
            breakdown.sick_leave_days
        )?;
        for date in breakdown.restored_dates() {
            writeln!(f, "    • {date}")?;
        }
    }
    Ok(())
}

fn write_list(f: &mut fmt::Formatter<'_>, title: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "{title}")?;
    for item in items {
        writeln!(f, "  - {item}")?;
    }
    Ok(())
}
