// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Static absence rule table.
//!
//! One rule per [`AbsenceCode`]. The mapping is an exhaustive `match`, so a
//! new code cannot be added without declaring how it is counted.

use crate::absence_code::AbsenceCode;
use crate::error::DomainError;
use serde::Serialize;

/// Hard ceiling on the length of any single absence period, in days.
pub const MAX_PERIOD_DAYS: u32 = 365;

/// Extra iterations tolerated past the period ceiling before the day walk
/// is abandoned.
pub const ITERATION_GUARD_MARGIN: u32 = 5;

/// Days of child-sickness leave granted per child and per year.
pub const CHILD_SICKNESS_DAYS_PER_CHILD: f64 = 3.0;

/// Monthly delegation credit for a CSE member, in hours.
pub const DELEGATION_MONTHLY_HOURS: f64 = 24.0;

/// How a date range is converted into a deducted amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeductionMethod {
    /// One day per Monday–Saturday day that is not a holiday.
    WorkingDays,
    /// One day per calendar day.
    CalendarDays,
    /// Daily hours per Monday–Friday day that is not a holiday.
    Hours,
    /// Nothing is deducted; the range is walked for reporting only.
    None,
}

impl DeductionMethod {
    /// Short French label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::WorkingDays => "jours ouvrables",
            Self::CalendarDays => "jours calendaires",
            Self::Hours => "heures",
            Self::None => "aucun décompte",
        }
    }
}

/// How an absence affects pay. Carried through for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PayrollImpact {
    /// Salary fully maintained.
    FullPay,
    /// Salary partially maintained by the employer.
    PartialPay,
    /// Daily allowances paid by social security.
    SocialSecurity,
    /// Not paid.
    Unpaid,
    /// Pay docked proportionally.
    Docked,
}

impl PayrollImpact {
    /// Human-readable description used in reports.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::FullPay => "Maintien intégral du salaire",
            Self::PartialPay => "Maintien partiel du salaire",
            Self::SocialSecurity => "Indemnités journalières de la Sécurité sociale",
            Self::Unpaid => "Absence non rémunérée",
            Self::Docked => "Retenue sur salaire",
        }
    }
}

/// Whom an annual limit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LimitScope {
    /// The limit is a flat amount per employee.
    PerEmployee,
    /// The limit is multiplied by the employee's number of children.
    PerChild,
}

/// Counting and capping rule for one absence code.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceTypeRule {
    /// The code this rule belongs to.
    pub code: AbsenceCode,
    /// Display name.
    pub display_name: &'static str,
    /// Legal citation, informational.
    pub legal_basis: &'static str,
    /// Counting method.
    pub deduction_method: DeductionMethod,
    /// Sundays are never deducted.
    pub exclude_sundays: bool,
    /// Holidays are never deducted.
    pub exclude_holidays: bool,
    /// Effect on pay.
    pub payroll_impact: PayrollImpact,
    /// Yearly cap, in the rule's unit.
    pub annual_limit: Option<f64>,
    /// Monthly cap, in the rule's unit.
    pub monthly_limit: Option<f64>,
    /// Scope of `annual_limit`.
    pub limit_scope: LimitScope,
    /// Longest period the calculator will walk for this code.
    pub max_days_per_period: u32,
    /// Periods longer than this get a validation warning.
    pub usual_days_per_period: u32,
}

impl AbsenceTypeRule {
    /// Iteration guard for this rule's day walk.
    #[must_use]
    pub const fn iteration_guard(&self) -> u32 {
        self.max_days_per_period + ITERATION_GUARD_MARGIN
    }

    /// Whether this rule is expressed in hours rather than days.
    #[must_use]
    pub fn counts_hours(&self) -> bool {
        self.deduction_method == DeductionMethod::Hours
    }
}

/// Shorthand for the fields most rules share.
const fn rule(
    code: AbsenceCode,
    display_name: &'static str,
    legal_basis: &'static str,
    deduction_method: DeductionMethod,
    payroll_impact: PayrollImpact,
) -> AbsenceTypeRule {
    let excludes: bool = !matches!(deduction_method, DeductionMethod::CalendarDays);
    AbsenceTypeRule {
        code,
        display_name,
        legal_basis,
        deduction_method,
        exclude_sundays: excludes,
        exclude_holidays: excludes,
        payroll_impact,
        annual_limit: None,
        monthly_limit: None,
        limit_scope: LimitScope::PerEmployee,
        max_days_per_period: MAX_PERIOD_DAYS,
        usual_days_per_period: MAX_PERIOD_DAYS,
    }
}

impl AbsenceCode {
    /// Returns the rule governing this code.
    #[must_use]
    pub const fn rule(&self) -> AbsenceTypeRule {
        use DeductionMethod::{CalendarDays, Hours, None, WorkingDays};
        use PayrollImpact::{Docked, FullPay, PartialPay, SocialSecurity, Unpaid};

        let code: Self = *self;
        match code {
            Self::CongesPayes => AbsenceTypeRule {
                annual_limit: Some(30.0),
                usual_days_per_period: 31,
                ..rule(
                    code,
                    "Congés payés",
                    "Code du travail, art. L3141-1 et suivants",
                    WorkingDays,
                    FullPay,
                )
            },
            Self::Rtt => AbsenceTypeRule {
                max_days_per_period: 31,
                usual_days_per_period: 7,
                ..rule(
                    code,
                    "Réduction du temps de travail",
                    "Accord collectif d'entreprise, art. L3121-44",
                    WorkingDays,
                    FullPay,
                )
            },
            Self::Recuperation => AbsenceTypeRule {
                max_days_per_period: 31,
                usual_days_per_period: 5,
                ..rule(
                    code,
                    "Récupération",
                    "Code du travail, art. L3121-33",
                    Hours,
                    FullPay,
                )
            },
            Self::Maladie => AbsenceTypeRule {
                usual_days_per_period: 90,
                ..rule(
                    code,
                    "Arrêt maladie",
                    "Code de la sécurité sociale, art. L321-1",
                    CalendarDays,
                    SocialSecurity,
                )
            },
            Self::TempsPartielTherapeutique => AbsenceTypeRule {
                usual_days_per_period: 90,
                ..rule(
                    code,
                    "Temps partiel thérapeutique",
                    "Code de la sécurité sociale, art. L323-3",
                    CalendarDays,
                    PartialPay,
                )
            },
            Self::EnfantMalade => AbsenceTypeRule {
                annual_limit: Some(CHILD_SICKNESS_DAYS_PER_CHILD),
                limit_scope: LimitScope::PerChild,
                max_days_per_period: 31,
                usual_days_per_period: 5,
                ..rule(
                    code,
                    "Congé enfant malade",
                    "Code du travail, art. L1225-61",
                    WorkingDays,
                    Unpaid,
                )
            },
            Self::AccidentTravail => AbsenceTypeRule {
                usual_days_per_period: 90,
                ..rule(
                    code,
                    "Accident du travail",
                    "Code de la sécurité sociale, art. L411-1",
                    CalendarDays,
                    SocialSecurity,
                )
            },
            Self::Maternite => AbsenceTypeRule {
                usual_days_per_period: 182,
                ..rule(
                    code,
                    "Congé maternité",
                    "Code du travail, art. L1225-17",
                    CalendarDays,
                    SocialSecurity,
                )
            },
            Self::Paternite => AbsenceTypeRule {
                annual_limit: Some(25.0),
                max_days_per_period: 60,
                usual_days_per_period: 25,
                ..rule(
                    code,
                    "Congé paternité et d'accueil de l'enfant",
                    "Code du travail, art. L1225-35",
                    CalendarDays,
                    SocialSecurity,
                )
            },
            Self::Delegation => AbsenceTypeRule {
                monthly_limit: Some(DELEGATION_MONTHLY_HOURS),
                max_days_per_period: 31,
                usual_days_per_period: 5,
                ..rule(
                    code,
                    "Heures de délégation CSE",
                    "Code du travail, art. L2315-7",
                    Hours,
                    FullPay,
                )
            },
            Self::SansSolde => AbsenceTypeRule {
                usual_days_per_period: 90,
                ..rule(
                    code,
                    "Congé sans solde",
                    "Accord de l'employeur",
                    CalendarDays,
                    Unpaid,
                )
            },
            Self::AbsenceInjustifiee => AbsenceTypeRule {
                usual_days_per_period: 3,
                ..rule(
                    code,
                    "Absence injustifiée",
                    "Code du travail, art. L1331-1",
                    CalendarDays,
                    Docked,
                )
            },
            Self::EvenementFamilial => AbsenceTypeRule {
                max_days_per_period: 31,
                usual_days_per_period: 7,
                ..rule(
                    code,
                    "Congé pour événement familial",
                    "Code du travail, art. L3142-1",
                    WorkingDays,
                    FullPay,
                )
            },
            Self::Formation => AbsenceTypeRule {
                usual_days_per_period: 31,
                ..rule(
                    code,
                    "Formation",
                    "Code du travail, art. L6321-2",
                    None,
                    FullPay,
                )
            },
            Self::Teletravail => rule(
                code,
                "Télétravail",
                "Code du travail, art. L1222-9",
                None,
                FullPay,
            ),
            Self::ReposCompensateur => AbsenceTypeRule {
                max_days_per_period: 31,
                usual_days_per_period: 5,
                ..rule(
                    code,
                    "Repos compensateur",
                    "Code du travail, art. L3121-30",
                    None,
                    FullPay,
                )
            },
        }
    }
}

/// Looks up the rule for a code as emitted by the UI.
///
/// # Errors
///
/// Returns `DomainError::UnknownAbsenceCode` if the code is not in the table.
pub fn find_rule(code: &str) -> Result<AbsenceTypeRule, DomainError> {
    let parsed: AbsenceCode = code.parse()?;
    Ok(parsed.rule())
}

/// Every rule in the table, in display order.
#[must_use]
pub fn all_rules() -> Vec<AbsenceTypeRule> {
    AbsenceCode::ALL.iter().map(AbsenceCode::rule).collect()
}
