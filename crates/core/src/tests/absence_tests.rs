// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{NO_SICK_LEAVE, assert_amount, create_test_calendar};
use crate::{
    AbsenceContext, CoreError, DEFAULT_DAILY_HOURS, DeductionResult, DeductionUnit,
    absence_deduction, calculate_absence_deduction, calculate_annual_leave_deduction,
};
use conges_domain::{AbsenceCode, DateRange, DomainError, HolidayCalendar, PayrollImpact};
use time::macros::date;

fn deduct(code: &str, start: &str, end: &str) -> DeductionResult {
    calculate_absence_deduction(
        code,
        start,
        end,
        &create_test_calendar(),
        &AbsenceContext::default(),
    )
}

#[test]
fn test_unknown_code_is_invalid_without_fallback() {
    let result: DeductionResult = deduct("ZZZZ", "2025-10-13", "2025-10-17");

    assert!(!result.is_valid);
    assert_eq!(result.absence_code, "ZZZZ");
    assert_amount(result.deducted_amount, 0.0);
    assert!(result.display_name.is_empty());
    assert_eq!(result.payroll_impact, None);
    assert_eq!(
        result.warnings,
        vec![String::from("Code d'absence inconnu : 'ZZZZ'")]
    );
}

#[test]
fn test_code_lookup_is_case_insensitive() {
    let result: DeductionResult = deduct("rtt", "2025-10-13", "2025-10-17");

    assert!(result.is_valid);
    assert_eq!(result.absence_code, "RTT");
}

#[test]
fn test_working_days_method_skips_sundays_and_holidays() {
    let result: DeductionResult = deduct("RTT", "2025-10-11", "2025-10-19");

    assert!(result.is_valid);
    assert_eq!(result.total_requested_days, 9);
    assert_amount(result.deducted_amount, 6.0);
    assert_eq!(result.unit, DeductionUnit::Days);
    assert_eq!(result.payroll_impact, Some(PayrollImpact::FullPay));
}

#[test]
fn test_calendar_days_method_counts_every_day() {
    let result: DeductionResult = deduct("MAL", "2025-10-11", "2025-10-19");

    assert!(result.is_valid);
    assert_amount(result.deducted_amount, 9.0);
    assert_eq!(result.breakdown.sundays, 2);
    assert_eq!(result.breakdown.holidays, 1);
    assert_eq!(result.payroll_impact, Some(PayrollImpact::SocialSecurity));
    assert_amount(result.savings().unwrap(), 0.0);
}

#[test]
fn test_none_method_deducts_nothing() {
    let result: DeductionResult = deduct("TT", "2025-10-13", "2025-10-17");

    assert!(result.is_valid);
    assert_eq!(result.total_requested_days, 5);
    assert_amount(result.deducted_amount, 0.0);
    assert_eq!(result.breakdown.bucket_total(), 5);
}

#[test]
fn test_hours_method_uses_daily_hours() {
    let result: DeductionResult = calculate_absence_deduction(
        "DEL",
        "2025-10-13",
        "2025-10-17",
        &HolidayCalendar::new(),
        &AbsenceContext::default(),
    );

    assert!(result.is_valid);
    assert_eq!(result.unit, DeductionUnit::Hours);
    assert_amount(result.deducted_amount, 5.0 * DEFAULT_DAILY_HOURS);
    assert_eq!(result.savings(), None);
}

#[test]
fn test_hours_method_skips_saturday_and_holiday() {
    let result: DeductionResult = deduct("REC", "2025-10-11", "2025-10-19");

    assert!(result.is_valid);
    assert_amount(result.deducted_amount, 4.0 * DEFAULT_DAILY_HOURS);
}

#[test]
fn test_hours_method_honours_context() {
    let result: DeductionResult = calculate_absence_deduction(
        "DEL",
        "2025-10-13",
        "2025-10-14",
        &HolidayCalendar::new(),
        &AbsenceContext::with_daily_hours(7.5),
    );

    assert_amount(result.deducted_amount, 15.0);
}

#[test]
fn test_unusable_daily_hours_are_rejected() {
    let result: DeductionResult = calculate_absence_deduction(
        "DEL",
        "2025-10-13",
        "2025-10-14",
        &HolidayCalendar::new(),
        &AbsenceContext::with_daily_hours(0.0),
    );

    assert!(!result.is_valid);
    assert_eq!(result.absence_code, "DEL");
    assert_eq!(result.unit, DeductionUnit::Hours);
    assert!(result.warnings[0].starts_with("Nombre d'heures journalières invalide"));
}

#[test]
fn test_daily_hours_ignored_for_day_based_codes() {
    let result: DeductionResult = calculate_absence_deduction(
        "RTT",
        "2025-10-13",
        "2025-10-14",
        &HolidayCalendar::new(),
        &AbsenceContext::with_daily_hours(0.0),
    );

    assert!(result.is_valid);
    assert_amount(result.deducted_amount, 2.0);
}

#[test]
fn test_rule_ceiling_rejects_long_periods() {
    let result: DeductionResult = deduct("RTT", "2025-01-01", "2025-02-28");

    assert!(!result.is_valid);
    assert_eq!(result.display_name, "Réduction du temps de travail");
    assert_eq!(
        result.warnings,
        vec![String::from(
            "Période trop longue : 59 jours demandés (maximum 31)"
        )]
    );
}

#[test]
fn test_inverted_range_is_invalid() {
    let result: DeductionResult = deduct("MAL", "2025-10-19", "2025-10-11");

    assert!(!result.is_valid);
    assert_amount(result.deducted_amount, 0.0);
}

#[test]
fn test_general_path_for_paid_leave_matches_without_sick_leave() {
    let holidays: HolidayCalendar = create_test_calendar();
    let general: DeductionResult = deduct("CP", "2025-10-11", "2025-10-19");
    let dedicated: DeductionResult =
        calculate_annual_leave_deduction("2025-10-11", "2025-10-19", &holidays, &NO_SICK_LEAVE);

    assert_amount(general.deducted_amount, dedicated.deducted_amount);
    assert_eq!(general.breakdown, dedicated.breakdown);
    assert_eq!(
        general.warnings,
        vec![String::from(
            "Calcul général : les jours d'arrêt maladie ne sont pas restitués"
        )]
    );
}

#[test]
fn test_every_code_produces_consistent_result() {
    for code in AbsenceCode::ALL {
        let result: DeductionResult = deduct(code.as_str(), "2025-10-11", "2025-10-19");

        assert!(result.is_valid, "{code} should be valid");
        assert_eq!(result.absence_code, code.as_str());
        assert_eq!(result.breakdown.bucket_total(), 9);
        assert!(result.check_invariants().is_ok());
    }
}

#[test]
fn test_typed_entry_point_rejects_guarded_period() {
    let range: DateRange = DateRange::new(date!(2025 - 01 - 01), date!(2025 - 03 - 31)).unwrap();
    let err: CoreError = absence_deduction(
        AbsenceCode::Paternite,
        range,
        &HolidayCalendar::new(),
        &AbsenceContext::default(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::PeriodTooLong { days: 90, max: 60 })
    );
}
