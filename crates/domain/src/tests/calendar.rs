// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DEFAULT_HOLIDAY_NAME, DateRange, DomainError, Holiday, HolidayCalendar, easter_sunday,
    french_public_holidays, parse_iso_date,
};
use time::Date;
use time::macros::date;

#[test]
fn test_parse_iso_date_accepts_valid_date() {
    let parsed: Date = parse_iso_date("2025-10-11").unwrap();
    assert_eq!(parsed, date!(2025 - 10 - 11));
}

#[test]
fn test_parse_iso_date_trims_whitespace() {
    let parsed: Date = parse_iso_date("  2025-02-28 ").unwrap();
    assert_eq!(parsed, date!(2025 - 02 - 28));
}

#[test]
fn test_parse_iso_date_rejects_impossible_day() {
    let result: Result<Date, DomainError> = parse_iso_date("2025-02-30");
    assert!(matches!(result, Err(DomainError::DateParseError { .. })));
}

#[test]
fn test_parse_iso_date_rejects_empty_and_garbage() {
    assert!(matches!(
        parse_iso_date(""),
        Err(DomainError::DateParseError { .. })
    ));
    assert!(matches!(
        parse_iso_date("11/10/2025"),
        Err(DomainError::DateParseError { .. })
    ));
}

#[test]
fn test_date_range_rejects_inverted_range() {
    let result: Result<DateRange, DomainError> = DateRange::parse("2025-10-19", "2025-10-11");
    assert!(matches!(result, Err(DomainError::InvertedRange { .. })));
}

#[test]
fn test_date_range_day_count_is_inclusive() {
    let range: DateRange = DateRange::parse("2025-10-11", "2025-10-19").unwrap();
    assert_eq!(range.day_count(), 9);

    let single: DateRange = DateRange::parse("2025-10-11", "2025-10-11").unwrap();
    assert_eq!(single.day_count(), 1);
}

#[test]
fn test_date_range_days_iterates_each_day_once() {
    let range: DateRange = DateRange::new(date!(2024 - 02 - 27), date!(2024 - 03 - 02)).unwrap();
    let days: Vec<Date> = range.days().collect();

    assert_eq!(
        days,
        vec![
            date!(2024 - 02 - 27),
            date!(2024 - 02 - 28),
            date!(2024 - 02 - 29),
            date!(2024 - 03 - 01),
            date!(2024 - 03 - 02),
        ]
    );
    assert!(range.contains(date!(2024 - 02 - 29)));
    assert!(!range.contains(date!(2024 - 03 - 03)));
}

#[test]
fn test_date_range_display() {
    let range: DateRange = DateRange::parse("2025-10-11", "2025-10-19").unwrap();
    assert_eq!(range.to_string(), "2025-10-11 → 2025-10-19");

    let single: DateRange = DateRange::parse("2025-10-11", "2025-10-11").unwrap();
    assert_eq!(single.to_string(), "2025-10-11");
}

#[test]
fn test_holiday_calendar_from_entries_keeps_names() {
    let calendar: HolidayCalendar =
        HolidayCalendar::from_entries([("2025-10-15", "Fête locale")]).unwrap();

    assert_eq!(calendar.len(), 1);
    assert_eq!(calendar.name_of(date!(2025 - 10 - 15)), Some("Fête locale"));
    assert!(calendar.name_of(date!(2025 - 10 - 16)).is_none());
}

#[test]
fn test_holiday_calendar_from_dates_uses_default_name() {
    let calendar: HolidayCalendar =
        HolidayCalendar::from_dates(["2025-12-25", "2025-01-01"]).unwrap();

    assert_eq!(calendar.len(), 2);
    assert_eq!(
        calendar.name_of(date!(2025 - 12 - 25)),
        Some(DEFAULT_HOLIDAY_NAME)
    );
}

#[test]
fn test_holiday_calendar_rejects_bad_date() {
    let result: Result<HolidayCalendar, DomainError> =
        HolidayCalendar::from_dates(["2025-12-25", "not-a-date"]);
    assert!(result.is_err());
}

#[test]
fn test_holiday_calendar_serializes_as_sorted_list() {
    let calendar: HolidayCalendar = HolidayCalendar::from_entries([
        ("2025-12-25", "Noël"),
        ("2025-01-01", "Jour de l'an"),
    ])
    .unwrap();

    let json: String = serde_json::to_string(&calendar).unwrap();
    assert_eq!(
        json,
        r#"[{"date":"2025-01-01","name":"Jour de l'an"},{"date":"2025-12-25","name":"Noël"}]"#
    );

    let back: HolidayCalendar = serde_json::from_str(&json).unwrap();
    assert_eq!(back, calendar);
}

#[test]
fn test_easter_sunday_known_years() {
    assert_eq!(easter_sunday(2000).unwrap(), date!(2000 - 04 - 23));
    assert_eq!(easter_sunday(2019).unwrap(), date!(2019 - 04 - 21));
    assert_eq!(easter_sunday(2024).unwrap(), date!(2024 - 03 - 31));
    assert_eq!(easter_sunday(2025).unwrap(), date!(2025 - 04 - 20));
    assert_eq!(easter_sunday(2026).unwrap(), date!(2026 - 04 - 05));
}

#[test]
fn test_easter_sunday_rejects_pre_gregorian_year() {
    assert!(matches!(easter_sunday(1200), Err(DomainError::InvalidYear(1200))));
}

#[test]
fn test_french_public_holidays_2025() {
    let holidays: Vec<Holiday> = french_public_holidays(2025).unwrap();
    let dates: Vec<Date> = holidays.iter().map(|h| h.date).collect();

    assert_eq!(
        dates,
        vec![
            date!(2025 - 01 - 01),
            date!(2025 - 04 - 21),
            date!(2025 - 05 - 01),
            date!(2025 - 05 - 08),
            date!(2025 - 05 - 29),
            date!(2025 - 06 - 09),
            date!(2025 - 07 - 14),
            date!(2025 - 08 - 15),
            date!(2025 - 11 - 01),
            date!(2025 - 11 - 11),
            date!(2025 - 12 - 25),
        ]
    );
    assert_eq!(holidays[1].name, "Lundi de Pâques");
}

#[test]
fn test_french_public_holidays_2024_moveable_feasts() {
    let calendar: HolidayCalendar = HolidayCalendar::french_for_years(2024..=2024).unwrap();

    assert_eq!(calendar.name_of(date!(2024 - 04 - 01)), Some("Lundi de Pâques"));
    assert_eq!(calendar.name_of(date!(2024 - 05 - 09)), Some("Ascension"));
    assert_eq!(
        calendar.name_of(date!(2024 - 05 - 20)),
        Some("Lundi de Pentecôte")
    );
    assert_eq!(calendar.len(), 11);
}

#[test]
fn test_french_for_years_merges_years() {
    let calendar: HolidayCalendar = HolidayCalendar::french_for_years(2025..=2026).unwrap();

    assert_eq!(calendar.len(), 22);
    assert!(calendar.contains(date!(2025 - 12 - 25)));
    assert!(calendar.contains(date!(2026 - 01 - 01)));
    assert!(calendar.contains(date!(2026 - 04 - 06)));
}

#[test]
fn test_holiday_calendar_extend_overrides_names() {
    let mut calendar: HolidayCalendar = HolidayCalendar::french_for_years(2025..=2025).unwrap();
    let extra: HolidayCalendar =
        HolidayCalendar::from_entries([("2025-10-15", "Fête locale"), ("2025-12-25", "Noël")])
            .unwrap();

    calendar.extend(extra);

    assert_eq!(calendar.len(), 12);
    assert_eq!(calendar.name_of(date!(2025 - 10 - 15)), Some("Fête locale"));
}
