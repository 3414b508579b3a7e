// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Holiday calendars, date ranges and ISO date handling.
//!
//! Calendars are plain input values: they are built by the caller for the
//! years it needs and handed to the calculators on each call.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, Month};

/// `YYYY-MM-DD`, the only date format accepted from callers.
const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Name given to holidays supplied without one.
pub const DEFAULT_HOLIDAY_NAME: &str = "Jour férié";

/// Parses an ISO `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is empty or is not a
/// valid calendar date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::DateParseError {
            date_string: value.to_string(),
            error: String::from("date manquante"),
        });
    }

    Date::parse(trimmed, ISO_DATE).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Serde adapter storing a `Date` as `YYYY-MM-DD`.
pub mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    /// Serializes a date as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(date)
    }

    /// Deserializes a `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Fails if the string is not a valid ISO date.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        super::parse_iso_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// An inclusive range of calendar dates with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day (inclusive).
    #[serde(with = "iso_date")]
    start: Date,
    /// Last day (inclusive).
    #[serde(with = "iso_date")]
    end: Date,
}

impl DateRange {
    /// Creates a new `DateRange`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvertedRange` if `end` precedes `start`.
    pub const fn new(start: Date, end: Date) -> Result<Self, DomainError> {
        if end.to_julian_day() < start.to_julian_day() {
            return Err(DomainError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses both ends from ISO strings.
    ///
    /// # Errors
    ///
    /// Returns an error if either date fails to parse or the range is inverted.
    pub fn parse(start: &str, end: &str) -> Result<Self, DomainError> {
        let start: Date = parse_iso_date(start)?;
        let end: Date = parse_iso_date(end)?;
        Self::new(start, end)
    }

    /// Returns the first day.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the last day.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Number of calendar days covered, both ends included.
    #[must_use]
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).whole_days() + 1
    }

    /// Whether `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterates every day of the range in order.
    pub fn days(&self) -> impl Iterator<Item = Date> + '_ {
        let end: Date = self.end;
        std::iter::successors(Some(self.start), move |day| {
            day.next_day().filter(|next| *next <= end)
        })
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} → {}", self.start, self.end)
        }
    }
}

/// A named holiday.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Holiday {
    /// The holiday date.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Display name.
    pub name: String,
}

/// A set of holidays keyed by date.
///
/// Serializes as a list of `{ "date", "name" }` objects in date order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Holiday>", into = "Vec<Holiday>")]
pub struct HolidayCalendar {
    holidays: BTreeMap<Date, String>,
}

impl HolidayCalendar {
    /// Creates an empty calendar.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            holidays: BTreeMap::new(),
        }
    }

    /// Builds a calendar from `(ISO date, name)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if any date fails to parse.
    pub fn from_entries<I, D, N>(entries: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (D, N)>,
        D: AsRef<str>,
        N: Into<String>,
    {
        let mut calendar: Self = Self::new();
        for (date, name) in entries {
            calendar.insert(parse_iso_date(date.as_ref())?, name);
        }
        Ok(calendar)
    }

    /// Builds a calendar from bare ISO dates, naming each one
    /// [`DEFAULT_HOLIDAY_NAME`].
    ///
    /// # Errors
    ///
    /// Returns an error if any date fails to parse.
    pub fn from_dates<I, D>(dates: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = D>,
        D: AsRef<str>,
    {
        Self::from_entries(dates.into_iter().map(|d| (d, DEFAULT_HOLIDAY_NAME)))
    }

    /// Builds the French public holiday calendar for every year of `years`.
    ///
    /// # Errors
    ///
    /// Returns an error if a year is outside the supported range.
    pub fn french_for_years(years: RangeInclusive<i32>) -> Result<Self, DomainError> {
        let mut calendar: Self = Self::new();
        for year in years {
            for holiday in french_public_holidays(year)? {
                calendar.insert(holiday.date, holiday.name);
            }
        }
        Ok(calendar)
    }

    /// Adds a holiday, replacing the name of an existing one on the same date.
    pub fn insert(&mut self, date: Date, name: impl Into<String>) {
        self.holidays.insert(date, name.into());
    }

    /// Merges another calendar into this one.
    pub fn extend(&mut self, other: Self) {
        self.holidays.extend(other.holidays);
    }

    /// Returns the holiday name for `date`, if it is a holiday.
    #[must_use]
    pub fn name_of(&self, date: Date) -> Option<&str> {
        self.holidays.get(&date).map(String::as_str)
    }

    /// Whether `date` is a holiday.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.holidays.contains_key(&date)
    }

    /// Number of holidays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Whether the calendar is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    /// Holidays in date order.
    pub fn iter(&self) -> impl Iterator<Item = Holiday> + '_ {
        self.holidays.iter().map(|(date, name)| Holiday {
            date: *date,
            name: name.clone(),
        })
    }
}

impl From<Vec<Holiday>> for HolidayCalendar {
    fn from(holidays: Vec<Holiday>) -> Self {
        let mut calendar: Self = Self::new();
        for holiday in holidays {
            calendar.insert(holiday.date, holiday.name);
        }
        calendar
    }
}

impl From<HolidayCalendar> for Vec<Holiday> {
    fn from(calendar: HolidayCalendar) -> Self {
        calendar.iter().collect()
    }
}

/// Easter Sunday for a Gregorian year (anonymous Gregorian computus).
///
/// # Errors
///
/// Returns `DomainError::InvalidYear` outside 1583..=9999.
pub fn easter_sunday(year: i32) -> Result<Date, DomainError> {
    if !(1583..=9999).contains(&year) {
        return Err(DomainError::InvalidYear(year));
    }

    let a: i32 = year % 19;
    let b: i32 = year / 100;
    let c: i32 = year % 100;
    let d: i32 = b / 4;
    let e: i32 = b % 4;
    let f: i32 = (b + 8) / 25;
    let g: i32 = (b - f + 1) / 3;
    let h: i32 = (19 * a + b - d - g + 15) % 30;
    let i: i32 = c / 4;
    let k: i32 = c % 4;
    let l: i32 = (32 + 2 * e + 2 * i - h - k) % 7;
    let m: i32 = (a + 11 * h + 22 * l) / 451;
    let month_number: i32 = (h + l - 7 * m + 114) / 31;
    let day: i32 = ((h + l - 7 * m + 114) % 31) + 1;

    let month: Month = u8::try_from(month_number)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .ok_or(DomainError::InvalidYear(year))?;
    let day: u8 = u8::try_from(day).map_err(|_| DomainError::InvalidYear(year))?;

    Date::from_calendar_date(year, month, day).map_err(|_| DomainError::InvalidYear(year))
}

/// The eleven metropolitan French public holidays for `year`, in date order.
///
/// # Errors
///
/// Returns `DomainError::InvalidYear` outside 1583..=9999.
pub fn french_public_holidays(year: i32) -> Result<Vec<Holiday>, DomainError> {
    let easter: Date = easter_sunday(year)?;

    let fixed = |month: Month, day: u8, name: &str| -> Result<Holiday, DomainError> {
        Date::from_calendar_date(year, month, day)
            .map(|date| Holiday {
                date,
                name: name.to_string(),
            })
            .map_err(|_| DomainError::InvalidYear(year))
    };
    let from_easter = |offset: i64, name: &str| -> Result<Holiday, DomainError> {
        easter
            .checked_add(Duration::days(offset))
            .map(|date| Holiday {
                date,
                name: name.to_string(),
            })
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("le calcul des fêtes mobiles {year}"),
            })
    };

    let mut holidays: Vec<Holiday> = vec![
        fixed(Month::January, 1, "Jour de l'an")?,
        from_easter(1, "Lundi de Pâques")?,
        fixed(Month::May, 1, "Fête du Travail")?,
        fixed(Month::May, 8, "Victoire 1945")?,
        from_easter(39, "Ascension")?,
        from_easter(50, "Lundi de Pentecôte")?,
        fixed(Month::July, 14, "Fête nationale")?,
        fixed(Month::August, 15, "Assomption")?,
        fixed(Month::November, 1, "Toussaint")?,
        fixed(Month::November, 11, "Armistice 1918")?,
        fixed(Month::December, 25, "Noël")?,
    ];
    holidays.sort_by_key(|holiday| holiday.date);

    Ok(holidays)
}
