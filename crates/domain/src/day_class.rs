// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Single-day classification.

use crate::calendar::HolidayCalendar;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::{Date, Weekday};

/// What kind of day a calendar date is, for leave counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DayClass {
    /// Covered by sick leave: a requested annual-leave day given back.
    SickLeaveOverlap,
    /// A day listed in the holiday calendar.
    Holiday,
    /// A Sunday.
    Sunday,
    /// A Saturday, which is a working day (jour ouvrable).
    Saturday,
    /// Monday to Friday, not a holiday.
    OrdinaryWorkingDay,
}

impl DayClass {
    /// Monday through Saturday and not excluded by anything else.
    #[must_use]
    pub const fn is_working_day(&self) -> bool {
        matches!(self, Self::Saturday | Self::OrdinaryWorkingDay)
    }

    /// Short French label used in reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SickLeaveOverlap => "arrêt maladie (restitué)",
            Self::Holiday => "jour férié",
            Self::Sunday => "dimanche",
            Self::Saturday => "samedi (ouvrable)",
            Self::OrdinaryWorkingDay => "jour ouvrable",
        }
    }
}

/// Classifies one date.
///
/// Precedence is sick leave, then holiday, then Sunday, then Saturday or an
/// ordinary working day. A holiday falling inside sick leave is reported as
/// sick leave.
#[must_use]
pub fn classify_day(
    date: Date,
    holidays: &HolidayCalendar,
    sick_leave_dates: &BTreeSet<Date>,
) -> DayClass {
    if sick_leave_dates.contains(&date) {
        DayClass::SickLeaveOverlap
    } else if holidays.contains(date) {
        DayClass::Holiday
    } else {
        match date.weekday() {
            Weekday::Sunday => DayClass::Sunday,
            Weekday::Saturday => DayClass::Saturday,
            _ => DayClass::OrdinaryWorkingDay,
        }
    }
}
