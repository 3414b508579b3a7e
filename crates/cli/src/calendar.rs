// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Holiday calendar assembly for a requested period.

use conges_domain::{Holiday, HolidayCalendar, parse_iso_date};
use tracing::{debug, warn};

/// Years spanned before French holidays are no longer generated. Longer
/// requests are rejected by the calculators anyway.
const MAX_GENERATED_YEARS: i32 = 2;

/// Builds the calendar for a `start`..`end` request: French public holidays
/// for every year the period touches, then `extra` on top.
///
/// Unparseable dates produce a calendar of `extra` only; the calculators
/// report the date problem themselves.
pub fn calendar_for(start: &str, end: &str, extra: &[Holiday]) -> HolidayCalendar {
    let mut calendar: HolidayCalendar = HolidayCalendar::new();

    if let (Ok(start), Ok(end)) = (parse_iso_date(start), parse_iso_date(end)) {
        let first: i32 = start.year().min(end.year());
        let last: i32 = start.year().max(end.year());

        if last - first < MAX_GENERATED_YEARS {
            match HolidayCalendar::french_for_years(first..=last) {
                Ok(french) => calendar.extend(french),
                Err(err) => warn!(error = %err, "French public holidays unavailable"),
            }
        }
    }

    for holiday in extra {
        calendar.insert(holiday.date, holiday.name.clone());
    }
    debug!(holidays = calendar.len(), "holiday calendar assembled");

    calendar
}
