// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use conges_domain::HolidayCalendar;

/// A calendar with a single mid-week holiday on Wednesday 2025-10-15.
pub fn create_test_calendar() -> HolidayCalendar {
    HolidayCalendar::from_entries([("2025-10-15", "Fête locale")]).unwrap()
}

pub fn assert_amount(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub const NO_SICK_LEAVE: [&str; 0] = [];
