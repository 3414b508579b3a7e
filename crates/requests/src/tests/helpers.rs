// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AbsenceRequestDraft, RequestStore, StoreEvent, Subscription};
use conges_domain::HolidayCalendar;
use std::sync::{Arc, Mutex};

pub fn create_test_store() -> RequestStore {
    RequestStore::new(HolidayCalendar::french_for_years(2025..=2025).unwrap())
}

pub fn create_test_draft(employee: &str, code: &str, start: &str, end: &str) -> AbsenceRequestDraft {
    AbsenceRequestDraft {
        employee: employee.to_string(),
        code: code.to_string(),
        start: start.to_string(),
        end: end.to_string(),
        ..AbsenceRequestDraft::default()
    }
}

/// Subscribes a listener that records every event it sees.
pub fn record_events(store: &RequestStore) -> (Arc<Mutex<Vec<StoreEvent>>>, Subscription) {
    let seen: Arc<Mutex<Vec<StoreEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink: Arc<Mutex<Vec<StoreEvent>>> = Arc::clone(&seen);
    let subscription: Subscription = store.subscribe(move |event| {
        sink.lock().unwrap().push(event.clone());
    });
    (seen, subscription)
}
