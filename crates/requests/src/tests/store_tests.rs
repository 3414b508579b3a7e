// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_draft, create_test_store};
use crate::{AbsenceRequest, AbsenceRequestDraft, RequestStatus, RequestStore, StoreError};
use conges::DeductionUnit;
use conges_domain::AbsenceCode;
use std::thread;

#[test]
fn test_submit_computes_paid_leave_with_sick_leave() {
    let store: RequestStore = create_test_store();
    let draft: AbsenceRequestDraft = AbsenceRequestDraft {
        sick_leave_dates: vec![String::from("2025-10-15")],
        ..create_test_draft("E042", "CP", "2025-10-13", "2025-10-17")
    };

    let request: AbsenceRequest = store.submit(&draft).unwrap();

    assert_eq!(request.id, 1);
    assert_eq!(request.employee, "E042");
    assert_eq!(request.code, AbsenceCode::CongesPayes);
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.deduction.breakdown.sick_leave_days, 1);
    assert!((request.deduction.deducted_amount - 4.0).abs() < f64::EPSILON);
    assert!(request.validation.is_valid);
}

#[test]
fn test_submit_uses_rule_for_other_codes() {
    let store: RequestStore = create_test_store();
    let draft: AbsenceRequestDraft = AbsenceRequestDraft {
        daily_hours: Some(8.0),
        ..create_test_draft("E042", "DEL", "2025-10-13", "2025-10-14")
    };

    let request: AbsenceRequest = store.submit(&draft).unwrap();

    assert_eq!(request.deduction.unit, DeductionUnit::Hours);
    assert!((request.deduction.deducted_amount - 16.0).abs() < f64::EPSILON);
}

#[test]
fn test_submit_rejects_unknown_code() {
    let store: RequestStore = create_test_store();
    let err: StoreError = store
        .submit(&create_test_draft("E042", "ZZZZ", "2025-10-13", "2025-10-17"))
        .unwrap_err();

    assert_eq!(
        err,
        StoreError::DeductionRejected(String::from("Code d'absence inconnu : 'ZZZZ'"))
    );
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_submit_rejects_inverted_range() {
    let store: RequestStore = create_test_store();
    let result = store.submit(&create_test_draft("E042", "RTT", "2025-10-17", "2025-10-13"));

    assert!(matches!(result, Err(StoreError::DeductionRejected(_))));
}

#[test]
fn test_submit_requires_employee() {
    let store: RequestStore = create_test_store();
    let err: StoreError = store
        .submit(&create_test_draft("  ", "CP", "2025-10-13", "2025-10-17"))
        .unwrap_err();

    assert_eq!(err, StoreError::MissingEmployee);
}

#[test]
fn test_status_transitions() {
    let store: RequestStore = create_test_store();
    let id = store
        .submit(&create_test_draft("E042", "RTT", "2025-10-13", "2025-10-13"))
        .unwrap()
        .id;

    assert_eq!(store.approve(id).unwrap().status, RequestStatus::Approved);
    assert_eq!(
        store.reject(id).unwrap_err(),
        StoreError::InvalidTransition {
            id,
            from: RequestStatus::Approved,
            to: RequestStatus::Rejected,
        }
    );
    assert_eq!(store.cancel(id).unwrap().status, RequestStatus::Cancelled);
    assert!(matches!(
        store.approve(id),
        Err(StoreError::InvalidTransition { .. })
    ));
    assert_eq!(store.get(id).unwrap().status, RequestStatus::Cancelled);
}

#[test]
fn test_unknown_request_is_not_found() {
    let store: RequestStore = create_test_store();

    assert_eq!(store.get(42).unwrap_err(), StoreError::NotFound(42));
    assert_eq!(store.approve(42).unwrap_err(), StoreError::NotFound(42));
}

#[test]
fn test_list_for_employee_filters() {
    let store: RequestStore = create_test_store();
    store
        .submit(&create_test_draft("E001", "RTT", "2025-10-13", "2025-10-13"))
        .unwrap();
    store
        .submit(&create_test_draft("E002", "RTT", "2025-10-14", "2025-10-14"))
        .unwrap();
    store
        .submit(&create_test_draft("E001", "MAL", "2025-10-20", "2025-10-22"))
        .unwrap();

    let mine: Vec<AbsenceRequest> = store.list_for_employee("E001").unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|r| r.employee == "E001"));
    assert_eq!(store.list().unwrap().len(), 3);
}

#[test]
fn test_only_approved_requests_count_towards_limits() {
    let store: RequestStore = create_test_store();
    let first: AbsenceRequest = store
        .submit(&create_test_draft("E042", "PAT", "2025-01-06", "2025-01-25"))
        .unwrap();
    assert!(first.validation.is_valid);

    let pending: AbsenceRequest = store
        .submit(&create_test_draft("E042", "PAT", "2025-03-03", "2025-03-08"))
        .unwrap();
    assert!(pending.validation.is_valid);

    store.approve(first.id).unwrap();
    let over: AbsenceRequest = store
        .submit(&create_test_draft("E042", "PAT", "2025-03-03", "2025-03-08"))
        .unwrap();
    assert!(!over.validation.is_valid);
    assert!(over.validation.errors[0].contains("20 déjà pris + 6 demandés > 25 jours"));

    let other_employee: AbsenceRequest = store
        .submit(&create_test_draft("E043", "PAT", "2025-03-03", "2025-03-08"))
        .unwrap();
    assert!(other_employee.validation.is_valid);
}

#[test]
fn test_delegation_usage_is_split_by_month() {
    let store: RequestStore = create_test_store();
    let spanning: AbsenceRequest = store
        .submit(&create_test_draft("E042", "DEL", "2025-01-29", "2025-02-03"))
        .unwrap();
    assert!(spanning.validation.is_valid);
    assert!((spanning.deduction.deducted_amount - 28.0).abs() < f64::EPSILON);
    store.approve(spanning.id).unwrap();

    let january: AbsenceRequest = store
        .submit(&create_test_draft("E042", "DEL", "2025-01-27", "2025-01-27"))
        .unwrap();
    assert!(!january.validation.is_valid);
    assert!(
        january.validation.errors[0].contains("(01/2025) : 21 déjà pris + 7 demandés > 24 heures")
    );

    let february: AbsenceRequest = store
        .submit(&create_test_draft("E042", "DEL", "2025-02-04", "2025-02-05"))
        .unwrap();
    assert!(february.validation.is_valid);

    let over: AbsenceRequest = store
        .submit(&create_test_draft("E042", "DEL", "2025-02-04", "2025-02-06"))
        .unwrap();
    assert!(!over.validation.is_valid);
    assert!(over.validation.errors[0].contains("(02/2025) : 7 déjà pris + 21 demandés > 24 heures"));
}

#[test]
fn test_store_is_shared_across_threads() {
    let store: RequestStore = create_test_store();

    let handles: Vec<thread::JoinHandle<()>> = (0..4)
        .map(|n| {
            let store: RequestStore = store.clone();
            thread::spawn(move || {
                let employee: String = format!("E{n}");
                store
                    .submit(&create_test_draft(&employee, "RTT", "2025-10-13", "2025-10-14"))
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut ids: Vec<u64> = store.list().unwrap().iter().map(|r| r.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn test_status_can_transition_to() {
    use RequestStatus::{Approved, Cancelled, Pending, Rejected};

    assert!(Pending.can_transition_to(Approved));
    assert!(Pending.can_transition_to(Rejected));
    assert!(Pending.can_transition_to(Cancelled));
    assert!(Approved.can_transition_to(Cancelled));
    assert!(!Approved.can_transition_to(Pending));
    assert!(!Rejected.can_transition_to(Approved));
    assert!(!Cancelled.can_transition_to(Pending));
    assert!(Rejected.is_terminal());
    assert!(!Approved.is_terminal());
}
