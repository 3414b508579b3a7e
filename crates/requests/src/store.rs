// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::StoreError;
use crate::events::{Listener, Listeners, StoreEvent, Subscription};
use crate::request::{AbsenceRequest, AbsenceRequestDraft, RequestId, RequestStatus};
use conges::{
    AbsenceContext, DeductionResult, EmployeeContext, MonthlyUsage, ValidationOutcome,
    calculate_absence_deduction, calculate_annual_leave_deduction, validate_deduction,
};
use conges_domain::{AbsenceCode, DateRange, HolidayCalendar};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

#[derive(Default)]
struct Requests {
    next_id: RequestId,
    by_id: BTreeMap<RequestId, AbsenceRequest>,
}

struct Inner {
    holidays: HolidayCalendar,
    requests: RwLock<Requests>,
    listeners: Listeners,
}

/// Shared, thread-safe store of absence requests.
///
/// Cloning the store yields another handle to the same requests.
#[derive(Clone)]
pub struct RequestStore {
    inner: Arc<Inner>,
}

impl RequestStore {
    /// Creates an empty store that computes deductions against `holidays`.
    #[must_use]
    pub fn new(holidays: HolidayCalendar) -> Self {
        Self {
            inner: Arc::new(Inner {
                holidays,
                requests: RwLock::new(Requests::default()),
                listeners: Listeners::default(),
            }),
        }
    }

    /// The holidays used for every calculation.
    #[must_use]
    pub fn holidays(&self) -> &HolidayCalendar {
        &self.inner.holidays
    }

    /// Registers a listener called after every change.
    ///
    /// The listener runs on the thread that made the change, after the store
    /// lock has been released.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(listener);
        self.inner.listeners.add(listener)
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.count()
    }

    /// Computes the deduction for `draft` and stores it as pending.
    ///
    /// Paid leave goes through the annual-leave calculator so sick-leave
    /// days are restored; every other code uses its rule. The result is
    /// validated against the employee's approved requests of the same code.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee is missing, the deduction could not
    /// be computed, or the store lock is poisoned.
    pub fn submit(&self, draft: &AbsenceRequestDraft) -> Result<AbsenceRequest, StoreError> {
        let employee: &str = draft.employee.trim();
        if employee.is_empty() {
            return Err(StoreError::MissingEmployee);
        }

        let deduction: DeductionResult = self.compute(draft);
        if !deduction.is_valid {
            let reason: String = deduction.warnings.join(" ; ");
            warn!(employee, code = %draft.code, %reason, "request rejected on submission");
            return Err(StoreError::DeductionRejected(reason));
        }
        let (Ok(code), Some(period)) = (draft.code.parse::<AbsenceCode>(), deduction.period)
        else {
            return Err(StoreError::DeductionRejected(String::from(
                "période ou code absent du calcul",
            )));
        };

        let request: AbsenceRequest = {
            let mut requests = self
                .inner
                .requests
                .write()
                .map_err(|_| StoreError::LockPoisoned)?;

            let context: EmployeeContext =
                approved_usage(&requests.by_id, employee, code, period, draft.children_count);
            let validation: ValidationOutcome =
                validate_deduction(code.as_str(), &deduction, Some(&context));

            requests.next_id += 1;
            let request: AbsenceRequest = AbsenceRequest {
                id: requests.next_id,
                employee: employee.to_string(),
                code,
                period,
                status: RequestStatus::Pending,
                deduction,
                validation,
            };
            requests.by_id.insert(request.id, request.clone());
            request
        };

        info!(
            id = request.id,
            employee = %request.employee,
            code = %request.code,
            period = %request.period,
            deducted = request.deduction.deducted_amount,
            "absence request submitted"
        );
        self.inner.listeners.notify(&StoreEvent::Submitted {
            id: request.id,
            employee: request.employee.clone(),
            code: request.code,
        });

        Ok(request)
    }

    /// Approves a pending request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not exist or is not pending.
    pub fn approve(&self, id: RequestId) -> Result<AbsenceRequest, StoreError> {
        self.transition(id, RequestStatus::Approved)
    }

    /// Rejects a pending request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not exist or is not pending.
    pub fn reject(&self, id: RequestId) -> Result<AbsenceRequest, StoreError> {
        self.transition(id, RequestStatus::Rejected)
    }

    /// Cancels a pending or approved request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not exist or is already closed.
    pub fn cancel(&self, id: RequestId) -> Result<AbsenceRequest, StoreError> {
        self.transition(id, RequestStatus::Cancelled)
    }

    /// Returns a copy of one request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not exist or the lock is poisoned.
    pub fn get(&self, id: RequestId) -> Result<AbsenceRequest, StoreError> {
        let requests = self
            .inner
            .requests
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        requests
            .by_id
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Returns every request in submission order.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn list(&self) -> Result<Vec<AbsenceRequest>, StoreError> {
        let requests = self
            .inner
            .requests
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(requests.by_id.values().cloned().collect())
    }

    /// Returns the requests of one employee in submission order.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn list_for_employee(&self, employee: &str) -> Result<Vec<AbsenceRequest>, StoreError> {
        let requests = self
            .inner
            .requests
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(requests
            .by_id
            .values()
            .filter(|request| request.employee == employee)
            .cloned()
            .collect())
    }

    fn compute(&self, draft: &AbsenceRequestDraft) -> DeductionResult {
        let holidays: &HolidayCalendar = &self.inner.holidays;

        if matches!(draft.code.parse(), Ok(AbsenceCode::CongesPayes)) {
            return calculate_annual_leave_deduction(
                &draft.start,
                &draft.end,
                holidays,
                draft.sick_leave_dates.as_slice(),
            );
        }

        if !draft.sick_leave_dates.is_empty() {
            warn!(code = %draft.code, "sick-leave dates ignored for this absence code");
        }
        let context: AbsenceContext = draft
            .daily_hours
            .map_or_else(AbsenceContext::default, AbsenceContext::with_daily_hours);
        calculate_absence_deduction(&draft.code, &draft.start, &draft.end, holidays, &context)
    }

    fn transition(&self, id: RequestId, to: RequestStatus) -> Result<AbsenceRequest, StoreError> {
        let (request, from) = {
            let mut requests = self
                .inner
                .requests
                .write()
                .map_err(|_| StoreError::LockPoisoned)?;
            let request: &mut AbsenceRequest = requests
                .by_id
                .get_mut(&id)
                .ok_or(StoreError::NotFound(id))?;

            let from: RequestStatus = request.status;
            if !from.can_transition_to(to) {
                return Err(StoreError::InvalidTransition { id, from, to });
            }
            request.status = to;
            (request.clone(), from)
        };

        info!(id, %from, %to, "absence request status changed");
        self.inner
            .listeners
            .notify(&StoreEvent::StatusChanged { id, from, to });

        Ok(request)
    }
}

/// Sums what the employee already has approved for `code`, day by day: the
/// year the request starts in for the annual limit, and each month the
/// request covers for the monthly limit.
fn approved_usage(
    requests: &BTreeMap<RequestId, AbsenceRequest>,
    employee: &str,
    code: AbsenceCode,
    period: DateRange,
    children_count: Option<u32>,
) -> EmployeeContext {
    let year: i32 = period.start().year();
    let first_month: (i32, u8) = MonthlyUsage::month_of(period.start());
    let last_month: (i32, u8) = MonthlyUsage::month_of(period.end());

    let mut prior_days_this_year: f64 = 0.0;
    let mut by_month: BTreeMap<(i32, u8), f64> = BTreeMap::new();

    let approved = requests.values().filter(|request| {
        request.employee == employee
            && request.code == code
            && request.status == RequestStatus::Approved
    });
    for request in approved {
        for entry in &request.deduction.breakdown.days {
            if entry.date.year() == year {
                prior_days_this_year += entry.deducted;
            }
            let month: (i32, u8) = MonthlyUsage::month_of(entry.date);
            if (first_month..=last_month).contains(&month) {
                *by_month.entry(month).or_default() += entry.deducted;
            }
        }
    }

    EmployeeContext {
        prior_days_this_year,
        prior_hours_by_month: by_month
            .into_iter()
            .map(|((year, month), hours)| MonthlyUsage { year, month, hours })
            .collect(),
        children_count,
        ..EmployeeContext::default()
    }
}
