// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use conges::{DeductionResult, ValidationOutcome};
use conges_domain::{AbsenceCode, DateRange};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the store on submission.
pub type RequestId = u64;

/// Lifecycle of a request.
///
/// ```text
/// Pending ─┬─> Approved ──> Cancelled
///          ├─> Rejected
///          └─> Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting a decision.
    Pending,
    /// Accepted; counts against the employee's balance.
    Approved,
    /// Refused.
    Rejected,
    /// Withdrawn.
    Cancelled,
}

impl RequestStatus {
    /// Whether a request in this status may move to `next`.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved | Self::Rejected | Self::Cancelled)
                | (Self::Approved, Self::Cancelled)
        )
    }

    /// Whether the request is finished.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled)
    }

    /// Returns the label shown to users.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "en attente",
            Self::Approved => "validée",
            Self::Rejected => "refusée",
            Self::Cancelled => "annulée",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a caller submits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceRequestDraft {
    /// Employee identifier.
    pub employee: String,
    /// Absence code as emitted by the UI.
    pub code: String,
    /// First day (`YYYY-MM-DD`).
    pub start: String,
    /// Last day (`YYYY-MM-DD`).
    pub end: String,
    /// Sick-leave days, only used for paid leave.
    #[serde(default)]
    pub sick_leave_dates: Vec<String>,
    /// Hours per working day for hours-based codes.
    #[serde(default)]
    pub daily_hours: Option<f64>,
    /// Dependent children, for per-child limits.
    #[serde(default)]
    pub children_count: Option<u32>,
}

/// A stored request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceRequest {
    /// Store-assigned identifier.
    pub id: RequestId,
    /// Employee identifier.
    pub employee: String,
    /// Parsed absence code.
    pub code: AbsenceCode,
    /// Requested period.
    pub period: DateRange,
    /// Current status.
    pub status: RequestStatus,
    /// Deduction computed on submission.
    pub deduction: DeductionResult,
    /// Limit checks against the employee's approved requests at submission.
    pub validation: ValidationOutcome,
}
