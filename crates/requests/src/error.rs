// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::request::{RequestId, RequestStatus};
use thiserror::Error;

/// Errors returned by the request store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No request has this identifier.
    #[error("Demande {0} introuvable")]
    NotFound(RequestId),

    /// The requested status change is not allowed.
    #[error("Transition impossible pour la demande {id} : {from} → {to}")]
    InvalidTransition {
        id: RequestId,
        from: RequestStatus,
        to: RequestStatus,
    },

    /// The draft names no employee.
    #[error("Le salarié concerné par la demande est obligatoire")]
    MissingEmployee,

    /// The deduction could not be computed.
    #[error("Demande refusée : {0}")]
    DeductionRejected(String),

    /// A thread panicked while holding the store lock.
    #[error("Registre des demandes indisponible : verrou empoisonné")]
    LockPoisoned,
}
