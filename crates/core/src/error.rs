// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use conges_domain::DomainError;

/// Errors that can occur inside a calculation.
///
/// These never cross the public calculator boundary: they are turned into
/// an invalid `DeductionResult` there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An input rule was violated.
    DomainViolation(DomainError),
    /// A computed result broke one of its own guarantees.
    InvariantViolation(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "{err}"),
            Self::InvariantViolation(msg) => write!(f, "Résultat incohérent : {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
