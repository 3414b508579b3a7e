// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while building or walking absence inputs.
///
/// Messages are user-facing (they end up in result warnings shown by the
/// UI), hence French.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// The range end date precedes its start date.
    InvertedRange {
        /// The start date.
        start: time::Date,
        /// The end date.
        end: time::Date,
    },
    /// The range spans more days than the applicable ceiling.
    PeriodTooLong {
        /// Number of calendar days requested.
        days: i64,
        /// The maximum number of days allowed.
        max: u32,
    },
    /// The day-walking loop hit its iteration guard.
    IterationGuardExhausted {
        /// The guard value that was reached.
        guard: u32,
    },
    /// The absence code does not resolve to any rule.
    UnknownAbsenceCode(String),
    /// The daily hours value for an hours-based absence is unusable.
    InvalidDailyHours(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// A year outside the supported range for holiday generation.
    InvalidYear(i32),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateParseError { date_string, error } => {
                write!(f, "Date invalide '{date_string}' : {error}")
            }
            Self::InvertedRange { start, end } => {
                write!(
                    f,
                    "Période invalide : la date de fin {end} précède la date de début {start}"
                )
            }
            Self::PeriodTooLong { days, max } => {
                write!(
                    f,
                    "Période trop longue : {days} jours demandés (maximum {max})"
                )
            }
            Self::IterationGuardExhausted { guard } => {
                write!(
                    f,
                    "Calcul interrompu : limite de sécurité de {guard} itérations atteinte"
                )
            }
            Self::UnknownAbsenceCode(code) => {
                write!(f, "Code d'absence inconnu : '{code}'")
            }
            Self::InvalidDailyHours(value) => {
                write!(f, "Nombre d'heures journalières invalide : {value}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Dépassement arithmétique sur les dates lors de {operation}")
            }
            Self::InvalidYear(year) => write!(f, "Année invalide : {year}"),
        }
    }
}

impl std::error::Error for DomainError {}
