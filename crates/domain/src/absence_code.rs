// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Every absence code the UI can emit.
///
/// The set is closed: a code that does not parse into one of these variants
/// is rejected, never mapped to a default. Each variant resolves to exactly
/// one rule through [`AbsenceCode::rule`](crate::AbsenceCode::rule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AbsenceCode {
    /// Congés payés (statutory paid leave).
    #[serde(rename = "CP")]
    CongesPayes,
    /// Réduction du temps de travail.
    #[serde(rename = "RTT")]
    Rtt,
    /// Récupération d'heures.
    #[serde(rename = "REC")]
    Recuperation,
    /// Arrêt maladie.
    #[serde(rename = "MAL")]
    Maladie,
    /// Temps partiel thérapeutique.
    #[serde(rename = "TPT")]
    TempsPartielTherapeutique,
    /// Congé enfant malade.
    #[serde(rename = "EM")]
    EnfantMalade,
    /// Accident du travail.
    #[serde(rename = "AT")]
    AccidentTravail,
    /// Congé maternité.
    #[serde(rename = "MAT")]
    Maternite,
    /// Congé paternité et d'accueil de l'enfant.
    #[serde(rename = "PAT")]
    Paternite,
    /// Heures de délégation CSE.
    #[serde(rename = "DEL")]
    Delegation,
    /// Congé sans solde.
    #[serde(rename = "CSS")]
    SansSolde,
    /// Absence injustifiée.
    #[serde(rename = "ABS")]
    AbsenceInjustifiee,
    /// Congé pour événement familial.
    #[serde(rename = "FAM")]
    EvenementFamilial,
    /// Formation.
    #[serde(rename = "FOR")]
    Formation,
    /// Télétravail.
    #[serde(rename = "TT")]
    Teletravail,
    /// Repos compensateur.
    #[serde(rename = "RC")]
    ReposCompensateur,
}

impl AbsenceCode {
    /// All codes, in display order.
    pub const ALL: [Self; 16] = [
        Self::CongesPayes,
        Self::Rtt,
        Self::Recuperation,
        Self::Maladie,
        Self::TempsPartielTherapeutique,
        Self::EnfantMalade,
        Self::AccidentTravail,
        Self::Maternite,
        Self::Paternite,
        Self::Delegation,
        Self::SansSolde,
        Self::AbsenceInjustifiee,
        Self::EvenementFamilial,
        Self::Formation,
        Self::Teletravail,
        Self::ReposCompensateur,
    ];

    /// Returns the short code emitted by the UI.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CongesPayes => "CP",
            Self::Rtt => "RTT",
            Self::Recuperation => "REC",
            Self::Maladie => "MAL",
            Self::TempsPartielTherapeutique => "TPT",
            Self::EnfantMalade => "EM",
            Self::AccidentTravail => "AT",
            Self::Maternite => "MAT",
            Self::Paternite => "PAT",
            Self::Delegation => "DEL",
            Self::SansSolde => "CSS",
            Self::AbsenceInjustifiee => "ABS",
            Self::EvenementFamilial => "FAM",
            Self::Formation => "FOR",
            Self::Teletravail => "TT",
            Self::ReposCompensateur => "RC",
        }
    }
}

impl FromStr for AbsenceCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownAbsenceCode(s.to_string()))
    }
}

impl std::fmt::Display for AbsenceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
