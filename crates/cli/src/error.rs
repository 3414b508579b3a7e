// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use conges_domain::DomainError;
use thiserror::Error;

/// Errors that stop a CLI command.
///
/// Calculation problems are not errors: they are reported in the output
/// with an invalid status.
#[derive(Debug, Error)]
pub enum CliError {
    /// The batch input could not be opened.
    #[error("Lecture de {path} impossible : {source}")]
    Input {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing the output failed.
    #[error("Écriture de la sortie impossible : {0}")]
    Output(#[from] std::io::Error),

    /// The batch file is not usable CSV.
    #[error("Fichier CSV invalide : {reason}")]
    InvalidCsv { reason: String },

    /// The CSV reader or writer failed.
    #[error("Erreur CSV : {0}")]
    Csv(#[from] csv::Error),

    /// JSON rendering failed.
    #[error("Erreur JSON : {0}")]
    Json(#[from] serde_json::Error),

    /// A calendar could not be built.
    #[error("{0}")]
    Domain(#[from] DomainError),
}
