// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV batch mode.
//!
//! Reads one absence request per row and writes one result row per request
//! row. A bad row produces an invalid result row; only an unusable file
//! stops the batch.

use crate::calendar::calendar_for;
use crate::error::CliError;
use conges::{
    AbsenceContext, DEFAULT_DAILY_HOURS, DeductionResult, ValidationOutcome,
    calculate_absence_deduction, calculate_annual_leave_deduction, format_amount,
    validate_deduction,
};
use conges_domain::{AbsenceCode, Holiday, HolidayCalendar};
use csv::StringRecord;
use serde::Serialize;
use std::collections::HashMap;
use std::io::{Read, Write};
use tracing::{debug, info};

/// Required CSV column headers (case-insensitive, normalized).
const REQUIRED_HEADERS: &[&str] = &["code", "start", "end"];

/// One output row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRow {
    /// The row number (1-based, excluding header).
    pub row: usize,
    pub code: String,
    pub start: String,
    pub end: String,
    pub requested_days: u32,
    pub deducted: String,
    pub unit: &'static str,
    pub valid: bool,
    /// Validation errors joined with `" | "`.
    pub errors: String,
    /// Calculation and validation warnings joined with `" | "`.
    pub warnings: String,
}

/// Totals of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub total_rows: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
}

/// Normalizes a CSV header string for case-insensitive, whitespace-tolerant matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Validates that all required headers are present in the CSV.
fn validate_headers(headers: &StringRecord) -> Result<HashMap<String, usize>, CliError> {
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| (normalize_header(header), idx))
        .collect();

    let missing: Vec<&str> = REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|required| !header_map.contains_key(*required))
        .collect();

    if !missing.is_empty() {
        return Err(CliError::InvalidCsv {
            reason: format!("colonnes obligatoires absentes : {}", missing.join(", ")),
        });
    }

    Ok(header_map)
}

/// Runs every row of `input` and writes result rows to `output`.
///
/// Recognised columns: `code`, `start`, `end` (required), `sick_dates`
/// (dates separated by `;` or spaces, paid leave only) and `daily_hours`.
///
/// # Errors
///
/// Returns an error if the headers are unreadable or incomplete, or the
/// output cannot be written.
pub fn run_batch<R: Read, W: Write>(
    input: R,
    output: W,
    extra_holidays: &[Holiday],
) -> Result<BatchSummary, CliError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let mut writer = csv::Writer::from_writer(output);

    let headers: StringRecord = reader.headers()?.clone();
    let header_map: HashMap<String, usize> = validate_headers(&headers)?;

    let mut summary: BatchSummary = BatchSummary::default();
    for (idx, record) in reader.records().enumerate() {
        let row_number: usize = idx + 1;
        let row: BatchRow = match record {
            Ok(record) => process_row(row_number, &record, &header_map, extra_holidays),
            Err(e) => unreadable_row(row_number, &e),
        };

        summary.total_rows += 1;
        if row.valid {
            summary.valid_count += 1;
        } else {
            summary.invalid_count += 1;
        }
        writer.serialize(&row)?;
    }
    writer.flush()?;

    info!(
        rows = summary.total_rows,
        valid = summary.valid_count,
        invalid = summary.invalid_count,
        "batch processed"
    );
    Ok(summary)
}

fn process_row(
    row_number: usize,
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    extra_holidays: &[Holiday],
) -> BatchRow {
    let get_field = |name: &str| -> String {
        header_map
            .get(name)
            .and_then(|&idx| record.get(idx))
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };

    let code: String = get_field("code");
    let start: String = get_field("start");
    let end: String = get_field("end");
    let sick_dates: Vec<String> = get_field("sick_dates")
        .split(|c: char| c == ';' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let mut notes: Vec<String> = Vec::new();
    let daily_hours: f64 = match get_field("daily_hours") {
        value if value.is_empty() => DEFAULT_DAILY_HOURS,
        value => value.replace(',', ".").parse().unwrap_or_else(|_| {
            notes.push(format!("Heures journalières illisibles : '{value}'"));
            f64::NAN
        }),
    };

    let holidays: HolidayCalendar = calendar_for(&start, &end, extra_holidays);
    let result: DeductionResult = if matches!(code.parse(), Ok(AbsenceCode::CongesPayes)) {
        calculate_annual_leave_deduction(&start, &end, &holidays, sick_dates.as_slice())
    } else {
        if !sick_dates.is_empty() {
            notes.push(String::from(
                "Dates d'arrêt maladie ignorées pour ce code d'absence",
            ));
        }
        calculate_absence_deduction(
            &code,
            &start,
            &end,
            &holidays,
            &AbsenceContext::with_daily_hours(daily_hours),
        )
    };
    let validation: ValidationOutcome = validate_deduction(&code, &result, None);
    debug!(row = row_number, code = %code, valid = validation.is_valid, "batch row computed");

    let mut warnings: Vec<String> = validation.warnings;
    warnings.extend(notes);

    BatchRow {
        row: row_number,
        code,
        start,
        end,
        requested_days: result.total_requested_days,
        deducted: format_amount(result.deducted_amount),
        unit: result.unit.label(),
        valid: result.is_valid && validation.is_valid,
        errors: validation.errors.join(" | "),
        warnings: warnings.join(" | "),
    }
}

fn unreadable_row(row_number: usize, err: &csv::Error) -> BatchRow {
    BatchRow {
        row: row_number,
        code: String::new(),
        start: String::new(),
        end: String::new(),
        requested_days: 0,
        deducted: format_amount(0.0),
        unit: "",
        valid: false,
        errors: format!("Ligne CSV illisible : {err}"),
        warnings: String::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn run(input: &str) -> (BatchSummary, Vec<Vec<String>>) {
        let mut output: Vec<u8> = Vec::new();
        let summary: BatchSummary = run_batch(input.as_bytes(), &mut output, &[]).unwrap();

        let mut reader = csv::Reader::from_reader(output.as_slice());
        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        (summary, rows)
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Sick Dates "), "sick_dates");
        assert_eq!(normalize_header("CODE"), "code");
    }

    #[test]
    fn test_missing_required_headers() {
        let mut output: Vec<u8> = Vec::new();
        let err: CliError = run_batch("code,start\nCP,2025-10-13\n".as_bytes(), &mut output, &[])
            .unwrap_err();

        assert!(matches!(err, CliError::InvalidCsv { reason } if reason.contains("end")));
    }

    #[test]
    fn test_one_result_row_per_request_row() {
        let (summary, rows) = run(
            "code,start,end,sick_dates\n\
             CP,2025-10-13,2025-10-17,2025-10-15\n\
             MAL,2025-10-13,2025-10-19,\n\
             DEL,2025-10-13,2025-10-14,\n",
        );

        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.valid_count, 3);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], "1");
        assert_eq!(rows[0][1], "CP");
        assert_eq!(rows[0][5], "4");
        assert_eq!(rows[1][5], "7");
        assert_eq!(rows[2][5], "14");
        assert_eq!(rows[2][6], "heures");
    }

    #[test]
    fn test_column_order_and_case_are_ignored() {
        let (summary, rows) = run("End,CODE,Start\n2025-10-19,RTT,2025-10-11\n");

        assert_eq!(summary.valid_count, 1);
        assert_eq!(rows[0][1], "RTT");
        assert_eq!(rows[0][4], "9");
        assert_eq!(rows[0][5], "7");
    }

    #[test]
    fn test_bad_rows_do_not_stop_the_batch() {
        let (summary, rows) = run(
            "code,start,end\n\
             ZZZZ,2025-10-13,2025-10-17\n\
             RTT,2025-10-17,2025-10-13\n\
             RTT,2025-10-13,2025-10-13\n",
        );

        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.invalid_count, 2);
        assert_eq!(rows[0][7], "false");
        assert!(rows[0][8].contains("Code d'absence inconnu"));
        assert_eq!(rows[1][7], "false");
        assert_eq!(rows[2][7], "true");
    }

    #[test]
    fn test_sick_dates_ignored_outside_paid_leave() {
        let (_, rows) = run("code,start,end,sick_dates\nRTT,2025-10-13,2025-10-17,2025-10-15\n");

        assert_eq!(rows[0][5], "5");
        assert!(rows[0][9].contains("Dates d'arrêt maladie ignorées"));
    }

    #[test]
    fn test_unreadable_daily_hours_invalidate_the_row() {
        let (summary, rows) = run("code,start,end,daily_hours\nDEL,2025-10-13,2025-10-13,beaucoup\n");

        assert_eq!(summary.invalid_count, 1);
        assert!(rows[0][9].contains("Heures journalières illisibles"));
    }
}
