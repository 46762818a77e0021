//! Spreadsheet row projection
//!
//! Pure projections of participation state into header + row form for the
//! export collaborator; the workbook writer itself lives outside the core.
//! Every cell derives from `has(tag)` and `cleared_round_count()` alone.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{CompanyView, ParticipationRecord, RoundTag, StudentView};

/// Cell value for a cleared round
pub const CLEARED: &str = "Cleared";
/// Cell value for an uncleared round
pub const NOT_CLEARED: &str = "Not Cleared";
/// Cell value for a student with no cleared rounds at a company
pub const NOT_APPLIED: &str = "Not Applied";

/// One exportable sheet: a header row plus data rows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SheetData {
    /// Sheet name
    pub name: String,
    /// Header row
    pub headers: Vec<String>,
    /// Data rows, one per student
    pub rows: Vec<Vec<String>>,
}

/// Project one company's associations into sheet rows.
///
/// Headers are `["Student Name", "Round 1" .. "Round N", "Selected"]`;
/// round cells read `"Cleared"`/`"Not Cleared"` and the selection cell
/// `"Yes"`/`"No"`.
pub fn company_sheet(view: &CompanyView) -> SheetData {
    let mut headers = Vec::with_capacity(view.total_rounds as usize + 2);
    headers.push("Student Name".to_string());
    for index in 0..view.total_rounds {
        headers.push(RoundTag::from_index(index).label());
    }
    headers.push("Selected".to_string());

    let rows = view
        .students
        .iter()
        .map(|student| {
            let record = ParticipationRecord::from_tags(student.rounds.iter().copied());
            let mut row = Vec::with_capacity(headers.len());
            row.push(student.student_name.clone());
            for index in 0..view.total_rounds {
                let cell = if record.has(RoundTag::from_index(index)) {
                    CLEARED
                } else {
                    NOT_CLEARED
                };
                row.push(cell.to_string());
            }
            row.push(if record.has(RoundTag::Selected) { "Yes" } else { "No" }.to_string());
            row
        })
        .collect();

    SheetData {
        name: "Company Details".to_string(),
        headers,
        rows,
    }
}

/// Company column order for the cohort sheet: first-encounter order across
/// the student list, deduplicated by name
pub fn company_columns(students: &[StudentView]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for student in students {
        for entry in &student.companies {
            if seen.insert(entry.company_name.clone()) {
                columns.push(entry.company_name.clone());
            }
        }
    }
    columns
}

/// Project the whole cohort into sheet rows, one column per company.
///
/// Cells carry the progress label from [`progress_label`].
pub fn cohort_sheet(students: &[StudentView]) -> SheetData {
    let columns = company_columns(students);
    let mut headers = Vec::with_capacity(columns.len() + 1);
    headers.push("Student Name".to_string());
    headers.extend(columns.iter().cloned());

    let rows = students
        .iter()
        .map(|student| {
            let mut row = Vec::with_capacity(headers.len());
            row.push(student.student_name.clone());
            for column in &columns {
                let label = student
                    .companies
                    .iter()
                    .find(|entry| &entry.company_name == column)
                    .map(|entry| {
                        progress_label(&ParticipationRecord::from_tags(entry.rounds.iter().copied()))
                    })
                    .unwrap_or_else(|| NOT_APPLIED.to_string());
                row.push(label);
            }
            row
        })
        .collect();

    SheetData {
        name: "Students".to_string(),
        headers,
        rows,
    }
}

/// Progress label for one record: `"{n} Rounds"` with an `" and Selected"`
/// suffix when the record holds an offer. Reads `"Not Applied"` whenever
/// no numbered round is cleared, selection notwithstanding.
pub fn progress_label(record: &ParticipationRecord) -> String {
    let cleared = record.cleared_round_count();
    if cleared == 0 {
        return NOT_APPLIED.to_string();
    }
    if record.has(RoundTag::Selected) {
        format!("{} Rounds and Selected", cleared)
    } else {
        format!("{} Rounds", cleared)
    }
}
