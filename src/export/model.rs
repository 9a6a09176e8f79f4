// src/export/model.rs

use crate::models::report_row::ReportRow;
use crate::utils::date::clock;

/// Column headers for the tabular formats (XLSX / PDF).
pub const REPORT_HEADERS: [&str; 7] = [
    "checkpoint",
    "round",
    "scan_time",
    "latitude",
    "location",
    "guard",
    "status",
];

fn row_to_cells(r: &ReportRow) -> Vec<String> {
    vec![
        r.checkpoint_name.clone(),
        r.round_number.to_string(),
        r.scan_timestamp.as_ref().map(clock).unwrap_or_default(),
        r.latitude.map(|l| format!("{l:.6}")).unwrap_or_default(),
        r.location_label.clone().unwrap_or_default(),
        r.guard_name.clone().unwrap_or_default(),
        r.status.as_str().to_string(),
    ]
}

/// Report rows as plain string cells, one vector per row.
pub fn report_to_table(rows: &[ReportRow]) -> Vec<Vec<String>> {
    rows.iter().map(row_to_cells).collect()
}
