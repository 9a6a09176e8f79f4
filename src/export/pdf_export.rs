// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{REPORT_HEADERS, report_to_table};
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::models::report_row::ReportRow;
use crate::ui::messages::info;
use std::path::Path;

/// PDF export: paginated report table with a compliance line under the title.
pub(crate) fn export_pdf(rows: &[ReportRow], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let completed = rows.iter().filter(|r| r.status.is_success()).count();
    let subtitle = format!(
        "Completed rounds: {} / {}   Missed: {}",
        completed,
        rows.len(),
        rows.len() - completed
    );

    let table = report_to_table(rows);

    let mut pdf = PdfManager::new();
    pdf.write_table(title, &subtitle, &REPORT_HEADERS, &table);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path, rows.len());
    Ok(())
}
