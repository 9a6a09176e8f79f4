// src/export/logic.rs

use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::{ensure_parent_dir, ensure_writable};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::models::report_row::ReportRow;
use crate::ui::messages::warning;
use crate::utils::path::absolute_output_path;
use std::path::PathBuf;

/// High-level report export.
pub struct ExportLogic;

impl ExportLogic {
    /// Write `rows` to `file` in the given format.
    ///
    /// - `file` must be absolute (a leading `~/` is expanded)
    /// - an existing file is overwritten only with `force` or after confirmation
    /// - an empty report still produces a file with headers only
    pub fn export_report(
        rows: &[ReportRow],
        format: ExportFormat,
        file: &str,
        force: bool,
        title: &str,
    ) -> AppResult<PathBuf> {
        let path = absolute_output_path(file)?;

        ensure_writable(&path, force)?;
        ensure_parent_dir(&path)?;

        if rows.is_empty() {
            warning("No report rows for the selected site/date; writing headers only.");
        }

        match format {
            ExportFormat::Csv => export_csv(rows, &path)?,
            ExportFormat::Json => export_json(rows, &path)?,
            ExportFormat::Xlsx => export_xlsx(rows, &path, title)?,
            ExportFormat::Pdf => export_pdf(rows, &path, title)?,
        }

        Ok(path)
    }
}

/// Title used by XLSX and PDF exports.
pub fn report_title(site_id: &str, report_date: &str) -> String {
    format!("Patrol report - site {} - {}", site_id, report_date)
}
