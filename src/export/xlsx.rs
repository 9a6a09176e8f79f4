// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::{REPORT_HEADERS, report_to_table};
use crate::export::notify_export_success;
use crate::models::report_row::ReportRow;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const STATUS_COL: usize = 6;

/// XLSX export with a styled header, banded rows and auto-sized columns.
pub(crate) fn export_xlsx(rows: &[ReportRow], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Patrol report").map_err(to_export_error)?;

    let title_format = Format::new().set_bold().set_font_size(13);
    worksheet
        .write_with_format(0, 0, title, &title_format)
        .map_err(to_export_error)?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in REPORT_HEADERS.iter().enumerate() {
        worksheet
            .write_with_format(2, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }

    worksheet.set_freeze_panes(3, 0).ok();

    let mut col_widths: Vec<usize> = REPORT_HEADERS
        .iter()
        .map(|h| UnicodeWidthStr::width(*h))
        .collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, cells) in report_to_table(rows).iter().enumerate() {
        let row = (row_index + 3) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in cells.iter().enumerate() {
            let font = if col == STATUS_COL && value == "FAILED" {
                Color::RGB(0xC00000)
            } else {
                Color::RGB(0x000000)
            };
            write_xlsx_cell(worksheet, row, col as u16, value, band_color, font)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", path, rows.len());
    Ok(())
}

/// Write one cell, typing clock times and numbers when they parse.
fn write_xlsx_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    s: &str,
    bg: Color,
    font: Color,
) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_font_color(font)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if let Some((num_format, serial)) = parse_to_excel_date(s) {
        worksheet
            .write_with_format(row, col, serial, &base.set_num_format(num_format))
            .map_err(to_export_error)?;
        return Ok(());
    }

    if let Ok(num) = s.parse::<f64>() {
        worksheet
            .write_with_format(row, col, num, &base.set_align(FormatAlign::Right))
            .map_err(to_export_error)?;
        return Ok(());
    }

    worksheet
        .write_with_format(row, col, s, &base)
        .map_err(to_export_error)?;

    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
