use crate::cli::commands::resolve_site;
use crate::cli::parser::{Commands, ReportFormat};
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::core::summary::summarize;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::logic::{ExportLogic, report_title};
use crate::models::report_row::ReportResponse;
use crate::ui::messages::{header, warning};
use crate::utils::colors::{RESET, color_for_compliance};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Report {
        site,
        date,
        format,
        file,
        force,
    } = cmd
    else {
        return Ok(());
    };

    let site = resolve_site(site, cfg)?;

    match (format, file) {
        // default: table on the terminal
        (None | Some(ReportFormat::Table), None) => {
            let rows = ReportLogic::generate(&cfg.database, &site, date)?;

            header(format!("Patrol report: site {} on {}", site, date));
            if rows.is_empty() {
                warning("No checkpoints for this site.");
                return Ok(());
            }
            println!("{}", ReportLogic::render_table(&rows));

            let summary = summarize(&site, date, &rows);
            println!(
                "Completed {} / {} rounds ({}{:.2}%{})",
                summary.completed_rounds,
                summary.total_expected_rounds,
                color_for_compliance(summary.compliance_percent),
                summary.compliance_percent,
                RESET
            );
        }

        // the caller-facing payload: rows on success, {"error": ...} on failure
        (Some(ReportFormat::Json), None) => {
            match ReportLogic::generate(&cfg.database, &site, date) {
                Ok(rows) => {
                    println!("{}", ReportLogic::to_json(&ReportResponse::Rows(rows))?);
                }
                Err(e) => {
                    let response = ReportResponse::Error {
                        error: e.to_string(),
                    };
                    println!("{}", ReportLogic::to_json(&response)?);
                    return Err(e);
                }
            }
        }

        (Some(ReportFormat::Table), Some(_)) => {
            return Err(AppError::InvalidExportFormat(
                "table (use csv, json, xlsx or pdf with --file)".into(),
            ));
        }

        (Some(fmt), None) => {
            return Err(AppError::Export(format!(
                "--file is required for {} output",
                format_name(*fmt)
            )));
        }

        (fmt, Some(file)) => {
            let export_format = match fmt {
                Some(ReportFormat::Csv) => ExportFormat::Csv,
                Some(ReportFormat::Json) => ExportFormat::Json,
                Some(ReportFormat::Xlsx) => ExportFormat::Xlsx,
                Some(ReportFormat::Pdf) => ExportFormat::Pdf,
                Some(ReportFormat::Table) | None => cfg.default_export_format.parse()?,
            };

            let rows = ReportLogic::generate(&cfg.database, &site, date)?;
            let path = ExportLogic::export_report(
                &rows,
                export_format,
                file,
                *force,
                &report_title(&site, date),
            )?;

            let pool = DbPool::new(&cfg.database)?;
            audit(
                &pool.conn,
                "export",
                &path.to_string_lossy(),
                &format!(
                    "Exported {} report for site {} on {} ({} rows)",
                    export_format.as_str(),
                    site,
                    date,
                    rows.len()
                ),
            );
        }
    }

    Ok(())
}

fn format_name(fmt: ReportFormat) -> &'static str {
    match fmt {
        ReportFormat::Table => "table",
        ReportFormat::Json => "json",
        ReportFormat::Csv => "csv",
        ReportFormat::Xlsx => "xlsx",
        ReportFormat::Pdf => "pdf",
    }
}
