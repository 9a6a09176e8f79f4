use crate::core::reconcile::build_report;
use crate::core::schedule::parse_report_date;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::report_row::{ReportResponse, ReportRow};
use crate::utils::colors::{RESET, color_for_status, colorize_optional};
use crate::utils::date::clock;
use crate::utils::table::Table;

pub struct ReportLogic;

impl ReportLogic {
    /// Build the report for `site_id` on `report_date` from the SQLite store at `db_path`.
    ///
    /// The date is validated before the store is opened; a store that cannot
    /// be opened fails the report the same way a failed query does.
    pub fn generate(db_path: &str, site_id: &str, report_date: &str) -> AppResult<Vec<ReportRow>> {
        let date = parse_report_date(report_date)?;
        let pool = DbPool::open_existing(db_path).map_err(AppError::report_generation)?;

        build_report(&pool.store(), site_id, date)
    }

    /// Caller-facing JSON: the row array, or `{"error": ...}`.
    pub fn to_json(response: &ReportResponse) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(response)?)
    }

    pub fn render_table(rows: &[ReportRow]) -> String {
        let mut table = Table::new(&[
            "Checkpoint",
            "Round",
            "Scan time",
            "Guard",
            "Location",
            "Status",
        ]);

        for r in rows {
            let scan_time = r.scan_timestamp.as_ref().map(clock);
            let color = color_for_status(r.status);

            table.add_row(vec![
                r.checkpoint_name.clone(),
                r.round_number.to_string(),
                colorize_optional(scan_time.as_deref()),
                colorize_optional(r.guard_name.as_deref()),
                colorize_optional(r.location_label.as_deref()),
                format!("{}{}{}", color, r.status.as_str(), RESET),
            ]);
        }

        table.render()
    }
}
