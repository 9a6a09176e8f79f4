use crate::cli::parser::{Commands, ScanAction};
use crate::config::Config;
use crate::core::schedule::{parse_report_date, slot_for_round};
use crate::core::store::ScanWindow;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{ScanQuery, create_scan, delete_scan, get_checkpoint, list_scans};
use crate::errors::{AppError, AppResult};
use crate::models::round::SLOT_FORMAT;
use crate::models::scan_event::{NewScanEvent, ScanEvent};
use crate::ui::messages::{success, warning};
use crate::utils::colors::colorize_optional;
use crate::utils::date::{clock, now_at_site, parse_scan_time, today};
use crate::utils::table::Table;
use chrono::NaiveDateTime;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Scan { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::open_existing(&cfg.database)?;

    match action {
        ScanAction::Add {
            qr,
            site,
            guard,
            slot,
            round,
            date,
            at,
            lat,
            location,
        } => {
            let cp = get_checkpoint(&pool.conn, *qr)?;

            if guard.trim().is_empty() {
                return Err(AppError::Other("guard name must not be empty".into()));
            }

            let round_slot_timestamp = match (slot, round) {
                (Some(s), _) => NaiveDateTime::parse_from_str(s, SLOT_FORMAT)
                    .map_err(|_| AppError::InvalidTimestamp(s.clone()))?,
                (None, Some(n)) => {
                    let day = match date {
                        Some(d) => parse_report_date(d)?,
                        None => today(),
                    };
                    slot_for_round(day, *n)?.slot_datetime
                }
                (None, None) => {
                    return Err(AppError::Other(
                        "a round slot is required: pass --slot or --round".into(),
                    ));
                }
            };

            let scan_timestamp = match at {
                Some(s) => parse_scan_time(s).ok_or_else(|| AppError::InvalidTimestamp(s.clone()))?,
                None => now_at_site(),
            };

            let new = NewScanEvent {
                checkpoint_id: cp.checkpoint_id,
                site_id: site.clone().unwrap_or_else(|| cp.site_id.clone()),
                scan_timestamp,
                round_slot_timestamp,
                latitude: *lat,
                location_label: location.clone(),
                guard_name: guard.clone(),
            };

            if new.site_id != cp.site_id {
                warning(format!(
                    "Checkpoint {} belongs to site {}, scan recorded for site {}",
                    cp.checkpoint_id, cp.site_id, new.site_id
                ));
            }

            let scan = create_scan(&pool.conn, &new)?;
            audit(
                &pool.conn,
                "scan_add",
                &scan.scan_id.to_string(),
                &format!(
                    "{} scanned '{}' for slot {}",
                    scan.guard_name,
                    cp.display_name,
                    scan.round_slot_timestamp.format(SLOT_FORMAT)
                ),
            );
            success(format!(
                "Scan {} recorded: '{}' by {} at {} (slot {})",
                scan.scan_id,
                cp.display_name,
                scan.guard_name,
                scan.scan_timestamp.to_rfc3339(),
                scan.round_slot_timestamp.format(SLOT_FORMAT)
            ));
        }

        ScanAction::List { site, guard, date } => {
            let window = match date {
                Some(d) => Some(ScanWindow::for_date(parse_report_date(d)?)),
                None => None,
            };
            let query = ScanQuery {
                site_id: site.clone(),
                guard_name: guard.clone(),
                window,
            };

            let scans = list_scans(&pool.conn, &query)?;
            if scans.is_empty() {
                warning("No scans found.");
                return Ok(());
            }
            println!("{}", scan_table(&scans));
        }

        ScanAction::Del { id } => {
            delete_scan(&pool.conn, *id)?;
            audit(&pool.conn, "scan_del", &id.to_string(), "Deleted scan");
            success(format!("Scan {} deleted", id));
        }
    }

    Ok(())
}

fn scan_table(scans: &[ScanEvent]) -> String {
    let mut table = Table::new(&["ID", "QR", "Site", "Date", "Time", "Slot", "Guard", "Location"]);
    for s in scans {
        table.add_row(vec![
            s.scan_id.to_string(),
            s.checkpoint_id.to_string(),
            s.site_id.clone(),
            s.scan_timestamp.format("%Y-%m-%d").to_string(),
            clock(&s.scan_timestamp),
            s.round_slot_timestamp.format(SLOT_FORMAT).to_string(),
            s.guard_name.clone(),
            colorize_optional(s.location_label.as_deref()),
        ]);
    }
    table.render()
}
