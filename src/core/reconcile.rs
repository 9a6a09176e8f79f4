use crate::core::schedule::{IntoReportDate, slots_for_date};
use crate::core::store::{CheckpointFilter, RecordStore, ScanEventFilter, ScanWindow};
use crate::errors::{AppError, AppResult};
use crate::models::checkpoint::Checkpoint;
use crate::models::report_row::ReportRow;
use crate::models::round::RoundSlot;
use crate::models::scan_event::ScanEvent;
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Build the compliance report for one site and day.
///
/// Either every row is returned or a single error: fetch failures are wrapped
/// in [`AppError::ReportGeneration`] and nothing partial escapes.
pub fn build_report<S, D>(store: &S, site_id: &str, report_date: D) -> AppResult<Vec<ReportRow>>
where
    S: RecordStore + ?Sized,
    D: IntoReportDate,
{
    let date = report_date.into_report_date()?;
    let slots = slots_for_date(date);

    let checkpoints = store
        .list_checkpoints(&CheckpointFilter {
            site_id: site_id.to_string(),
        })
        .map_err(AppError::report_generation)?;

    let scans = store
        .list_scan_events(&ScanEventFilter {
            site_id: site_id.to_string(),
            window: ScanWindow::for_date(date),
        })
        .map_err(AppError::report_generation)?;

    log::debug!(
        "reconciling site={} date={}: {} checkpoints, {} scans",
        site_id,
        date,
        checkpoints.len(),
        scans.len()
    );

    Ok(reconcile(&checkpoints, &scans, &slots))
}

/// Join checkpoints × slots against scans on `(checkpoint_id, round_slot_timestamp)`.
///
/// Rows are grouped by checkpoint (input order) and follow `slots` order
/// within a group. When several scans share a key the first one wins.
pub fn reconcile(
    checkpoints: &[Checkpoint],
    scans: &[ScanEvent],
    slots: &[RoundSlot],
) -> Vec<ReportRow> {
    let mut index: HashMap<(i64, NaiveDateTime), &ScanEvent> = HashMap::with_capacity(scans.len());
    for scan in scans {
        index
            .entry((scan.checkpoint_id, scan.round_slot_timestamp))
            .or_insert(scan);
    }

    let mut report = Vec::with_capacity(checkpoints.len() * slots.len());

    for cp in checkpoints {
        for slot in slots {
            let row = match index.get(&(cp.checkpoint_id, slot.slot_datetime)) {
                Some(scan) => ReportRow::matched(cp, slot, scan),
                None => ReportRow::missed(cp, slot),
            };
            report.push(row);
        }
    }

    report
}
