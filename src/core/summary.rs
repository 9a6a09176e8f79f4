use crate::models::report_row::ReportRow;
use crate::models::summary::{CheckpointMisses, GuardScanCount, ReportSummary};
use std::collections::BTreeMap;

/// Aggregate a reconciled report into compliance figures.
pub fn summarize(site_id: &str, report_date: &str, rows: &[ReportRow]) -> ReportSummary {
    let total = rows.len();
    let completed = rows.iter().filter(|r| r.status.is_success()).count();

    let mut by_guard: BTreeMap<&str, usize> = BTreeMap::new();
    for guard in rows.iter().filter_map(|r| r.guard_name.as_deref()) {
        *by_guard.entry(guard).or_default() += 1;
    }

    // rows come grouped by checkpoint with ascending rounds; a new group starts
    // when the name changes or the round number stops increasing
    let mut missed_by_checkpoint: Vec<CheckpointMisses> = Vec::new();
    let mut checkpoints = 0;
    let mut last: Option<(&str, u32)> = None;

    for row in rows {
        let new_group = last.is_none_or(|(name, round)| {
            name != row.checkpoint_name || row.round_number <= round
        });
        last = Some((row.checkpoint_name.as_str(), row.round_number));

        if new_group {
            checkpoints += 1;
            missed_by_checkpoint.push(CheckpointMisses {
                checkpoint_name: row.checkpoint_name.clone(),
                missed_rounds: Vec::new(),
            });
        }

        if !row.status.is_success()
            && let Some(entry) = missed_by_checkpoint.last_mut()
        {
            entry.missed_rounds.push(row.round_number);
        }
    }
    missed_by_checkpoint.retain(|m| !m.missed_rounds.is_empty());

    let compliance_percent = if total == 0 {
        0.0
    } else {
        (completed as f64 * 10000.0 / total as f64).round() / 100.0
    };

    ReportSummary {
        site_id: site_id.to_string(),
        report_date: report_date.to_string(),
        checkpoints,
        total_expected_rounds: total,
        completed_rounds: completed,
        missed_rounds: total - completed,
        compliance_percent,
        scans_by_guard: by_guard
            .into_iter()
            .map(|(guard_name, scan_count)| GuardScanCount {
                guard_name: guard_name.to_string(),
                scan_count,
            })
            .collect(),
        missed_by_checkpoint,
    }
}
