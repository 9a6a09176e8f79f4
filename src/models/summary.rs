use serde::Serialize;

/// Compliance figures derived from one report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSummary {
    pub site_id: String,
    pub report_date: String,
    pub checkpoints: usize,
    pub total_expected_rounds: usize,
    pub completed_rounds: usize,
    pub missed_rounds: usize,
    pub compliance_percent: f64,
    pub scans_by_guard: Vec<GuardScanCount>,
    pub missed_by_checkpoint: Vec<CheckpointMisses>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardScanCount {
    pub guard_name: String,
    pub scan_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckpointMisses {
    pub checkpoint_name: String,
    pub missed_rounds: Vec<u32>,
}
