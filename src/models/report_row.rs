use crate::errors::AppResult;
use crate::models::checkpoint::Checkpoint;
use crate::models::round::RoundSlot;
use crate::models::scan_event::ScanEvent;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanStatus {
    Success,
    Failed,
}

impl ScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Success => "SUCCESS",
            ScanStatus::Failed => "FAILED",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScanStatus::Success)
    }
}

/// One line of the compliance report: a checkpoint in a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub checkpoint_name: String,
    pub round_number: u32,
    pub scan_timestamp: Option<DateTime<FixedOffset>>,
    pub latitude: Option<f64>,
    pub location_label: Option<String>,
    pub guard_name: Option<String>,
    pub status: ScanStatus,
}

impl ReportRow {
    pub fn matched(checkpoint: &Checkpoint, slot: &RoundSlot, scan: &ScanEvent) -> Self {
        Self {
            checkpoint_name: checkpoint.display_name.clone(),
            round_number: slot.round_number,
            scan_timestamp: Some(scan.scan_timestamp),
            latitude: scan.latitude,
            location_label: scan.location_label.clone(),
            guard_name: Some(scan.guard_name.clone()),
            status: ScanStatus::Success,
        }
    }

    pub fn missed(checkpoint: &Checkpoint, slot: &RoundSlot) -> Self {
        Self {
            checkpoint_name: checkpoint.display_name.clone(),
            round_number: slot.round_number,
            scan_timestamp: None,
            latitude: None,
            location_label: None,
            guard_name: None,
            status: ScanStatus::Failed,
        }
    }
}

/// What a caller of the report boundary receives: the rows, or one error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportResponse {
    Rows(Vec<ReportRow>),
    Error { error: String },
}

impl ReportResponse {
    pub fn from_result(result: AppResult<Vec<ReportRow>>) -> Self {
        match result {
            Ok(rows) => ReportResponse::Rows(rows),
            Err(e) => ReportResponse::Error {
                error: e.to_string(),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ReportResponse::Error { .. })
    }
}
