use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One recorded scan of a checkpoint by a guard.
///
/// `round_slot_timestamp` is the slot the scanner attributed the scan to at
/// capture time; reconciliation trusts it as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanEvent {
    #[serde(default, alias = "id")]
    pub scan_id: i64,
    #[serde(alias = "qr_id")]
    pub checkpoint_id: i64,
    #[serde(alias = "factory_code")]
    pub site_id: String,
    #[serde(alias = "scan_time")]
    pub scan_timestamp: DateTime<FixedOffset>,
    #[serde(alias = "round_slot")]
    pub round_slot_timestamp: NaiveDateTime,
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "location")]
    pub location_label: Option<String>,
    pub guard_name: String,
}

/// Scan payload before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewScanEvent {
    pub checkpoint_id: i64,
    pub site_id: String,
    pub scan_timestamp: DateTime<FixedOffset>,
    pub round_slot_timestamp: NaiveDateTime,
    pub latitude: Option<f64>,
    pub location_label: Option<String>,
    pub guard_name: String,
}
