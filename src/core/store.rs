//! Record store boundary: the two reads the reconciler needs, and the fixed
//! local-day window scans are fetched by.

use crate::errors::AppResult;
use crate::models::checkpoint::Checkpoint;
use crate::models::scan_event::ScanEvent;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Civil offset of the deployment (+05:30). Fixed; never taken from a request.
pub const SITE_OFFSET: FixedOffset = match FixedOffset::east_opt(5 * 3600 + 30 * 60) {
    Some(o) => o,
    None => panic!("invalid site offset"),
};

const DAY_END: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 59) {
    Some(t) => t,
    None => panic!("invalid end of day"),
};

/// Attach the site offset to a wall-clock datetime.
pub fn at_site_offset(local: NaiveDateTime) -> DateTime<FixedOffset> {
    let utc = local - TimeDelta::seconds(i64::from(SITE_OFFSET.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, SITE_OFFSET)
}

/// Re-express any instant in the site offset.
pub fn to_site_time<Tz: chrono::TimeZone>(ts: &DateTime<Tz>) -> DateTime<FixedOffset> {
    ts.with_timezone(&SITE_OFFSET)
}

/// Inclusive `[D 00:00:00, D 23:59:59]` in the site offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl ScanWindow {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            start: at_site_offset(date.and_time(NaiveTime::MIN)),
            end: at_site_offset(date.and_time(DAY_END)),
        }
    }

    pub fn contains<Tz: chrono::TimeZone>(&self, ts: &DateTime<Tz>) -> bool {
        let ts = to_site_time(ts);
        self.start <= ts && ts <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointFilter {
    pub site_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEventFilter {
    pub site_id: String,
    pub window: ScanWindow,
}

/// Read side of the checkpoint/scan store.
///
/// Implementations return records in a stable store order; the reconciler
/// relies on it for row grouping and duplicate resolution.
pub trait RecordStore {
    fn list_checkpoints(&self, filter: &CheckpointFilter) -> AppResult<Vec<Checkpoint>>;

    fn list_scan_events(&self, filter: &ScanEventFilter) -> AppResult<Vec<ScanEvent>>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn list_checkpoints(&self, filter: &CheckpointFilter) -> AppResult<Vec<Checkpoint>> {
        (**self).list_checkpoints(filter)
    }

    fn list_scan_events(&self, filter: &ScanEventFilter) -> AppResult<Vec<ScanEvent>> {
        (**self).list_scan_events(filter)
    }
}
