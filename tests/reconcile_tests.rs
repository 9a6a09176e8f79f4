use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rpatrol::core::store::{CheckpointFilter, RecordStore, ScanEventFilter};
use rpatrol::core::{build_report, generate_round_slots, reconcile};
use rpatrol::errors::{AppError, AppResult};
use rpatrol::models::checkpoint::Checkpoint;
use rpatrol::models::report_row::{ReportResponse, ScanStatus};
use rpatrol::models::scan_event::ScanEvent;
use std::cell::Cell;

/// In-memory store honoring the same filters as the SQLite one.
#[derive(Default)]
struct MemoryStore {
    checkpoints: Vec<Checkpoint>,
    scans: Vec<ScanEvent>,
}

impl RecordStore for MemoryStore {
    fn list_checkpoints(&self, filter: &CheckpointFilter) -> AppResult<Vec<Checkpoint>> {
        Ok(self
            .checkpoints
            .iter()
            .filter(|c| c.site_id == filter.site_id)
            .cloned()
            .collect())
    }

    fn list_scan_events(&self, filter: &ScanEventFilter) -> AppResult<Vec<ScanEvent>> {
        Ok(self
            .scans
            .iter()
            .filter(|s| s.site_id == filter.site_id && filter.window.contains(&s.scan_timestamp))
            .cloned()
            .collect())
    }
}

/// Store whose scan query always fails, counting how often it was asked.
struct FailingStore {
    inner: MemoryStore,
    scan_calls: Cell<usize>,
}

impl RecordStore for FailingStore {
    fn list_checkpoints(&self, filter: &CheckpointFilter) -> AppResult<Vec<Checkpoint>> {
        self.inner.list_checkpoints(filter)
    }

    fn list_scan_events(&self, _filter: &ScanEventFilter) -> AppResult<Vec<ScanEvent>> {
        self.scan_calls.set(self.scan_calls.get() + 1);
        Err(AppError::StoreQueryFailed("connection reset".into()))
    }
}

fn checkpoint(id: i64, name: &str, site: &str) -> Checkpoint {
    Checkpoint {
        checkpoint_id: id,
        display_name: name.to_string(),
        site_id: site.to_string(),
        default_wait_minutes: 15,
    }
}

fn ts(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

fn slot(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
}

fn scan(id: i64, cp: i64, site: &str, at: &str, round_slot: &str, guard: &str) -> ScanEvent {
    ScanEvent {
        scan_id: id,
        checkpoint_id: cp,
        site_id: site.to_string(),
        scan_timestamp: ts(at),
        round_slot_timestamp: slot(round_slot),
        latitude: None,
        location_label: None,
        guard_name: guard.to_string(),
    }
}

fn gate_a_store() -> MemoryStore {
    let mut first = scan(
        1,
        1,
        "F01",
        "2024-06-01T09:05:00+05:30",
        "2024-06-01T09:00:00",
        "Raju",
    );
    first.latitude = Some(12.97);
    first.location_label = Some("Main gate".into());

    MemoryStore {
        checkpoints: vec![checkpoint(1, "Gate-A", "F01")],
        scans: vec![first],
    }
}

#[test]
fn test_single_scan_matches_round_one() {
    let rows = build_report(&gate_a_store(), "F01", "2024-06-01").unwrap();

    assert_eq!(rows.len(), 35);

    let r1 = &rows[0];
    assert_eq!(r1.checkpoint_name, "Gate-A");
    assert_eq!(r1.round_number, 1);
    assert_eq!(r1.status, ScanStatus::Success);
    assert_eq!(r1.guard_name.as_deref(), Some("Raju"));
    assert_eq!(r1.location_label.as_deref(), Some("Main gate"));
    assert_eq!(r1.latitude, Some(12.97));
    assert_eq!(r1.scan_timestamp, Some(ts("2024-06-01T09:05:00+05:30")));

    for row in &rows[1..] {
        assert_eq!(row.status, ScanStatus::Failed);
        assert!(row.scan_timestamp.is_none());
        assert!(row.guard_name.is_none());
        assert!(row.location_label.is_none());
        assert!(row.latitude.is_none());
    }
}

#[test]
fn test_rows_grouped_by_checkpoint_then_round() {
    let store = MemoryStore {
        checkpoints: vec![
            checkpoint(7, "North", "F01"),
            checkpoint(3, "South", "F01"),
            checkpoint(9, "Elsewhere", "F02"),
        ],
        scans: Vec::new(),
    };

    let rows = build_report(&store, "F01", "2024-06-01").unwrap();
    assert_eq!(rows.len(), 70);

    for (i, row) in rows.iter().enumerate() {
        let expected_name = if i < 35 { "North" } else { "South" };
        assert_eq!(row.checkpoint_name, expected_name);
        assert_eq!(row.round_number, (i % 35) as u32 + 1);
    }
}

#[test]
fn test_slot_must_match_to_the_second() {
    let mut store = gate_a_store();
    store.scans[0].round_slot_timestamp = slot("2024-06-01T09:00:01");

    let rows = build_report(&store, "F01", "2024-06-01").unwrap();
    assert!(rows.iter().all(|r| r.status == ScanStatus::Failed));
}

#[test]
fn test_first_scan_wins_on_duplicates() {
    let mut store = gate_a_store();
    store.scans.push(scan(
        2,
        1,
        "F01",
        "2024-06-01T09:40:00+05:30",
        "2024-06-01T09:00:00",
        "Mohan",
    ));

    let rows = build_report(&store, "F01", "2024-06-01").unwrap();
    assert_eq!(rows.len(), 35);
    assert_eq!(rows[0].guard_name.as_deref(), Some("Raju"));
    assert_eq!(rows[0].scan_timestamp, Some(ts("2024-06-01T09:05:00+05:30")));
}

#[test]
fn test_scan_outside_the_day_window_is_ignored() {
    let mut store = gate_a_store();
    // tagged for round 1 of the 1st but recorded the next day
    store.scans[0].scan_timestamp = ts("2024-06-02T09:05:00+05:30");

    let rows = build_report(&store, "F01", "2024-06-01").unwrap();
    assert!(rows.iter().all(|r| r.status == ScanStatus::Failed));
}

#[test]
fn test_window_uses_site_offset() {
    let mut store = gate_a_store();
    // 2024-06-01 00:10 at +05:30, expressed in UTC on the previous day
    store.scans[0].scan_timestamp = ts("2024-05-31T18:40:00Z");
    store.scans[0].round_slot_timestamp = slot("2024-06-01T00:00:00");

    let rows = build_report(&store, "F01", "2024-06-01").unwrap();
    let r20 = &rows[19];
    assert_eq!(r20.round_number, 20);
    assert_eq!(r20.status, ScanStatus::Success);
}

#[test]
fn test_scan_for_unknown_checkpoint_produces_no_row() {
    let mut store = gate_a_store();
    store.scans.push(scan(
        3,
        99,
        "F01",
        "2024-06-01T10:05:00+05:30",
        "2024-06-01T10:00:00",
        "Raju",
    ));

    let rows = build_report(&store, "F01", "2024-06-01").unwrap();
    assert_eq!(rows.len(), 35);
    assert_eq!(rows[1].status, ScanStatus::Failed);
}

#[test]
fn test_site_without_checkpoints_yields_empty_report() {
    let rows = build_report(&gate_a_store(), "NOPE", "2024-06-01").unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_invalid_date_fails_before_fetching() {
    let store = FailingStore {
        inner: gate_a_store(),
        scan_calls: Cell::new(0),
    };

    let err = build_report(&store, "F01", "01-06-2024").unwrap_err();
    assert!(matches!(err, AppError::InvalidDate(_)));
    assert_eq!(store.scan_calls.get(), 0);
}

#[test]
fn test_fetch_failure_yields_single_error() {
    let store = FailingStore {
        inner: gate_a_store(),
        scan_calls: Cell::new(0),
    };

    let result = build_report(&store, "F01", "2024-06-01");
    assert_eq!(store.scan_calls.get(), 1);

    match &result {
        Err(AppError::ReportGeneration(cause)) => {
            assert!(matches!(**cause, AppError::StoreQueryFailed(_)));
        }
        other => panic!("expected ReportGeneration, got {other:?}"),
    }

    let response = ReportResponse::from_result(result);
    assert!(response.is_error());

    let json = serde_json::to_value(&response).unwrap();
    let msg = json["error"].as_str().unwrap();
    assert!(msg.contains("connection reset"));
    assert!(json.as_object().unwrap().len() == 1);
}

#[test]
fn test_reconcile_is_pure_over_inputs() {
    let store = gate_a_store();
    let slots = generate_round_slots("2024-06-01").unwrap();

    let a = reconcile(&store.checkpoints, &store.scans, &slots);
    let b = reconcile(&store.checkpoints, &store.scans, &slots);
    assert_eq!(a, b);

    assert!(reconcile(&[], &store.scans, &slots).is_empty());
}

#[test]
fn test_rows_serialize_with_null_fields_and_uppercase_status() {
    let rows = build_report(&gate_a_store(), "F01", "2024-06-01").unwrap();
    let json = serde_json::to_value(ReportResponse::Rows(rows)).unwrap();

    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 35);
    assert_eq!(arr[0]["status"], "SUCCESS");
    assert_eq!(arr[0]["scan_timestamp"], "2024-06-01T09:05:00+05:30");
    assert_eq!(arr[1]["status"], "FAILED");
    assert!(arr[1]["scan_timestamp"].is_null());
    assert!(arr[1]["guard_name"].is_null());
}
