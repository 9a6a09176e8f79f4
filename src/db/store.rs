//! SQLite-backed [`RecordStore`].

use crate::core::store::{CheckpointFilter, RecordStore, ScanEventFilter};
use crate::db::queries::{self, ScanQuery};
use crate::errors::{AppError, AppResult};
use crate::models::checkpoint::Checkpoint;
use crate::models::scan_event::ScanEvent;
use rusqlite::Connection;

pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

fn query_failed(e: rusqlite::Error) -> AppError {
    AppError::StoreQueryFailed(e.to_string())
}

impl RecordStore for SqliteStore<'_> {
    fn list_checkpoints(&self, filter: &CheckpointFilter) -> AppResult<Vec<Checkpoint>> {
        queries::list_checkpoints(self.conn, Some(&filter.site_id)).map_err(query_failed)
    }

    fn list_scan_events(&self, filter: &ScanEventFilter) -> AppResult<Vec<ScanEvent>> {
        let query = ScanQuery {
            site_id: Some(filter.site_id.clone()),
            guard_name: None,
            window: Some(filter.window),
        };
        queries::list_scans(self.conn, &query).map_err(query_failed)
    }
}
