use crate::core::store::{ScanWindow, to_site_time};
use crate::errors::{AppError, AppResult};
use crate::models::checkpoint::{Checkpoint, CheckpointUpdate, DEFAULT_WAIT_MINUTES, NewCheckpoint};
use crate::models::round::SLOT_FORMAT;
use crate::models::scan_event::{NewScanEvent, ScanEvent};
use crate::utils::date::now_at_site;
use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params};

const CHECKPOINT_COLUMNS: &str = "qr_id, qr_name, factory_code, waiting_time";
const SCAN_COLUMNS: &str =
    "id, qr_id, factory_code, scan_time, round_slot, lat, location, guard_name";

/// Storage form of a scan instant: RFC 3339 at the site offset with nine
/// fractional digits. Every stored value shares one offset and width, so text
/// order is time order; window bounds are built with the same function.
pub fn scan_time_key(ts: &DateTime<FixedOffset>) -> String {
    to_site_time(ts).to_rfc3339_opts(SecondsFormat::Nanos, false)
}

fn conversion_failure(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(err))
}

pub fn map_checkpoint(row: &Row) -> Result<Checkpoint> {
    let wait: Option<i64> = row.get("waiting_time")?;
    let default_wait_minutes = match wait {
        None => DEFAULT_WAIT_MINUTES,
        Some(w) => u32::try_from(w).map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                Type::Integer,
                Box::new(AppError::Other(format!("Invalid waiting_time: {}", w))),
            )
        })?,
    };

    Ok(Checkpoint {
        checkpoint_id: row.get("qr_id")?,
        display_name: row.get("qr_name")?,
        site_id: row.get("factory_code")?,
        default_wait_minutes,
    })
}

pub fn map_scan(row: &Row) -> Result<ScanEvent> {
    let scan_time_str: String = row.get("scan_time")?;
    let slot_str: String = row.get("round_slot")?;

    let scan_timestamp = DateTime::parse_from_rfc3339(&scan_time_str)
        .map_err(|_| conversion_failure(3, AppError::InvalidTimestamp(scan_time_str.clone())))?;

    let round_slot_timestamp = NaiveDateTime::parse_from_str(&slot_str, SLOT_FORMAT)
        .map_err(|_| conversion_failure(4, AppError::InvalidTimestamp(slot_str.clone())))?;

    Ok(ScanEvent {
        scan_id: row.get("id")?,
        checkpoint_id: row.get("qr_id")?,
        site_id: row.get("factory_code")?,
        scan_timestamp,
        round_slot_timestamp,
        latitude: row.get("lat")?,
        location_label: row.get("location")?,
        guard_name: row.get("guard_name")?,
    })
}

// ---------------------------
// Checkpoints (qr)
// ---------------------------

pub fn create_checkpoint(conn: &Connection, cp: &NewCheckpoint) -> AppResult<Checkpoint> {
    conn.execute(
        "INSERT INTO qr (qr_name, factory_code, waiting_time, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            cp.display_name,
            cp.site_id,
            cp.default_wait_minutes,
            now_at_site().to_rfc3339(),
        ],
    )?;

    get_checkpoint(conn, conn.last_insert_rowid())
}

/// Checkpoints in store order (by id); all sites when `site_id` is `None`.
pub fn list_checkpoints(conn: &Connection, site_id: Option<&str>) -> Result<Vec<Checkpoint>> {
    let sql = match site_id {
        Some(_) => format!(
            "SELECT {CHECKPOINT_COLUMNS} FROM qr WHERE factory_code = ?1 ORDER BY qr_id ASC"
        ),
        None => format!("SELECT {CHECKPOINT_COLUMNS} FROM qr ORDER BY qr_id ASC"),
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = match site_id {
        Some(site) => stmt.query_map([site], map_checkpoint)?,
        None => stmt.query_map([], map_checkpoint)?,
    };

    rows.collect()
}

pub fn find_checkpoint(conn: &Connection, id: i64) -> Result<Option<Checkpoint>> {
    conn.query_row(
        &format!("SELECT {CHECKPOINT_COLUMNS} FROM qr WHERE qr_id = ?1"),
        [id],
        map_checkpoint,
    )
    .optional()
}

pub fn get_checkpoint(conn: &Connection, id: i64) -> AppResult<Checkpoint> {
    find_checkpoint(conn, id)?.ok_or_else(|| AppError::NotFound(format!("Checkpoint {}", id)))
}

pub fn update_checkpoint(
    conn: &Connection,
    id: i64,
    update: &CheckpointUpdate,
) -> AppResult<Checkpoint> {
    if update.is_empty() {
        return get_checkpoint(conn, id);
    }

    let wait = update.resolved_wait();
    let mut sets: Vec<&str> = Vec::new();
    let mut values: Vec<&dyn ToSql> = Vec::new();

    if let Some(name) = &update.display_name {
        sets.push("qr_name = ?");
        values.push(name);
    }
    if let Some(site) = &update.site_id {
        sets.push("factory_code = ?");
        values.push(site);
    }
    if let Some(w) = &wait {
        sets.push("waiting_time = ?");
        values.push(w);
    }
    values.push(&id);

    let sql = format!("UPDATE qr SET {} WHERE qr_id = ?", sets.join(", "));
    let changed = conn.execute(&sql, rusqlite::params_from_iter(values))?;

    if changed == 0 {
        return Err(AppError::NotFound(format!("Checkpoint {}", id)));
    }

    get_checkpoint(conn, id)
}

pub fn delete_checkpoint(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM qr WHERE qr_id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("Checkpoint {}", id)));
    }
    Ok(())
}

// ---------------------------
// Scan events (scan_logs)
// ---------------------------

pub fn create_scan(conn: &Connection, scan: &NewScanEvent) -> AppResult<ScanEvent> {
    conn.execute(
        "INSERT INTO scan_logs (qr_id, factory_code, scan_time, round_slot, lat, location, guard_name, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            scan.checkpoint_id,
            scan.site_id,
            scan_time_key(&scan.scan_timestamp),
            scan.round_slot_timestamp.format(SLOT_FORMAT).to_string(),
            scan.latitude,
            scan.location_label,
            scan.guard_name,
            now_at_site().to_rfc3339(),
        ],
    )?;

    let id = conn.last_insert_rowid();
    let scan = conn.query_row(
        &format!("SELECT {SCAN_COLUMNS} FROM scan_logs WHERE id = ?1"),
        [id],
        map_scan,
    )?;
    Ok(scan)
}

/// Filters for listing scans; unset fields do not restrict.
#[derive(Debug, Clone, Default)]
pub struct ScanQuery {
    pub site_id: Option<String>,
    pub guard_name: Option<String>,
    pub window: Option<ScanWindow>,
}

/// Scans in store order (by id).
pub fn list_scans(conn: &Connection, query: &ScanQuery) -> Result<Vec<ScanEvent>> {
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<String> = Vec::new();

    if let Some(site) = &query.site_id {
        clauses.push("factory_code = ?");
        values.push(site.clone());
    }
    if let Some(guard) = &query.guard_name {
        clauses.push("guard_name = ?");
        values.push(guard.clone());
    }
    if let Some(w) = &query.window {
        clauses.push("scan_time >= ?");
        values.push(scan_time_key(&w.start));
        clauses.push("scan_time <= ?");
        values.push(scan_time_key(&w.end));
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let sql = format!("SELECT {SCAN_COLUMNS} FROM scan_logs{where_sql} ORDER BY id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(values.iter()), map_scan)?;

    rows.collect()
}

pub fn delete_scan(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM scan_logs WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("Scan {}", id)));
    }
    Ok(())
}
