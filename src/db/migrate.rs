use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// One schema step, recorded in `log` once applied.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250110_0001_create_qr",
        description: "Created qr table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS qr (
            qr_id         INTEGER PRIMARY KEY AUTOINCREMENT,
            qr_name       TEXT NOT NULL,
            factory_code  TEXT NOT NULL,
            waiting_time  INTEGER DEFAULT 15,
            created_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_qr_factory ON qr(factory_code);
        "#,
    },
    Migration {
        version: "20250110_0002_create_scan_logs",
        description: "Created scan_logs table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS scan_logs (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            qr_id         INTEGER NOT NULL,
            factory_code  TEXT NOT NULL,
            scan_time     TEXT NOT NULL,
            round_slot    TEXT NOT NULL,
            lat           REAL,
            location      TEXT,
            guard_name    TEXT NOT NULL,
            created_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_scan_logs_factory_time ON scan_logs(factory_code, scan_time);
        "#,
    },
    Migration {
        version: "20250204_0003_index_scan_slots",
        description: "Indexed scan_logs by checkpoint and round slot",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_scan_logs_qr_slot ON scan_logs(qr_id, round_slot);
        CREATE INDEX IF NOT EXISTS idx_scan_logs_guard ON scan_logs(guard_name);
        "#,
    },
    Migration {
        version: "20250318_0004_scan_time_nanos",
        description: "Stored scan_time with nanosecond precision",
        // YYYY-MM-DDTHH:MM:SS+HH:MM → YYYY-MM-DDTHH:MM:SS.000000000+HH:MM
        sql: r#"
        UPDATE scan_logs
           SET scan_time = substr(scan_time, 1, 19) || '.000000000' || substr(scan_time, 20)
         WHERE length(scan_time) = 25;
        "#,
    },
];

/// Ensure that the `log` table exists; migrations are tracked in it.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;
    tx.commit()
}

/// Versions already applied, oldest first.
pub fn applied_migrations(conn: &Connection) -> Result<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect()
}

/// Public entry point: run all pending migrations.
///
/// Returns how many steps were applied in this call.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        apply(conn, m).map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;
        success(format!("Migration applied: {} → {}", m.version, m.description));
        applied += 1;
    }

    Ok(applied)
}
