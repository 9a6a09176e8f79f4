use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

/// Aggregate figures about the patrol database.
#[derive(Debug, Clone, Default)]
pub struct DbInfo {
    pub file_size: u64,
    pub checkpoints: i64,
    pub sites: i64,
    pub scans: i64,
    pub first_scan: Option<String>,
    pub last_scan: Option<String>,
}

pub fn collect_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<DbInfo> {
    let count = |sql: &str| -> rusqlite::Result<i64> { pool.conn.query_row(sql, [], |row| row.get(0)) };

    let first_scan = pool
        .conn
        .query_row("SELECT MIN(scan_time) FROM scan_logs", [], |row| {
            row.get::<_, Option<String>>(0)
        })
        .optional()?
        .flatten();
    let last_scan = pool
        .conn
        .query_row("SELECT MAX(scan_time) FROM scan_logs", [], |row| {
            row.get::<_, Option<String>>(0)
        })
        .optional()?
        .flatten();

    Ok(DbInfo {
        file_size: fs::metadata(db_path).map(|m| m.len()).unwrap_or(0),
        checkpoints: count("SELECT COUNT(*) FROM qr")?,
        sites: count("SELECT COUNT(DISTINCT factory_code) FROM qr")?,
        scans: count("SELECT COUNT(*) FROM scan_logs")?,
        first_scan,
        last_scan,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    let info = collect_db_info(pool, db_path)?;
    let file_mb = (info.file_size as f64) / (1024.0 * 1024.0);

    println!();
    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
    println!(
        "{}• Checkpoints:{} {}{}{} across {} site(s)",
        CYAN, RESET, GREEN, info.checkpoints, RESET, info.sites
    );
    println!("{}• Total scans:{} {}{}{}", CYAN, RESET, GREEN, info.scans, RESET);

    let placeholder = format!("{GREY}--{RESET}");
    println!("{}• Scan range:{}", CYAN, RESET);
    println!("    from: {}", info.first_scan.as_deref().unwrap_or(&placeholder));
    println!("    to:   {}", info.last_scan.as_deref().unwrap_or(&placeholder));
    println!();

    Ok(())
}
