#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rp() -> Command {
    cargo_bin_cmd!("rpatrol")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rpatrol.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB and add a small patrol dataset for site F01 on 2024-06-01:
///
/// - checkpoint 1 "Gate-A": round 1 scanned by Raju, round 20 scanned by Raju
/// - checkpoint 2 "Gate-B": round 2 scanned by Sita
/// - checkpoint 3 "Dock" at site F02: no scans
pub fn init_db_with_data(db_path: &str) {
    rp().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (name, site) in [("Gate-A", "F01"), ("Gate-B", "F01"), ("Dock", "F02")] {
        rp().args(["--db", db_path, "qr", "add", "--name", name, "--site", site])
            .assert()
            .success();
    }

    add_scan(db_path, "1", "Raju", "1", "2024-06-01T09:05:00+05:30", Some("Main gate"));
    add_scan(db_path, "1", "Raju", "20", "2024-06-01T00:10:00+05:30", None);
    add_scan(db_path, "2", "Sita", "2", "2024-06-01T10:02:30+05:30", Some("Back gate"));
}

pub fn add_scan(db_path: &str, qr: &str, guard: &str, round: &str, at: &str, location: Option<&str>) {
    let mut args = vec![
        "--db", db_path, "scan", "add", "--qr", qr, "--guard", guard, "--round", round, "--date",
        "2024-06-01", "--at", at,
    ];
    if let Some(loc) = location {
        args.extend(["--location", loc]);
    }

    rp().args(&args).assert().success();
}
