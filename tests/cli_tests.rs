use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use std::fs;

mod common;
use common::{init_db_with_data, rp, setup_test_db, temp_out};

fn report_json(db_path: &str, site: &str, date: &str) -> Value {
    let out = rp()
        .args(["--db", db_path, "report", "--site", site, "--date", date, "--format", "json"])
        .output()
        .expect("run report");
    serde_json::from_slice(&out.stdout).expect("stdout is JSON")
}

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    rp().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(fs::metadata(&db_path).is_ok());

    rp().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied").and(contains("init")));
}

#[test]
fn test_rounds_for_date_as_json() {
    let out = rp()
        .args(["rounds", "--date", "2024-06-01", "--json"])
        .output()
        .expect("run rounds");
    assert!(out.status.success());

    let slots: Value = serde_json::from_slice(&out.stdout).unwrap();
    let slots = slots.as_array().unwrap();
    assert_eq!(slots.len(), 35);
    assert_eq!(slots[0]["slot_datetime"], "2024-06-01T09:00:00");
    assert_eq!(slots[19]["slot_datetime"], "2024-06-01T00:00:00");
}

#[test]
fn test_rounds_definitions_as_json() {
    let out = rp().args(["rounds", "--json"]).output().expect("run rounds");
    assert!(out.status.success());

    let rounds: Value = serde_json::from_slice(&out.stdout).unwrap();
    let rounds = rounds.as_array().unwrap();
    assert_eq!(rounds.len(), 35);
    assert_eq!(rounds[0]["round_number"], 1);
    assert_eq!(rounds[0]["window_start"], "09:00:00");
    assert_eq!(rounds[18]["window_end"], "23:59:00");
    assert_eq!(rounds[34]["round_number"], 35);
}

#[cfg(unix)]
#[test]
fn test_relative_db_is_the_same_file_for_init_and_report() {
    let home = std::env::temp_dir().join("rpatrol_relative_db_home");
    fs::remove_dir_all(&home).ok();
    fs::create_dir_all(&home).unwrap();

    rp().env("HOME", &home)
        .args(["--db", "patrol.sqlite", "--test", "init"])
        .assert()
        .success();
    assert!(home.join(".rpatrol").join("patrol.sqlite").exists());

    rp().env("HOME", &home)
        .args(["--db", "patrol.sqlite", "qr", "add", "--name", "Gate-A", "--site", "F01"])
        .assert()
        .success();

    let out = rp()
        .env("HOME", &home)
        .args([
            "--db", "patrol.sqlite", "report", "--site", "F01", "--date", "2024-06-01", "--format",
            "json",
        ])
        .output()
        .expect("run report");
    assert!(out.status.success());

    let rows: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 35);
}

#[test]
fn test_rounds_table() {
    rp().args(["rounds"])
        .assert()
        .success()
        .stdout(contains("23:30").and(contains("23:59")));
}

#[test]
fn test_rounds_rejects_bad_date() {
    rp().args(["rounds", "--date", "01-06-2024"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_qr_add_list_update_del() {
    let db_path = setup_test_db("cli_qr_crud");
    init_db_with_data(&db_path);

    rp().args(["--db", &db_path, "qr", "list", "--site", "F01"])
        .assert()
        .success()
        .stdout(contains("Gate-A").and(contains("Gate-B")).and(contains("Dock").not()));

    rp().args(["--db", &db_path, "qr", "update", "--id", "3", "--name", "Loading Dock", "--wait", "30"])
        .assert()
        .success();

    rp().args(["--db", &db_path, "qr", "show", "--id", "3"])
        .assert()
        .success()
        .stdout(contains("Loading Dock").and(contains("30")));

    rp().args(["--db", &db_path, "qr", "del", "--id", "3", "--force"])
        .assert()
        .success();

    rp().args(["--db", &db_path, "qr", "show", "--id", "3"])
        .assert()
        .failure()
        .stderr(contains("Checkpoint 3 not found"));
}

#[test]
fn test_qr_import_from_json() {
    let db_path = setup_test_db("cli_qr_import");
    rp().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let file = temp_out("cli_qr_import", "json");
    fs::write(
        &file,
        r#"[
            {"qr_name": "North", "factory_code": "F05"},
            {"qr_name": "South", "factory_code": "F05", "waiting_time": null},
            {"display_name": "East", "site_id": "F05", "default_wait_minutes": 25}
        ]"#,
    )
    .unwrap();

    rp().args(["--db", &db_path, "qr", "import", "--file", &file])
        .assert()
        .success()
        .stdout(contains("Imported 3 checkpoints"));

    rp().args(["--db", &db_path, "qr", "list", "--site", "F05"])
        .assert()
        .success()
        .stdout(contains("North").and(contains("South")).and(contains("25")));
}

#[test]
fn test_scan_add_requires_known_checkpoint() {
    let db_path = setup_test_db("cli_scan_unknown_qr");
    rp().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rp().args([
        "--db", &db_path, "scan", "add", "--qr", "42", "--guard", "Raju", "--round", "1", "--date",
        "2024-06-01",
    ])
    .assert()
    .failure()
    .stderr(contains("Checkpoint 42 not found"));
}

#[test]
fn test_scan_add_rejects_unknown_round() {
    let db_path = setup_test_db("cli_scan_bad_round");
    init_db_with_data(&db_path);

    rp().args([
        "--db", &db_path, "scan", "add", "--qr", "1", "--guard", "Raju", "--round", "36", "--date",
        "2024-06-01",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid round number"));
}

#[test]
fn test_scan_list_by_day() {
    let db_path = setup_test_db("cli_scan_list");
    init_db_with_data(&db_path);

    rp().args(["--db", &db_path, "scan", "list", "--site", "F01", "--date", "2024-06-01"])
        .assert()
        .success()
        .stdout(contains("Raju").and(contains("Sita")));

    rp().args(["--db", &db_path, "scan", "list", "--date", "2024-06-02"])
        .assert()
        .success()
        .stderr(contains("No scans found"));
}

#[test]
fn test_report_json_rows() {
    let db_path = setup_test_db("cli_report_json");
    init_db_with_data(&db_path);

    let rows = report_json(&db_path, "F01", "2024-06-01");
    let rows = rows.as_array().expect("array of rows");
    assert_eq!(rows.len(), 70);

    assert_eq!(rows[0]["checkpoint_name"], "Gate-A");
    assert_eq!(rows[0]["round_number"], 1);
    assert_eq!(rows[0]["status"], "SUCCESS");
    assert_eq!(rows[0]["guard_name"], "Raju");
    assert_eq!(rows[0]["location_label"], "Main gate");

    assert_eq!(rows[19]["round_number"], 20);
    assert_eq!(rows[19]["status"], "SUCCESS");

    assert_eq!(rows[35]["checkpoint_name"], "Gate-B");
    assert_eq!(rows[36]["status"], "SUCCESS");
    assert_eq!(rows[36]["guard_name"], "Sita");

    let successes = rows.iter().filter(|r| r["status"] == "SUCCESS").count();
    assert_eq!(successes, 3);
}

#[test]
fn test_report_unknown_site_is_empty() {
    let db_path = setup_test_db("cli_report_empty");
    init_db_with_data(&db_path);

    let rows = report_json(&db_path, "F99", "2024-06-01");
    assert_eq!(rows, Value::Array(Vec::new()));
}

#[test]
fn test_report_missing_database_returns_error_object() {
    let db_path = setup_test_db("cli_report_no_db");

    let out = rp()
        .args(["--db", &db_path, "report", "--site", "F01", "--date", "2024-06-01", "--format", "json"])
        .output()
        .expect("run report");

    assert!(!out.status.success());
    let body: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert!(body["error"].as_str().unwrap().contains("Report generation failed"));
    assert!(fs::metadata(&db_path).is_err());
}

#[test]
fn test_report_invalid_date_returns_error_object() {
    let db_path = setup_test_db("cli_report_bad_date");
    init_db_with_data(&db_path);

    rp().args(["--db", &db_path, "report", "--site", "F01", "--date", "01-06-2024", "--format", "json"])
        .assert()
        .failure()
        .stdout(contains(r#""error""#).and(contains("01-06-2024")));
}

#[test]
fn test_report_table_output() {
    let db_path = setup_test_db("cli_report_table");
    init_db_with_data(&db_path);

    rp().args(["--db", &db_path, "report", "--site", "F01", "--date", "2024-06-01"])
        .assert()
        .success()
        .stdout(contains("Gate-A").and(contains("FAILED")).and(contains("09:05:00")));
}

#[test]
fn test_report_requires_site() {
    let db_path = setup_test_db("cli_report_no_site");
    init_db_with_data(&db_path);

    // only meaningful when the developer's config has no default_site
    let cfg = rpatrol::config::Config::load().unwrap_or_default();
    if cfg.default_site.is_some() {
        return;
    }

    rp().args(["--db", &db_path, "report", "--date", "2024-06-01"])
        .assert()
        .failure()
        .stderr(contains("no site given"));
}

#[test]
fn test_summary_json() {
    let db_path = setup_test_db("cli_summary_json");
    init_db_with_data(&db_path);

    let out = rp()
        .args(["--db", &db_path, "summary", "--site", "F01", "--date", "2024-06-01", "--json"])
        .output()
        .expect("run summary");
    assert!(out.status.success());

    let s: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(s["checkpoints"], 2);
    assert_eq!(s["total_expected_rounds"], 70);
    assert_eq!(s["completed_rounds"], 3);
    assert_eq!(s["missed_rounds"], 67);
    assert_eq!(s["scans_by_guard"][0]["guard_name"], "Raju");
    assert_eq!(s["scans_by_guard"][0]["scan_count"], 2);
}

#[test]
fn test_scan_del_then_report_misses_round() {
    let db_path = setup_test_db("cli_scan_del");
    init_db_with_data(&db_path);

    rp().args(["--db", &db_path, "scan", "del", "--id", "1"])
        .assert()
        .success();

    let rows = report_json(&db_path, "F01", "2024-06-01");
    assert_eq!(rows[0]["status"], "FAILED");

    rp().args(["--db", &db_path, "scan", "del", "--id", "1"])
        .assert()
        .failure()
        .stderr(contains("Scan 1 not found"));
}
