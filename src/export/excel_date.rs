// src/export/excel_date.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Try to read a cell as a timestamp, date or clock time, returning the
/// Excel serial value and the number format to display it with.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    // offset-aware scan times are shown in their own wall clock
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(("yyyy-mm-dd hh:mm:ss", naive_datetime_to_excel_serial(&dt.naive_local())));
    }

    let dt_formats = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

    for fmt in dt_formats.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(("yyyy-mm-dd hh:mm", naive_datetime_to_excel_serial(&dt)));
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let dt = d.and_time(NaiveTime::MIN);
        return Some(("yyyy-mm-dd", naive_datetime_to_excel_serial(&dt)));
    }

    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M:%S") {
        let seconds = t.num_seconds_from_midnight() as f64;
        return Some(("hh:mm:ss", seconds / 86400.0));
    }

    None
}

fn naive_datetime_to_excel_serial(dt: &NaiveDateTime) -> f64 {
    // 1899-12-30 is day zero of the Excel 1900 date system
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .map(|d| d.and_time(NaiveTime::MIN))
        .unwrap_or_default();

    let duration = *dt - epoch;
    duration.num_seconds() as f64 / 86400.0
}
