/// ANSI color helper utilities for terminal output.
use crate::models::report_row::ScanStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

pub fn color_for_status(status: ScanStatus) -> &'static str {
    match status {
        ScanStatus::Success => GREEN,
        ScanStatus::Failed => RED,
    }
}

/// Compliance color: green at 100%, yellow from 80%, red below.
pub fn color_for_compliance(percent: f64) -> &'static str {
    if percent >= 100.0 {
        GREEN
    } else if percent >= 80.0 {
        YELLOW
    } else {
        RED
    }
}

/// Grey placeholder for empty report cells.
pub fn colorize_optional(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => format!("{GREY}--{RESET}"),
    }
}
