use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;

/// One fixed patrol window of the daily schedule.
///
/// `window_end` may sort before `window_start` for late-night rounds; the
/// table is read as a rolling timeline starting at 09:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundDefinition {
    pub round_number: u32,
    pub window_start: NaiveTime,
    pub window_end: NaiveTime,
}

impl RoundDefinition {
    pub fn window_label(&self) -> String {
        format!(
            "{}-{}",
            self.window_start.format("%H:%M"),
            self.window_end.format("%H:%M")
        )
    }
}

/// A round stamped onto a calendar date: the expected visit timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RoundSlot {
    pub round_number: u32,
    pub slot_datetime: NaiveDateTime, // ⇔ scan_logs.round_slot ("YYYY-MM-DDTHH:MM:SS")
}

impl RoundSlot {
    pub fn slot_str(&self) -> String {
        self.slot_datetime.format(SLOT_FORMAT).to_string()
    }
}

/// Textual form of a slot timestamp, as attributed to scans at capture time.
pub const SLOT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
