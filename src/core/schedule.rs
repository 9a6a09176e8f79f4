//! Patrol round schedule: the fixed 35-window table and its materialization
//! into concrete slot timestamps for a calendar date.

use crate::errors::{AppError, AppResult};
use crate::models::round::{RoundDefinition, RoundSlot};
use chrono::{NaiveDate, NaiveTime};

pub const ROUND_COUNT: usize = 35;

const fn hm(hour: u32, min: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, min, 0) {
        Some(t) => t,
        None => panic!("invalid round window time"),
    }
}

const fn round(n: u32, start: (u32, u32), end: (u32, u32)) -> RoundDefinition {
    RoundDefinition {
        round_number: n,
        window_start: hm(start.0, start.1),
        window_end: hm(end.0, end.1),
    }
}

/// The daily schedule, in round order, starting at 09:00.
///
/// Rounds 20..=35 fall after local midnight but are still stamped with the
/// report date by [`generate_round_slots`].
pub static ROUNDS: [RoundDefinition; ROUND_COUNT] = [
    round(1, (9, 0), (10, 0)),
    round(2, (10, 0), (11, 0)),
    round(3, (11, 0), (12, 0)),
    round(4, (12, 0), (13, 0)),
    round(5, (13, 0), (14, 0)),
    round(6, (14, 0), (15, 0)),
    round(7, (15, 0), (16, 0)),
    round(8, (16, 0), (17, 0)),
    round(9, (17, 0), (19, 0)),
    round(10, (19, 0), (19, 30)),
    round(11, (19, 30), (20, 0)),
    round(12, (20, 0), (20, 30)),
    round(13, (20, 30), (21, 0)),
    round(14, (21, 0), (21, 30)),
    round(15, (21, 30), (22, 0)),
    round(16, (22, 0), (22, 30)),
    round(17, (22, 30), (23, 0)),
    round(18, (23, 0), (23, 30)),
    round(19, (23, 30), (23, 59)),
    round(20, (0, 0), (0, 30)),
    round(21, (0, 30), (1, 0)),
    round(22, (1, 0), (1, 30)),
    round(23, (1, 30), (2, 0)),
    round(24, (2, 0), (2, 30)),
    round(25, (2, 30), (3, 0)),
    round(26, (3, 0), (3, 30)),
    round(27, (3, 30), (4, 0)),
    round(28, (4, 0), (4, 30)),
    round(29, (4, 30), (5, 0)),
    round(30, (5, 0), (5, 30)),
    round(31, (5, 30), (6, 0)),
    round(32, (6, 0), (6, 30)),
    round(33, (6, 30), (7, 0)),
    round(34, (7, 0), (8, 0)),
    round(35, (8, 0), (9, 0)),
];

/// Anything a report date can be given as: an ISO `YYYY-MM-DD` string or a parsed date.
pub trait IntoReportDate {
    fn into_report_date(self) -> AppResult<NaiveDate>;
}

impl IntoReportDate for NaiveDate {
    fn into_report_date(self) -> AppResult<NaiveDate> {
        Ok(self)
    }
}

impl IntoReportDate for &NaiveDate {
    fn into_report_date(self) -> AppResult<NaiveDate> {
        Ok(*self)
    }
}

impl IntoReportDate for &str {
    fn into_report_date(self) -> AppResult<NaiveDate> {
        parse_report_date(self)
    }
}

impl IntoReportDate for &String {
    fn into_report_date(self) -> AppResult<NaiveDate> {
        parse_report_date(self)
    }
}

impl IntoReportDate for String {
    fn into_report_date(self) -> AppResult<NaiveDate> {
        parse_report_date(&self)
    }
}

pub fn parse_report_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Materialize all rounds for `date`, ordered by round number.
///
/// Every slot carries the input calendar date, including the after-midnight
/// rounds; no rollover to the following day is applied.
pub fn generate_round_slots<D: IntoReportDate>(date: D) -> AppResult<Vec<RoundSlot>> {
    let base = date.into_report_date()?;
    Ok(slots_for_date(base))
}

pub fn slots_for_date(date: NaiveDate) -> Vec<RoundSlot> {
    ROUNDS
        .iter()
        .map(|r| RoundSlot {
            round_number: r.round_number,
            slot_datetime: date.and_time(r.window_start),
        })
        .collect()
}

pub fn round_definition(round_number: u32) -> Option<&'static RoundDefinition> {
    ROUNDS.iter().find(|r| r.round_number == round_number)
}

/// Slot a scan for `round_number` on `date` must be tagged with.
pub fn slot_for_round<D: IntoReportDate>(date: D, round_number: u32) -> AppResult<RoundSlot> {
    let base = date.into_report_date()?;
    let def = round_definition(round_number).ok_or(AppError::InvalidRound(round_number))?;

    Ok(RoundSlot {
        round_number: def.round_number,
        slot_datetime: base.and_time(def.window_start),
    })
}
