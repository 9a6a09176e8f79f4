use chrono::{NaiveDate, NaiveTime};
use rpatrol::core::schedule::{
    ROUND_COUNT, generate_round_slots, round_definition, slot_for_round,
};
use rpatrol::core::ROUNDS;
use rpatrol::errors::AppError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn test_generates_35_slots_in_round_order() {
    let slots = generate_round_slots("2024-06-01").unwrap();

    assert_eq!(slots.len(), ROUND_COUNT);
    for (i, slot) in slots.iter().enumerate() {
        assert_eq!(slot.round_number, i as u32 + 1);
    }
}

#[test]
fn test_every_slot_carries_the_input_date() {
    let d = date(2024, 6, 1);
    let slots = generate_round_slots(d).unwrap();

    assert!(slots.iter().all(|s| s.slot_datetime.date() == d));
}

#[test]
fn test_after_midnight_rounds_do_not_roll_over() {
    let slots = generate_round_slots("2024-06-01").unwrap();

    let r20 = &slots[19];
    assert_eq!(r20.round_number, 20);
    assert_eq!(r20.slot_str(), "2024-06-01T00:00:00");

    let r35 = &slots[34];
    assert_eq!(r35.slot_str(), "2024-06-01T08:00:00");
}

#[test]
fn test_string_and_date_inputs_agree() {
    let a = generate_round_slots("2024-02-29").unwrap();
    let b = generate_round_slots(date(2024, 2, 29)).unwrap();
    let c = generate_round_slots(&"2024-02-29".to_string()).unwrap();

    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn test_generation_is_idempotent() {
    assert_eq!(
        generate_round_slots("2024-06-01").unwrap(),
        generate_round_slots("2024-06-01").unwrap()
    );
}

#[test]
fn test_invalid_date_is_rejected() {
    for bad in ["01-06-2024", "2024-13-01", "2023-02-29", "", "2024/06/01"] {
        match generate_round_slots(bad) {
            Err(AppError::InvalidDate(s)) => assert_eq!(s, bad),
            other => panic!("expected InvalidDate for {bad:?}, got {other:?}"),
        }
    }
}

/// The full schedule as published for the guards: (round, start, end).
const EXPECTED_ROUNDS: [(u32, &str, &str); 35] = [
    (1, "09:00", "10:00"),
    (2, "10:00", "11:00"),
    (3, "11:00", "12:00"),
    (4, "12:00", "13:00"),
    (5, "13:00", "14:00"),
    (6, "14:00", "15:00"),
    (7, "15:00", "16:00"),
    (8, "16:00", "17:00"),
    (9, "17:00", "19:00"),
    (10, "19:00", "19:30"),
    (11, "19:30", "20:00"),
    (12, "20:00", "20:30"),
    (13, "20:30", "21:00"),
    (14, "21:00", "21:30"),
    (15, "21:30", "22:00"),
    (16, "22:00", "22:30"),
    (17, "22:30", "23:00"),
    (18, "23:00", "23:30"),
    (19, "23:30", "23:59"),
    (20, "00:00", "00:30"),
    (21, "00:30", "01:00"),
    (22, "01:00", "01:30"),
    (23, "01:30", "02:00"),
    (24, "02:00", "02:30"),
    (25, "02:30", "03:00"),
    (26, "03:00", "03:30"),
    (27, "03:30", "04:00"),
    (28, "04:00", "04:30"),
    (29, "04:30", "05:00"),
    (30, "05:00", "05:30"),
    (31, "05:30", "06:00"),
    (32, "06:00", "06:30"),
    (33, "06:30", "07:00"),
    (34, "07:00", "08:00"),
    (35, "08:00", "09:00"),
];

fn hhmm(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

#[test]
fn test_round_table_matches_published_schedule() {
    assert_eq!(ROUNDS.len(), EXPECTED_ROUNDS.len());

    for (def, (n, start, end)) in ROUNDS.iter().zip(EXPECTED_ROUNDS) {
        assert_eq!(def.round_number, n);
        assert_eq!(def.window_start, hhmm(start), "start of round {n}");
        assert_eq!(def.window_end, hhmm(end), "end of round {n}");
    }

    let slots = generate_round_slots("2024-06-01").unwrap();
    for (slot, (n, start, _)) in slots.iter().zip(EXPECTED_ROUNDS) {
        assert_eq!(slot.round_number, n);
        assert_eq!(slot.slot_datetime.time(), hhmm(start));
    }
}

#[test]
fn test_round_table_windows() {
    // round 19 stops one minute short of midnight
    assert_eq!(ROUNDS[18].window_end, time(23, 59));
    assert_eq!(ROUNDS[19].window_start, time(0, 0));
    assert_eq!(ROUNDS[8].window_label(), "17:00-19:00");
}

#[test]
fn test_slot_for_round() {
    let slot = slot_for_round("2024-06-01", 12).unwrap();
    assert_eq!(slot.round_number, 12);
    assert_eq!(slot.slot_str(), "2024-06-01T20:00:00");

    assert!(round_definition(0).is_none());
    assert!(matches!(
        slot_for_round("2024-06-01", 36),
        Err(AppError::InvalidRound(36))
    ));
    assert!(matches!(
        slot_for_round("June 1st", 1),
        Err(AppError::InvalidDate(_))
    ));
}
