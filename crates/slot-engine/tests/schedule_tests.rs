//! Tests for opening-hours validation and local-window resolution.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use slot_engine::error::SlotError;
use slot_engine::schedule::{
    local_to_utc, parse_timezone, resolve_local_window, DayOfWeek, OpeningHours,
};

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn row() -> OpeningHours {
    OpeningHours {
        day_of_week: DayOfWeek::Monday,
        is_open: true,
        start_time: time(9, 0),
        end_time: time(19, 0),
        break_start_time: None,
        break_end_time: None,
    }
}

// ── Validation ──────────────────────────────────────────────────────────────

#[test]
fn well_formed_row_validates() {
    row().validate().unwrap();

    let mut with_break = row();
    with_break.break_start_time = Some(time(13, 0));
    with_break.break_end_time = Some(time(14, 0));
    with_break.validate().unwrap();
}

#[test]
fn reversed_opening_hours_fail() {
    let mut bad = row();
    bad.start_time = time(19, 0);
    bad.end_time = time(9, 0);
    assert!(matches!(bad.validate(), Err(SlotError::InvalidSchedule(_))));
}

#[test]
fn break_outside_opening_hours_fails() {
    let mut bad = row();
    bad.break_start_time = Some(time(8, 0));
    bad.break_end_time = Some(time(10, 0));
    assert!(matches!(bad.validate(), Err(SlotError::InvalidSchedule(_))));

    let mut bad = row();
    bad.break_start_time = Some(time(18, 0));
    bad.break_end_time = Some(time(20, 0));
    assert!(matches!(bad.validate(), Err(SlotError::InvalidSchedule(_))));
}

#[test]
fn half_configured_break_fails() {
    let mut bad = row();
    bad.break_start_time = Some(time(13, 0));
    assert!(matches!(bad.validate(), Err(SlotError::InvalidSchedule(_))));
}

#[test]
fn closed_row_skips_time_validation() {
    let mut closed = row();
    closed.is_open = false;
    closed.start_time = time(19, 0);
    closed.end_time = time(9, 0);
    closed.validate().unwrap();
}

// ── Window resolution ───────────────────────────────────────────────────────

#[test]
fn window_resolves_date_weekday_and_times() {
    let start = Utc.with_ymd_and_hms(2026, 3, 16, 10, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 3, 16, 10, 30, 0).unwrap();

    let window = resolve_local_window(chrono_tz::UTC, start, end).unwrap();
    assert_eq!(window.date, NaiveDate::from_ymd_opt(2026, 3, 16).unwrap());
    assert_eq!(window.weekday, DayOfWeek::Monday);
    assert_eq!(window.start, time(10, 0));
    assert_eq!(window.end, time(10, 30));
}

#[test]
fn window_crossing_local_midnight_is_rejected() {
    // 23:30Z–00:30Z next day in UTC.
    let start = Utc.with_ymd_and_hms(2026, 3, 16, 23, 30, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 3, 17, 0, 30, 0).unwrap();
    let result = resolve_local_window(chrono_tz::UTC, start, end);
    assert!(matches!(result, Err(SlotError::InvalidRange(_))));

    // The same UTC instants sit inside a single day in Los Angeles.
    let la: Tz = "America/Los_Angeles".parse().unwrap();
    let window = resolve_local_window(la, start, end).unwrap();
    assert_eq!(window.weekday, DayOfWeek::Monday);
}

#[test]
fn empty_window_is_rejected() {
    let start = Utc.with_ymd_and_hms(2026, 3, 16, 10, 0, 0).unwrap();
    assert!(matches!(
        resolve_local_window(chrono_tz::UTC, start, start),
        Err(SlotError::InvalidRange(_))
    ));
}

// ── Timezone parsing and conversion ─────────────────────────────────────────

#[test]
fn parse_timezone_accepts_iana_names() {
    parse_timezone("Europe/Berlin").unwrap();
    parse_timezone("UTC").unwrap();
    let err = parse_timezone("Mars/Olympus_Mons").unwrap_err();
    assert!(matches!(err, SlotError::InvalidTimezone(_)));
}

#[test]
fn dst_gap_time_is_a_schedule_error() {
    // US spring-forward 2026-03-08: 02:30 does not exist in New York.
    let ny: Tz = "America/New_York".parse().unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
    let result = local_to_utc(ny, date, time(2, 30));
    assert!(matches!(result, Err(SlotError::InvalidSchedule(_))));

    // 03:00 exists and is 07:00Z (EDT, UTC-4).
    let dt = local_to_utc(ny, date, time(3, 0)).unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2026, 3, 8, 7, 0, 0).unwrap());
}

#[test]
fn ambiguous_fall_back_time_resolves_to_earlier_offset() {
    // US fall-back 2026-11-01: 01:30 occurs twice in New York; the earlier
    // occurrence is EDT (UTC-4) → 05:30Z.
    let ny: Tz = "America/New_York".parse().unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
    let dt = local_to_utc(ny, date, time(1, 30)).unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2026, 11, 1, 5, 30, 0).unwrap());
}

#[test]
fn rows_roundtrip_through_json() {
    let mut with_break = row();
    with_break.break_start_time = Some(time(13, 0));
    with_break.break_end_time = Some(time(14, 0));

    let json = serde_json::to_string(&with_break).unwrap();
    assert!(json.contains("\"monday\""));
    let back: OpeningHours = serde_json::from_str(&json).unwrap();
    assert_eq!(back, with_break);
}
