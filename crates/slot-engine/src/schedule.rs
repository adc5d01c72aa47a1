//! Per-weekday opening hours and local-time window resolution.
//!
//! Opening hours are stored as one row per (company, day-of-week) with local
//! times-of-day; requested windows arrive as absolute UTC timestamps and are
//! resolved into the company's time zone before any comparison. A request must
//! fall on a single local calendar day.

use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Day of the week a schedule row applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// One company's opening hours for a single weekday, with an optional
/// mid-day break. Times are local to the company's time zone.
///
/// When `is_open` is false, the time fields are ignored for availability.
/// Rows are owned and replaced wholesale by the company; the checker only
/// ever reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub day_of_week: DayOfWeek,
    pub is_open: bool,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub break_start_time: Option<NaiveTime>,
    #[serde(default)]
    pub break_end_time: Option<NaiveTime>,
}

impl OpeningHours {
    /// Check the row's invariants: `start_time < end_time`, and a break
    /// window (both-or-neither) satisfying
    /// `start_time <= break_start < break_end <= end_time`.
    ///
    /// Closed rows are exempt — their time fields carry no meaning.
    pub fn validate(&self) -> Result<()> {
        if !self.is_open {
            return Ok(());
        }
        if self.start_time >= self.end_time {
            return Err(SlotError::InvalidSchedule(format!(
                "{:?}: start_time {} must precede end_time {}",
                self.day_of_week, self.start_time, self.end_time
            )));
        }
        match (self.break_start_time, self.break_end_time) {
            (None, None) => Ok(()),
            (Some(bs), Some(be)) => {
                if bs >= be || bs < self.start_time || be > self.end_time {
                    return Err(SlotError::InvalidSchedule(format!(
                        "{:?}: break {}..{} must sit inside opening hours {}..{}",
                        self.day_of_week, bs, be, self.start_time, self.end_time
                    )));
                }
                Ok(())
            }
            _ => Err(SlotError::InvalidSchedule(format!(
                "{:?}: break start and end must be set together",
                self.day_of_week
            ))),
        }
    }

    /// The break window, if one is configured.
    pub fn break_window(&self) -> Option<(NaiveTime, NaiveTime)> {
        match (self.break_start_time, self.break_end_time) {
            (Some(bs), Some(be)) => Some((bs, be)),
            _ => None,
        }
    }
}

/// A requested UTC window resolved into a company's local calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalWindow {
    pub date: NaiveDate,
    pub weekday: DayOfWeek,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Parse an IANA time-zone identifier (e.g. "Europe/Berlin").
pub fn parse_timezone(timezone: &str) -> Result<Tz> {
    timezone
        .parse()
        .map_err(|_| SlotError::InvalidTimezone(timezone.to_string()))
}

/// Resolve a requested `[start, end)` UTC window into `tz`.
///
/// Rejects reversed or zero-length windows, and windows whose endpoints land
/// on different local calendar days (a window ending at local midnight counts
/// as the next day and is rejected).
pub fn resolve_local_window(
    tz: Tz,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<LocalWindow> {
    if start >= end {
        return Err(SlotError::InvalidRange(format!(
            "start {} must precede end {}",
            start, end
        )));
    }
    let local_start = start.with_timezone(&tz);
    let local_end = end.with_timezone(&tz);
    if local_start.date_naive() != local_end.date_naive() {
        return Err(SlotError::InvalidRange(format!(
            "window must fall on a single calendar day in {} ({} .. {})",
            tz,
            local_start.date_naive(),
            local_end.date_naive()
        )));
    }
    Ok(LocalWindow {
        date: local_start.date_naive(),
        weekday: local_start.weekday().into(),
        start: local_start.time(),
        end: local_end.time(),
    })
}

/// Convert a local date + time-of-day in `tz` to UTC.
///
/// Ambiguous local times (DST fall-back) resolve to the earlier offset;
/// nonexistent local times (DST spring-forward gap) are a schedule error.
pub fn local_to_utc(tz: Tz, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Utc>> {
    match tz.from_local_datetime(&date.and_time(time)) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, _) => Ok(earlier.with_timezone(&Utc)),
        LocalResult::None => Err(SlotError::InvalidSchedule(format!(
            "{} does not exist on {} in {}",
            time, date, tz
        ))),
    }
}
