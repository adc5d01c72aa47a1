//! Compute a company's free slots from its blocking appointments.
//!
//! Sorts blocking appointments by start time, merges overlapping busy periods,
//! then computes the gaps within a window. `daily_free_slots` applies one
//! local day's opening hours (break included) on top of that.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::appointment::Appointment;
use crate::checker::BlockingPolicy;
use crate::error::Result;
use crate::schedule::{local_to_utc, OpeningHours};

/// A bookable gap between busy periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

/// Merge overlapping or adjacent busy intervals, clipped to the given window.
///
/// Returns a sorted, non-overlapping list of (start, end) intervals.
fn merge_busy_periods(
    mut intervals: Vec<(DateTime<Utc>, DateTime<Utc>)>,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    intervals.retain(|&(start, end)| start < window_end && end > window_start);
    for interval in intervals.iter_mut() {
        interval.0 = interval.0.max(window_start);
        interval.1 = interval.1.min(window_end);
    }

    if intervals.is_empty() {
        return Vec::new();
    }

    // Sort by start time (then by end time for stability).
    intervals.sort_by_key(|&(start, end)| (start, end));

    let mut merged: Vec<(DateTime<Utc>, DateTime<Utc>)> = Vec::new();
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                // Overlapping or adjacent — extend the current interval.
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
}

fn blocking_intervals(
    appointments: &[Appointment],
    policy: BlockingPolicy,
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    appointments
        .iter()
        .filter(|a| policy.blocks(a.status))
        .map(|a| (a.start, a.end))
        .collect()
}

/// Gaps between merged busy intervals, including the leading and trailing gap.
fn gaps_between(
    merged: &[(DateTime<Utc>, DateTime<Utc>)],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<FreeSlot> {
    let mut free_slots = Vec::new();
    let mut cursor = window_start;

    for (busy_start, busy_end) in merged {
        if cursor < *busy_start {
            free_slots.push(FreeSlot {
                start: cursor,
                end: *busy_start,
                duration_minutes: (*busy_start - cursor).num_minutes(),
            });
        }
        cursor = cursor.max(*busy_end);
    }

    // Trailing free slot after the last busy period.
    if cursor < window_end {
        free_slots.push(FreeSlot {
            start: cursor,
            end: window_end,
            duration_minutes: (window_end - cursor).num_minutes(),
        });
    }

    free_slots
}

/// Find free slots within a window, given a company's appointments.
///
/// Only appointments blocking under `policy` count as busy; overlapping busy
/// periods are merged before computing gaps. Returns slots sorted by start.
pub fn find_free_slots(
    appointments: &[Appointment],
    policy: BlockingPolicy,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<FreeSlot> {
    let merged = merge_busy_periods(
        blocking_intervals(appointments, policy),
        window_start,
        window_end,
    );
    gaps_between(&merged, window_start, window_end)
}

/// Find the first free slot of at least `min_duration_minutes` within the window.
pub fn find_first_free_slot(
    appointments: &[Appointment],
    policy: BlockingPolicy,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    min_duration_minutes: i64,
) -> Option<FreeSlot> {
    find_free_slots(appointments, policy, window_start, window_end)
        .into_iter()
        .find(|slot| slot.duration_minutes >= min_duration_minutes)
}

/// Free slots for one local calendar day under a company's opening hours.
///
/// The window is the row's `[start_time, end_time)` on `date` in `tz`; a
/// configured break counts as busy. A closed row (or a missing one, by the
/// caller passing nothing) yields no slots.
///
/// # Errors
///
/// `InvalidSchedule` if the row violates its invariants or one of its local
/// times does not exist on `date` (DST spring-forward gap).
pub fn daily_free_slots(
    row: &OpeningHours,
    tz: Tz,
    date: NaiveDate,
    appointments: &[Appointment],
    policy: BlockingPolicy,
) -> Result<Vec<FreeSlot>> {
    if !row.is_open {
        return Ok(Vec::new());
    }
    row.validate()?;

    let window_start = local_to_utc(tz, date, row.start_time)?;
    let window_end = local_to_utc(tz, date, row.end_time)?;

    let mut busy = blocking_intervals(appointments, policy);
    if let Some((break_start, break_end)) = row.break_window() {
        busy.push((
            local_to_utc(tz, date, break_start)?,
            local_to_utc(tz, date, break_end)?,
        ));
    }

    let merged = merge_busy_periods(busy, window_start, window_end);
    Ok(gaps_between(&merged, window_start, window_end))
}
