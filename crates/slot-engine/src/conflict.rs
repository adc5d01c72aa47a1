//! Detect blocking appointments that overlap a requested window.
//!
//! Intervals are half-open `[start, end)`: an appointment ending exactly when
//! the requested window begins (or vice versa) is adjacency, NOT a conflict.

use chrono::{DateTime, Utc};

use crate::appointment::Appointment;
use crate::checker::BlockingPolicy;

/// A detected conflict between the requested window and an existing appointment.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub appointment: Appointment,
    pub overlap_minutes: i64,
}

/// Half-open interval overlap test.
///
/// Two intervals overlap iff `a_start < b_end && b_start < a_end`; the
/// adjacent case where one ends exactly as the other starts is excluded.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Find every blocking appointment that overlaps the requested window.
///
/// Only appointments whose status blocks under `policy` are considered.
/// The overlap duration is `min(ends) - max(starts)`.
pub fn find_conflicts(
    existing: &[Appointment],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    policy: BlockingPolicy,
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for appointment in existing {
        if !policy.blocks(appointment.status) {
            continue;
        }
        if overlaps(appointment.start, appointment.end, start, end) {
            let overlap_start = appointment.start.max(start);
            let overlap_end = appointment.end.min(end);
            let overlap_minutes = (overlap_end - overlap_start).num_minutes();

            conflicts.push(Conflict {
                appointment: appointment.clone(),
                overlap_minutes,
            });
        }
    }

    conflicts
}
