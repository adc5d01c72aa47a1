//! The availability decision: is a requested window bookable for a company?
//!
//! A check is a pure function of a snapshot read of the two stores — no
//! internal mutable state, and no mutual exclusion between concurrent booking
//! attempts. Two overlapping requests may both see `Available`; preventing
//! the subsequent double-insert is the storage layer's job (a serializable
//! transaction or an exclusion constraint on company + interval). This module
//! covers only the read-side decision.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::appointment::AppointmentStatus;
use crate::conflict::overlaps;
use crate::error::Result;
use crate::schedule::resolve_local_window;
use crate::store::{AppointmentStore, OpeningHoursStore};

/// Which appointment statuses block a slot.
///
/// The default treats a `Pending` hold as blocking, so a slot cannot be
/// double-booked while a client is mid-payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockingPolicy {
    /// Only `Confirmed` appointments block.
    ConfirmedOnly,
    /// Both `Pending` and `Confirmed` appointments block.
    #[default]
    ConfirmedAndPending,
}

impl BlockingPolicy {
    /// Whether an appointment in `status` blocks under this policy.
    pub fn blocks(self, status: AppointmentStatus) -> bool {
        match self {
            BlockingPolicy::ConfirmedOnly => status == AppointmentStatus::Confirmed,
            BlockingPolicy::ConfirmedAndPending => matches!(
                status,
                AppointmentStatus::Confirmed | AppointmentStatus::Pending
            ),
        }
    }

    /// The statuses this policy treats as blocking, for store-side filtering.
    pub fn statuses(self) -> &'static [AppointmentStatus] {
        match self {
            BlockingPolicy::ConfirmedOnly => &[AppointmentStatus::Confirmed],
            BlockingPolicy::ConfirmedAndPending => {
                &[AppointmentStatus::Confirmed, AppointmentStatus::Pending]
            }
        }
    }
}

/// Why a window was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The company is closed that weekday (or has no row for it).
    Closed,
    /// The window falls outside the day's opening hours.
    OutsideHours,
    /// The window overlaps the configured mid-day break.
    DuringBreak,
    /// A blocking appointment overlaps the window.
    Conflict,
}

/// Outcome of an availability check. A rejection is a definitive business
/// decision, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum Decision {
    Available,
    Rejected(RejectReason),
}

impl Decision {
    pub fn is_available(self) -> bool {
        self == Decision::Available
    }
}

/// Decide whether `[start, end)` is bookable for `company_id`.
///
/// The window must be non-empty and fall on a single calendar day in `tz`,
/// else `SlotError::InvalidRange`. Checks run in order: weekday row present
/// and open → inside opening hours → clear of the break window → no blocking
/// appointment overlap (half-open, so a booking ending exactly when another
/// begins is fine).
///
/// # Errors
///
/// `InvalidRange` for a malformed window, `InvalidSchedule` if the stored
/// opening-hours row violates its invariants, `DataUnavailable` if either
/// store read fails — never silently `Available` in any of those cases.
pub fn check_availability<H, A>(
    hours_store: &H,
    appointment_store: &A,
    company_id: &str,
    tz: Tz,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    policy: BlockingPolicy,
) -> Result<Decision>
where
    H: OpeningHoursStore,
    A: AppointmentStore,
{
    let window = resolve_local_window(tz, start, end)?;

    let row = match hours_store.opening_hours(company_id, window.weekday)? {
        Some(row) if row.is_open => row,
        _ => return Ok(Decision::Rejected(RejectReason::Closed)),
    };
    row.validate()?;

    if window.start < row.start_time || window.end > row.end_time {
        return Ok(Decision::Rejected(RejectReason::OutsideHours));
    }

    if let Some((break_start, break_end)) = row.break_window() {
        // Half-open local-time overlap: touching the break boundary is fine.
        if window.start < break_end && break_start < window.end {
            return Ok(Decision::Rejected(RejectReason::DuringBreak));
        }
    }

    let existing = appointment_store.appointments_in_range(
        company_id,
        policy.statuses(),
        end,
        start,
    )?;
    let conflicted = existing
        .iter()
        .filter(|a| policy.blocks(a.status))
        .any(|a| overlaps(a.start, a.end, start, end));
    if conflicted {
        return Ok(Decision::Rejected(RejectReason::Conflict));
    }

    Ok(Decision::Available)
}
