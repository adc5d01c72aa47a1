//! Appointment records and their status lifecycle.
//!
//! An appointment blocks a company's calendar while it is `Pending` or
//! `Confirmed` (depending on the caller's blocking policy); `Cancelled` and
//! `Completed` appointments never block. Status changes follow a fixed state
//! machine and records are never physically deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Lifecycle state of an appointment.
///
/// Legal transitions: `Pending -> Confirmed -> Completed`,
/// `Pending -> Cancelled`, `Confirmed -> Cancelled`. `Completed` and
/// `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    /// Whether moving from `self` to `next` is a legal lifecycle step.
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use crate::appointment::AppointmentStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed)
                | (Confirmed, Cancelled)
        )
    }

    /// Terminal states admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Cancelled | AppointmentStatus::Completed
        )
    }
}

/// A booked (or requested) appointment with absolute UTC bounds.
///
/// The interval is half-open `[start, end)`: an appointment ending exactly
/// when another begins does not overlap it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub company_id: String,
    pub service_id: String,
    pub client_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Check the `start < end` invariant.
    pub fn validate(&self) -> Result<()> {
        if self.start >= self.end {
            return Err(SlotError::InvalidRange(format!(
                "appointment for {} must start before it ends ({} >= {})",
                self.company_id, self.start, self.end
            )));
        }
        Ok(())
    }

    /// Apply a status transition, rejecting anything outside the state machine.
    pub fn transition(&mut self, next: AppointmentStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(SlotError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}
