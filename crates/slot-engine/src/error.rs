//! Error types for slot-engine operations.

use thiserror::Error;

use crate::appointment::AppointmentStatus;

#[derive(Error, Debug)]
pub enum SlotError {
    /// The requested window is malformed (reversed, zero-length, or spanning
    /// more than one calendar day in the company's time zone).
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// A stored opening-hours row violates its invariants, or a configured
    /// local time does not exist on the requested date (DST gap).
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    /// A disallowed appointment status change.
    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    /// A collaborator read failed. Retryable by the caller; must never be
    /// interpreted as "available".
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),
}

/// Convenience alias used throughout slot-engine.
pub type Result<T> = std::result::Result<T, SlotError>;
