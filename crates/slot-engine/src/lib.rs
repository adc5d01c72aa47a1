//! # slot-engine
//!
//! Deterministic appointment availability checking for multi-tenant booking
//! platforms.
//!
//! Given a requested window for a company, the engine decides whether it is
//! bookable: no conflicting blocking appointment, inside the configured
//! opening hours for that weekday in the company's time zone, and clear of
//! the configured mid-day break. Intervals are half-open `[start, end)`, so
//! back-to-back bookings never conflict.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{NaiveTime, TimeZone, Utc};
//! use slot_engine::{check_availability, BlockingPolicy, Decision};
//! use slot_engine::schedule::{DayOfWeek, OpeningHours};
//! use slot_engine::store::InMemoryStore;
//!
//! let mut store = InMemoryStore::new();
//! store
//!     .set_week_schedule(
//!         "acme-salon",
//!         vec![OpeningHours {
//!             day_of_week: DayOfWeek::Monday,
//!             is_open: true,
//!             start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
//!             end_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
//!             break_start_time: None,
//!             break_end_time: None,
//!         }],
//!     )
//!     .unwrap();
//!
//! // 2026-03-16 is a Monday.
//! let decision = check_availability(
//!     &store,
//!     &store,
//!     "acme-salon",
//!     chrono_tz::UTC,
//!     Utc.with_ymd_and_hms(2026, 3, 16, 10, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2026, 3, 16, 10, 30, 0).unwrap(),
//!     BlockingPolicy::default(),
//! )
//! .unwrap();
//! assert_eq!(decision, Decision::Available);
//! ```
//!
//! ## Modules
//!
//! - [`checker`] — the accept/reject decision for a requested window
//! - [`conflict`] — half-open overlap detection against existing appointments
//! - [`freebusy`] — free-slot computation under opening hours and breaks
//! - [`schedule`] — opening hours, weekday resolution, local-time windows
//! - [`appointment`] — appointment records and status lifecycle
//! - [`store`] — collaborator traits + in-memory reference store
//! - [`error`] — error types

pub mod appointment;
pub mod checker;
pub mod conflict;
pub mod error;
pub mod freebusy;
pub mod schedule;
pub mod store;

pub use appointment::{Appointment, AppointmentStatus};
pub use checker::{check_availability, BlockingPolicy, Decision, RejectReason};
pub use conflict::{find_conflicts, overlaps, Conflict};
pub use error::SlotError;
pub use freebusy::{daily_free_slots, find_first_free_slot, find_free_slots, FreeSlot};
pub use schedule::{parse_timezone, DayOfWeek, OpeningHours};
pub use store::{AppointmentStore, InMemoryStore, OpeningHoursStore};
