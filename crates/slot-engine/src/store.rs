//! Store traits for the checker's two read-side collaborators, plus an
//! in-memory implementation backing the CLI and tests.
//!
//! The checker never reaches for ambient state: both stores are passed in
//! explicitly. Any read failure surfaces as `SlotError::DataUnavailable` and
//! must never be treated as "available" by callers.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::appointment::{Appointment, AppointmentStatus};
use crate::error::Result;
use crate::schedule::{DayOfWeek, OpeningHours};

/// Read access to a company's per-weekday opening hours.
pub trait OpeningHoursStore {
    /// The row for (company, weekday), or `None` when the company has never
    /// configured that day.
    fn opening_hours(&self, company_id: &str, day: DayOfWeek) -> Result<Option<OpeningHours>>;
}

/// Read access to a company's appointments.
pub trait AppointmentStore {
    /// Appointments for `company_id` in one of `statuses` whose interval may
    /// intersect `[ends_after, starts_before)`.
    ///
    /// This is a coarse pre-filter; the caller applies the precise half-open
    /// overlap test in-process. Implementations may over-return but must not
    /// drop a matching appointment.
    fn appointments_in_range(
        &self,
        company_id: &str,
        statuses: &[AppointmentStatus],
        starts_before: DateTime<Utc>,
        ends_after: DateTime<Utc>,
    ) -> Result<Vec<Appointment>>;
}

/// In-memory store over both collaborator traits.
///
/// Schedules are replaced wholesale per company, mirroring the
/// delete-all-then-insert lifecycle of the hosted backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    hours: HashMap<String, HashMap<DayOfWeek, OpeningHours>>,
    appointments: Vec<Appointment>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a company's entire week schedule. Every row is validated;
    /// a duplicate weekday in `rows` keeps the last occurrence.
    pub fn set_week_schedule(&mut self, company_id: &str, rows: Vec<OpeningHours>) -> Result<()> {
        let mut week = HashMap::new();
        for row in rows {
            row.validate()?;
            week.insert(row.day_of_week, row);
        }
        self.hours.insert(company_id.to_string(), week);
        Ok(())
    }

    /// Insert one appointment after checking its interval invariant.
    pub fn add_appointment(&mut self, appointment: Appointment) -> Result<()> {
        appointment.validate()?;
        self.appointments.push(appointment);
        Ok(())
    }
}

impl OpeningHoursStore for InMemoryStore {
    fn opening_hours(&self, company_id: &str, day: DayOfWeek) -> Result<Option<OpeningHours>> {
        Ok(self
            .hours
            .get(company_id)
            .and_then(|week| week.get(&day))
            .cloned())
    }
}

impl AppointmentStore for InMemoryStore {
    fn appointments_in_range(
        &self,
        company_id: &str,
        statuses: &[AppointmentStatus],
        starts_before: DateTime<Utc>,
        ends_after: DateTime<Utc>,
    ) -> Result<Vec<Appointment>> {
        Ok(self
            .appointments
            .iter()
            .filter(|a| a.company_id == company_id)
            .filter(|a| statuses.contains(&a.status))
            .filter(|a| a.start < starts_before && a.end > ends_after)
            .cloned()
            .collect())
    }
}
