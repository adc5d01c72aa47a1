//! Tests for half-open overlap detection against existing appointments.

use chrono::{DateTime, TimeZone, Utc};
use slot_engine::appointment::{Appointment, AppointmentStatus};
use slot_engine::checker::BlockingPolicy;
use slot_engine::conflict::{find_conflicts, overlaps};

/// Helper: an appointment on 2026-03-16 from (start_hour:start_min) to
/// (end_hour:end_min).
fn appointment(
    start_hour: u32,
    start_min: u32,
    end_hour: u32,
    end_min: u32,
    status: AppointmentStatus,
) -> Appointment {
    Appointment {
        company_id: "acme-salon".to_string(),
        service_id: "haircut".to_string(),
        client_id: "client-1".to_string(),
        start: Utc
            .with_ymd_and_hms(2026, 3, 16, start_hour, start_min, 0)
            .unwrap(),
        end: Utc
            .with_ymd_and_hms(2026, 3, 16, end_hour, end_min, 0)
            .unwrap(),
        status,
    }
}

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, hour, min, 0).unwrap()
}

#[test]
fn overlapping_appointment_detected_with_duration() {
    // Existing 09:00-10:00, request 09:30-10:30 → 30-minute overlap.
    let existing = vec![appointment(9, 0, 10, 0, AppointmentStatus::Confirmed)];

    let conflicts = find_conflicts(&existing, at(9, 30), at(10, 30), BlockingPolicy::default());

    assert_eq!(conflicts.len(), 1, "should detect exactly one conflict");
    assert_eq!(conflicts[0].overlap_minutes, 30);
}

#[test]
fn non_overlapping_appointment_is_not_a_conflict() {
    let existing = vec![appointment(9, 0, 10, 0, AppointmentStatus::Confirmed)];

    let conflicts = find_conflicts(&existing, at(11, 0), at(12, 0), BlockingPolicy::default());

    assert!(conflicts.is_empty());
}

#[test]
fn adjacent_appointment_is_not_a_conflict() {
    // Existing 09:00-10:00, request 10:00-11:00 → adjacency, not overlap.
    let existing = vec![appointment(9, 0, 10, 0, AppointmentStatus::Confirmed)];

    let conflicts = find_conflicts(&existing, at(10, 0), at(11, 0), BlockingPolicy::default());
    assert!(conflicts.is_empty(), "adjacency must not count as a conflict");

    let conflicts = find_conflicts(&existing, at(8, 0), at(9, 0), BlockingPolicy::default());
    assert!(conflicts.is_empty(), "adjacency must not count as a conflict");
}

#[test]
fn containment_is_a_conflict() {
    // Request fully inside the existing appointment, and vice versa.
    let existing = vec![appointment(9, 0, 12, 0, AppointmentStatus::Confirmed)];
    let conflicts = find_conflicts(&existing, at(10, 0), at(11, 0), BlockingPolicy::default());
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].overlap_minutes, 60);

    let existing = vec![appointment(10, 0, 11, 0, AppointmentStatus::Confirmed)];
    let conflicts = find_conflicts(&existing, at(9, 0), at(12, 0), BlockingPolicy::default());
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].overlap_minutes, 60);
}

#[test]
fn multiple_overlaps_all_reported() {
    let existing = vec![
        appointment(9, 0, 10, 0, AppointmentStatus::Confirmed),
        appointment(10, 30, 11, 0, AppointmentStatus::Pending),
        appointment(14, 0, 15, 0, AppointmentStatus::Confirmed),
    ];

    let conflicts = find_conflicts(&existing, at(9, 30), at(10, 45), BlockingPolicy::default());
    assert_eq!(conflicts.len(), 2);
}

#[test]
fn non_blocking_statuses_are_skipped() {
    let existing = vec![
        appointment(9, 0, 10, 0, AppointmentStatus::Cancelled),
        appointment(9, 0, 10, 0, AppointmentStatus::Completed),
    ];

    let conflicts = find_conflicts(&existing, at(9, 0), at(10, 0), BlockingPolicy::default());
    assert!(conflicts.is_empty(), "terminal statuses never block");
}

#[test]
fn pending_skipped_under_confirmed_only() {
    let existing = vec![appointment(9, 0, 10, 0, AppointmentStatus::Pending)];

    let conflicts = find_conflicts(&existing, at(9, 0), at(10, 0), BlockingPolicy::ConfirmedOnly);
    assert!(conflicts.is_empty());

    let conflicts = find_conflicts(
        &existing,
        at(9, 0),
        at(10, 0),
        BlockingPolicy::ConfirmedAndPending,
    );
    assert_eq!(conflicts.len(), 1);
}

#[test]
fn overlaps_is_symmetric() {
    let (a0, a1) = (at(9, 0), at(10, 0));
    let (b0, b1) = (at(9, 30), at(10, 30));
    assert!(overlaps(a0, a1, b0, b1));
    assert!(overlaps(b0, b1, a0, a1));

    let (c0, c1) = (at(10, 0), at(11, 0));
    assert!(!overlaps(a0, a1, c0, c1));
    assert!(!overlaps(c0, c1, a0, a1));
}
