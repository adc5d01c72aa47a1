//! `slots` CLI — check bookability and list free slots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Is Monday 10:00-10:30 UTC bookable for this company?
//! slots check --company acme-salon --schedule hours.json \
//!     --appointments appts.json --timezone Europe/Berlin \
//!     --start 2026-03-16T10:00:00Z --end 2026-03-16T10:30:00Z
//!
//! # List a day's free slots in local time
//! slots free --company acme-salon --schedule hours.json \
//!     --appointments appts.json --timezone Europe/Berlin --date 2026-03-16
//!
//! # Validate a schedule file's invariants
//! slots validate --schedule hours.json
//! ```
//!
//! The schedule file is a JSON array of opening-hours rows; the appointments
//! file is a JSON array of appointments. A rejected window is a successful
//! run (the decision is the output); malformed input exits non-zero.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use slot_engine::{
    check_availability, daily_free_slots, parse_timezone, Appointment, BlockingPolicy, Decision,
    FreeSlot, InMemoryStore, OpeningHours, RejectReason,
};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Appointment availability checks for booking schedules"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide whether a requested window is bookable
    Check {
        /// Company identifier the schedule and appointments belong to
        #[arg(long)]
        company: String,
        /// JSON file with the company's opening-hours rows
        #[arg(long)]
        schedule: String,
        /// JSON file with the company's appointments (omit for an empty calendar)
        #[arg(long)]
        appointments: Option<String>,
        /// IANA time zone the company operates in (e.g. "Europe/Berlin")
        #[arg(long)]
        timezone: String,
        /// Window start, RFC 3339 (e.g. "2026-03-16T10:00:00Z")
        #[arg(long)]
        start: String,
        /// Window end, RFC 3339
        #[arg(long)]
        end: String,
        /// Only confirmed appointments block (default: pending holds block too)
        #[arg(long)]
        confirmed_only: bool,
        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },
    /// List a day's free slots under the opening hours
    Free {
        /// Company identifier the schedule and appointments belong to
        #[arg(long)]
        company: String,
        /// JSON file with the company's opening-hours rows
        #[arg(long)]
        schedule: String,
        /// JSON file with the company's appointments (omit for an empty calendar)
        #[arg(long)]
        appointments: Option<String>,
        /// IANA time zone the company operates in
        #[arg(long)]
        timezone: String,
        /// Local calendar date (e.g. "2026-03-16")
        #[arg(long)]
        date: String,
        /// Hide slots shorter than this many minutes
        #[arg(long, default_value_t = 0)]
        min_duration: i64,
        /// Print the slots as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a schedule file's invariants
    Validate {
        /// JSON file with opening-hours rows
        #[arg(long)]
        schedule: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            company,
            schedule,
            appointments,
            timezone,
            start,
            end,
            confirmed_only,
            json,
        } => check(
            &company,
            &schedule,
            appointments.as_deref(),
            &timezone,
            &start,
            &end,
            confirmed_only,
            json,
        ),
        Commands::Free {
            company,
            schedule,
            appointments,
            timezone,
            date,
            min_duration,
            json,
        } => free(
            &company,
            &schedule,
            appointments.as_deref(),
            &timezone,
            &date,
            min_duration,
            json,
        ),
        Commands::Validate { schedule } => validate(&schedule),
    }
}

/// Load a schedule file and appointments file into an in-memory store.
fn load_store(
    company: &str,
    schedule_path: &str,
    appointments_path: Option<&str>,
) -> Result<InMemoryStore> {
    let rows = read_schedule(schedule_path)?;

    let mut store = InMemoryStore::new();
    store
        .set_week_schedule(company, rows)
        .with_context(|| format!("Schedule file '{}' failed validation", schedule_path))?;

    if let Some(path) = appointments_path {
        for appointment in read_appointments(path)? {
            store
                .add_appointment(appointment)
                .with_context(|| format!("Appointments file '{}' failed validation", path))?;
        }
    }

    Ok(store)
}

fn read_appointments(path: &str) -> Result<Vec<Appointment>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read appointments file '{}'", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse appointments file '{}'", path))
}

fn read_schedule(path: &str) -> Result<Vec<OpeningHours>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schedule file '{}'", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse schedule file '{}'", path))
}

fn parse_instant(value: &str, flag: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("--{} must be an RFC 3339 timestamp, got '{}'", flag, value))
}

fn policy(confirmed_only: bool) -> BlockingPolicy {
    if confirmed_only {
        BlockingPolicy::ConfirmedOnly
    } else {
        BlockingPolicy::ConfirmedAndPending
    }
}

fn reason_label(reason: RejectReason) -> &'static str {
    match reason {
        RejectReason::Closed => "closed",
        RejectReason::OutsideHours => "outside_hours",
        RejectReason::DuringBreak => "during_break",
        RejectReason::Conflict => "conflict",
    }
}

#[allow(clippy::too_many_arguments)]
fn check(
    company: &str,
    schedule: &str,
    appointments: Option<&str>,
    timezone: &str,
    start: &str,
    end: &str,
    confirmed_only: bool,
    json: bool,
) -> Result<()> {
    let store = load_store(company, schedule, appointments)?;
    let tz = parse_timezone(timezone).with_context(|| format!("Unknown timezone '{}'", timezone))?;
    let start = parse_instant(start, "start")?;
    let end = parse_instant(end, "end")?;

    let decision = check_availability(
        &store,
        &store,
        company,
        tz,
        start,
        end,
        policy(confirmed_only),
    )
    .context("Availability check failed")?;

    if json {
        println!("{}", serde_json::to_string(&decision)?);
    } else {
        match decision {
            Decision::Available => println!("available"),
            Decision::Rejected(reason) => println!("rejected: {}", reason_label(reason)),
        }
    }
    Ok(())
}

fn free(
    company: &str,
    schedule: &str,
    appointments: Option<&str>,
    timezone: &str,
    date: &str,
    min_duration: i64,
    json: bool,
) -> Result<()> {
    let tz = parse_timezone(timezone).with_context(|| format!("Unknown timezone '{}'", timezone))?;
    let date: NaiveDate = date
        .parse()
        .with_context(|| format!("--date must be YYYY-MM-DD, got '{}'", date))?;

    let rows = read_schedule(schedule)?;
    for row in &rows {
        row.validate()
            .with_context(|| format!("Schedule file '{}' failed validation", schedule))?;
    }
    let weekday = slot_engine::DayOfWeek::from(chrono::Datelike::weekday(&date));
    let row = rows.iter().find(|r| r.day_of_week == weekday);

    let company_appointments: Vec<Appointment> = match appointments {
        Some(path) => read_appointments(path)?
            .into_iter()
            .filter(|a| a.company_id == company)
            .collect(),
        None => Vec::new(),
    };

    let slots: Vec<FreeSlot> = match row {
        Some(row) => daily_free_slots(row, tz, date, &company_appointments, BlockingPolicy::default())
            .context("Free-slot computation failed")?
            .into_iter()
            .filter(|slot| slot.duration_minutes >= min_duration)
            .collect(),
        None => Vec::new(),
    };

    if json {
        println!("{}", serde_json::to_string(&slots)?);
    } else if slots.is_empty() {
        println!("no free slots");
    } else {
        for slot in &slots {
            println!(
                "{} - {} ({} min)",
                slot.start.with_timezone(&tz).format("%H:%M"),
                slot.end.with_timezone(&tz).format("%H:%M"),
                slot.duration_minutes
            );
        }
    }
    Ok(())
}

fn validate(schedule: &str) -> Result<()> {
    let rows = read_schedule(schedule)?;
    for row in &rows {
        row.validate()
            .with_context(|| format!("Schedule file '{}' failed validation", schedule))?;
    }
    println!("ok ({} rows)", rows.len());
    Ok(())
}
