//! Pretty output formatting.

use chrono::NaiveDate;

use crate::client::appointments::AppointmentDetail;
use crate::recommender::RecommenderSnapshot;
use meetsync_core::calendar::{CalendarEvent, DayAgenda};
use meetsync_core::overlay::{SyncFailure, SyncReport};
use meetsync_core::recommend::RecommendedSlot;
use meetsync_core::selection::{CommitOutcome, DateSelection, SelectionMode};

/// Format an event for display.
pub fn format_event(event: &CalendarEvent) -> String {
    let when = if event.all_day {
        let last = event.end.date().pred_opt().unwrap_or(event.start.date());
        if last <= event.start.date() {
            format!("{} (all day)", event.start.date())
        } else {
            format!("{} - {} (all day)", event.start.date(), last)
        }
    } else {
        format!(
            "{} - {}",
            event.start.format("%Y-%m-%d %H:%M"),
            event.end.format("%Y-%m-%d %H:%M")
        )
    };
    format!("{}\n  ID: {}\n  When: {}", event.title, event.id, when)
}

/// Format events for display.
pub fn format_events(events: &[&CalendarEvent]) -> String {
    if events.is_empty() {
        return "No events found.".to_string();
    }
    let mut output = format!("EVENTS ({})\n", events.len());
    output.push_str(&"-".repeat(40));
    for event in events {
        output.push_str(&format!("\n{}", format_event(event)));
        output.push('\n');
    }
    output
}

/// Format a per-day agenda.
pub fn format_agenda(agenda: &[DayAgenda<'_>]) -> String {
    let mut output = String::new();
    for day in agenda {
        output.push_str(&day.date.format("%Y-%m-%d (%a)").to_string());
        if day.is_free() {
            output.push_str("  free\n");
            continue;
        }
        output.push('\n');
        for event in &day.events {
            let time = if event.all_day {
                "all day".to_string()
            } else {
                format!("{}-{}", event.start.format("%H:%M"), event.end.format("%H:%M"))
            };
            output.push_str(&format!("  {time:<11} {}\n", event.title));
        }
    }
    output
}

/// Format the result of a sync.
pub fn format_sync_report(report: &SyncReport) -> String {
    let mut output = format!(
        "Synced: {} deleted, {} created",
        report.deleted.len(),
        report.created.len()
    );
    for id in &report.deleted {
        output.push_str(&format!("\n  - {id}"));
    }
    for created in &report.created {
        output.push_str(&format!("\n  + {} (was {})", created.remote, created.local));
    }
    if !report.is_complete() {
        output.push_str(&format!(
            "\nStill pending: {} deletes, {} creates",
            report.remaining_deletes.len(),
            report.remaining_creates.len()
        ));
    }
    output
}

/// Format a sync that stopped early: what was confirmed, what is still pending
/// and why it stopped.
pub fn format_sync_failure(failure: &SyncFailure) -> String {
    let mut output = format_sync_report(&failure.report);
    for id in &failure.report.remaining_deletes {
        output.push_str(&format!("\n  pending delete {id}"));
    }
    for local in &failure.report.remaining_creates {
        output.push_str(&format!("\n  pending create {local}"));
    }
    output.push_str(&format!("\n{failure}"));
    if failure.requires_reauth() {
        output.push_str("\nRe-authenticate and run the command again to retry.");
    }
    output
}

/// Format one slot with 12-hour times.
pub fn format_slot(slot: &RecommendedSlot) -> String {
    let mut output = format!(
        "{}  {} - {}",
        slot.date.format("%Y-%m-%d (%a)"),
        slot.start.format_clock(),
        slot.end.format_clock()
    );
    if slot.total_participants > 0 {
        output.push_str(&format!(
            "  [{}/{} available]",
            slot.participant_count, slot.total_participants
        ));
    }
    output
}

/// Format the recommender's result.
pub fn format_recommendation(snapshot: &RecommenderSnapshot, shown: &[RecommendedSlot]) -> String {
    if let Some(message) = &snapshot.recommendation.message {
        return format!("Cannot recommend: {message}");
    }
    let mut output = String::new();
    if let Some(name) = &snapshot.appointment_name {
        output.push_str(&format!("{name}\n"));
    }
    if shown.is_empty() {
        output.push_str("No time fits every participant.");
        return output;
    }
    output.push_str(&format!(
        "RECOMMENDED ({} of {})\n",
        shown.len(),
        snapshot.recommendation.slots.len()
    ));
    output.push_str(&"-".repeat(40));
    for slot in shown {
        output.push_str(&format!("\n{}", format_slot(slot)));
    }
    output
}

/// Format an appointment's candidate dates.
pub fn format_detail(detail: &AppointmentDetail) -> String {
    let mut output = format!(
        "{} [{}]\n  Participants: {}/{} with data",
        detail.name, detail.status, detail.participants_with_data, detail.total_participants
    );
    for date in &detail.dates {
        output.push_str(&format!(
            "\n  {}  {} ({}/{})",
            date.date, date.availability, date.available_count, date.total_count
        ));
    }
    output
}

/// Format the result of a drag.
pub fn format_outcome(outcome: &CommitOutcome, selection: &DateSelection) -> String {
    let verb = match outcome.mode {
        SelectionMode::Add => "Added",
        SelectionMode::Remove => "Removed",
    };
    let mut output = format!("{verb} {} date(s)", outcome.applied.len());
    for warning in &outcome.warnings {
        output.push_str(&format!("\n  ! {warning}"));
    }
    output.push_str(&format!("\nSelected ({}):", selection.len()));
    for date in selection {
        output.push_str(&format!(" {date}"));
    }
    output
}

/// Format a month grid. Selected days are bracketed, past days dimmed with `.`.
pub fn format_grid(
    weeks: &[[NaiveDate; 7]],
    month: u32,
    selection: &DateSelection,
    today: NaiveDate,
) -> String {
    use chrono::Datelike;

    let mut output = String::from(" Sun  Mon  Tue  Wed  Thu  Fri  Sat\n");
    for week in weeks {
        for day in week {
            let cell = if day.month() != month {
                "    ".to_string()
            } else if selection.contains(day) {
                format!("[{:>2}]", day.day())
            } else if *day < today {
                format!(" {:>2}.", day.day())
            } else {
                format!(" {:>2} ", day.day())
            };
            output.push_str(&cell);
            output.push(' ');
        }
        output.truncate(output.trim_end().len());
        output.push('\n');
    }
    output
}
