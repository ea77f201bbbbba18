//! Events CLI commands.

use chrono::{Days, NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};

use meetsync_core::calendar::{DateRange, EventDraft, EventId};

/// Events management commands.
#[derive(Debug, Parser)]
pub struct EventsCommand {
    #[command(subcommand)]
    pub action: EventsAction,
}

/// Date range to load before editing.
#[derive(Debug, Clone, Copy, Args)]
pub struct RangeArgs {
    /// First day (YYYY-MM-DD).
    #[arg(long)]
    pub start: NaiveDate,
    /// Last day, inclusive (YYYY-MM-DD).
    #[arg(long)]
    pub end: NaiveDate,
}

impl RangeArgs {
    pub fn range(&self) -> DateRange {
        DateRange::from_unordered(self.start, self.end)
    }
}

/// Fields of a new or edited event.
#[derive(Debug, Clone, Args)]
pub struct EventFields {
    /// Event title.
    #[arg(long)]
    pub title: String,
    /// Start (YYYY-MM-DD for all-day, YYYY-MM-DDTHH:MM otherwise).
    #[arg(long = "from", value_parser = parse_when)]
    pub from: NaiveDateTime,
    /// End (last day for all-day events, end time otherwise).
    #[arg(long = "to", value_parser = parse_when)]
    pub to: NaiveDateTime,
    /// Create an all-day event.
    #[arg(long)]
    pub all_day: bool,
}

impl EventFields {
    /// Builds the draft; an all-day `--to` names the last day, stored exclusive.
    pub fn to_draft(&self) -> EventDraft {
        if self.all_day {
            let last = self.to.date();
            let end = last.checked_add_days(Days::new(1)).unwrap_or(last);
            EventDraft::all_day(self.title.clone(), self.from.date(), end)
        } else {
            EventDraft::timed(self.title.clone(), self.from, self.to)
        }
    }
}

/// Available events actions.
#[derive(Debug, Subcommand)]
pub enum EventsAction {
    /// List events covering a date range.
    List {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Add an event and sync it.
    Add {
        #[command(flatten)]
        fields: EventFields,
    },
    /// Remove events and sync the deletions.
    Remove {
        /// Event IDs.
        #[arg(required = true, value_parser = parse_event_id)]
        ids: Vec<EventId>,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Remove every event on one day and sync.
    ClearDay {
        /// Day to clear (YYYY-MM-DD).
        date: NaiveDate,
    },
    /// Replace an event with an edited copy and sync.
    Edit {
        /// Event ID.
        #[arg(value_parser = parse_event_id)]
        id: EventId,
        #[command(flatten)]
        range: RangeArgs,
        #[command(flatten)]
        fields: EventFields,
    },
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM` or `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_when(value: &str) -> Result<NaiveDateTime, String> {
    let value = value.trim();
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(at);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .map_err(|_| format!("invalid date or date-time: {value}"))
}

fn parse_event_id(value: &str) -> Result<EventId, String> {
    value.parse().map_err(|never| match never {})
}
