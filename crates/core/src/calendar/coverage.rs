//! Calendar-day coverage of events.
//!
//! Coverage answers "which days does this event occupy?" at day granularity.
//! Time-of-day never matters: a timed event covers every day from its start
//! date to its end date inclusive, while an all-day event's stored end date is
//! exclusive and therefore not covered.

use chrono::NaiveDate;

use super::{CalendarEvent, DateRange, EventId};

/// Returns the first and last day an event covers.
pub fn coverage_span(event: &CalendarEvent) -> DateRange {
    let start = event.start_date();
    let last = if event.all_day {
        event
            .end_date()
            .pred_opt()
            .map_or(start, |day| day.max(start))
    } else {
        event.end_date().max(start)
    };
    DateRange { start, end: last }
}

/// Returns true if `event` occupies `date`.
pub fn coverage(event: &CalendarEvent, date: NaiveDate) -> bool {
    coverage_span(event).contains(date)
}

/// Events covering `date`, ordered by start time.
pub fn events_on<'a, I>(events: I, date: NaiveDate) -> Vec<&'a CalendarEvent>
where
    I: IntoIterator<Item = &'a CalendarEvent>,
{
    let mut day: Vec<_> = events
        .into_iter()
        .filter(|event| coverage(event, date))
        .collect();
    day.sort_by_key(|event| event.start);
    day
}

/// Ids of every event covering `date`, for whole-day bulk removal.
pub fn ids_on<'a, I>(events: I, date: NaiveDate) -> Vec<EventId>
where
    I: IntoIterator<Item = &'a CalendarEvent>,
{
    events_on(events, date)
        .into_iter()
        .map(|event| event.id.clone())
        .collect()
}

/// The events of one day of an invite range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAgenda<'a> {
    pub date: NaiveDate,
    pub events: Vec<&'a CalendarEvent>,
}

impl DayAgenda<'_> {
    /// Returns true if nothing is scheduled on this day.
    pub fn is_free(&self) -> bool {
        self.events.is_empty()
    }
}

/// Builds one agenda per day of `range`, including free days.
pub fn group_by_date<'a>(events: &[&'a CalendarEvent], range: DateRange) -> Vec<DayAgenda<'a>> {
    range
        .days()
        .map(|date| DayAgenda {
            date,
            events: events_on(events.iter().copied(), date),
        })
        .collect()
}
