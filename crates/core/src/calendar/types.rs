use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::EventError;

const LOCAL_ID_PREFIX: &str = "local-";

/// Identifier assigned to an event by the remote calendar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteId(String);

impl RemoteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Temporary identifier for an event that so far only exists locally.
///
/// A `LocalId` is never sent to the remote calendar; the event receives a
/// [`RemoteId`] once a sync creates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalId(Uuid);

impl LocalId {
    /// Generates a fresh temporary id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps a specific UUID (useful for testing).
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{LOCAL_ID_PREFIX}{}", self.0)
    }
}

/// Identity of an event in the effective view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "origin", content = "value", rename_all = "snake_case")]
pub enum EventId {
    Remote(RemoteId),
    Local(LocalId),
}

impl EventId {
    /// Returns true if the event has not been created remotely yet.
    pub fn is_local(&self) -> bool {
        matches!(self, EventId::Local(_))
    }

    /// Returns the remote id, if the event exists remotely.
    pub fn as_remote(&self) -> Option<&RemoteId> {
        match self {
            EventId::Remote(id) => Some(id),
            EventId::Local(_) => None,
        }
    }

    /// Returns the temporary id, if the event only exists locally.
    pub fn as_local(&self) -> Option<LocalId> {
        match self {
            EventId::Local(id) => Some(*id),
            EventId::Remote(_) => None,
        }
    }
}

impl From<RemoteId> for EventId {
    fn from(id: RemoteId) -> Self {
        EventId::Remote(id)
    }
}

impl From<LocalId> for EventId {
    fn from(id: LocalId) -> Self {
        EventId::Local(id)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Remote(id) => id.fmt(f),
            EventId::Local(id) => id.fmt(f),
        }
    }
}

/// Parses the display form back: `local-<uuid>` is a temporary id,
/// anything else is taken as a remote id.
impl FromStr for EventId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let local = s
            .strip_prefix(LOCAL_ID_PREFIX)
            .and_then(|rest| Uuid::parse_str(rest).ok());
        Ok(match local {
            Some(uuid) => EventId::Local(LocalId(uuid)),
            None => EventId::Remote(RemoteId::new(s)),
        })
    }
}

/// A personal calendar event as seen by the overlay.
///
/// `start` and `end` are wall-clock times in the invite's local day. All-day
/// events run midnight-to-midnight and their `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
}

impl CalendarEvent {
    /// Calendar day the event starts on.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Calendar day the event ends on (exclusive for all-day events).
    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    /// Returns the editable fields of this event.
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            start: self.start,
            end: self.end,
            all_day: self.all_day,
        }
    }
}

/// The fields of an event before it is assigned an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
}

impl EventDraft {
    /// Creates a timed draft.
    pub fn timed(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            start,
            end,
            all_day: false,
        }
    }

    /// Creates an all-day draft. `end` is the exclusive end date.
    pub fn all_day(title: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            title: title.into(),
            start: start.and_time(NaiveTime::MIN),
            end: end.and_time(NaiveTime::MIN),
            all_day: true,
        }
    }

    /// Replaces the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Checks the draft before it enters the overlay.
    pub fn validate(&self) -> Result<(), EventError> {
        if self.title.trim().is_empty() {
            return Err(EventError::EmptyTitle);
        }
        if self.title.len() > 200 {
            return Err(EventError::TitleTooLong);
        }
        if self.end < self.start {
            return Err(EventError::InvalidTimeRange);
        }
        Ok(())
    }

    /// Attaches an identity to the draft.
    pub fn into_event(self, id: impl Into<EventId>) -> CalendarEvent {
        CalendarEvent {
            id: id.into(),
            title: self.title,
            start: self.start,
            end: self.end,
            all_day: self.all_day,
        }
    }
}
