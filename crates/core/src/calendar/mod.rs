mod coverage;
mod error;
mod range;
mod remote;
mod types;

pub use coverage::{coverage, coverage_span, events_on, group_by_date, ids_on, DayAgenda};
pub use error::{DateRangeError, EventError};
pub use range::DateRange;
pub use remote::{normalize_remote_event, RemoteEvent, RemoteEventTime, UNTITLED_EVENT};
pub use types::{CalendarEvent, EventDraft, EventId, LocalId, RemoteId};
