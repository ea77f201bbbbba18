//! Boundary encoding of calendar events.
//!
//! The calendar source speaks ISO-8601: timed events carry instants with an
//! offset, all-day events carry a date-only start/end pair. These pure
//! functions convert between that encoding and [`CalendarEvent`].

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::{CalendarEvent, EventDraft, EventId, RemoteId};
use crate::serde::deserialize_optional_string;

/// Title used for events the source returns without a summary.
pub const UNTITLED_EVENT: &str = "(no title)";

/// Start or end of an event as the source encodes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEventTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<FixedOffset>>,
}

impl RemoteEventTime {
    pub fn date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            date_time: None,
        }
    }

    pub fn instant(at: DateTime<FixedOffset>) -> Self {
        Self {
            date: None,
            date_time: Some(at),
        }
    }
}

/// An event as listed, created or returned by the calendar source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEvent {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<RemoteEventTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<RemoteEventTime>,
}

impl RemoteEvent {
    /// Encodes a draft for a create call.
    ///
    /// All-day drafts become a date-only pair; timed drafts become instants in
    /// `offset`. Returns `None` only if a wall-clock time cannot be expressed
    /// in `offset`.
    pub fn from_draft(draft: &EventDraft, offset: FixedOffset) -> Option<Self> {
        let (start, end) = if draft.all_day {
            (
                RemoteEventTime::date(draft.start.date()),
                RemoteEventTime::date(draft.end.date()),
            )
        } else {
            (
                RemoteEventTime::instant(offset.from_local_datetime(&draft.start).single()?),
                RemoteEventTime::instant(offset.from_local_datetime(&draft.end).single()?),
            )
        };
        Some(Self {
            id: None,
            summary: Some(draft.title.clone()),
            start: Some(start),
            end: Some(end),
        })
    }
}

/// Converts a source event into the overlay's representation.
///
/// Timed instants are shifted into `offset` and kept as local wall-clock
/// times. All-day events become midnight-to-midnight; a missing all-day end
/// defaults to the following day. Events without any start are dropped.
pub fn normalize_remote_event(raw: RemoteEvent, offset: FixedOffset) -> Option<CalendarEvent> {
    let start_time = raw.start.as_ref()?;
    let title = raw
        .summary
        .clone()
        .unwrap_or_else(|| UNTITLED_EVENT.to_string());

    let (start, end, all_day) = match (start_time.date, start_time.date_time) {
        (Some(start_date), _) => {
            let end_date = raw
                .end
                .as_ref()
                .and_then(|end| end.date)
                .or_else(|| start_date.checked_add_days(Days::new(1)))
                .unwrap_or(start_date);
            (midnight(start_date), midnight(end_date), true)
        }
        (None, Some(start_at)) => {
            let start = local(start_at, offset);
            let end = raw
                .end
                .as_ref()
                .and_then(|end| end.date_time)
                .map_or(start, |end_at| local(end_at, offset));
            (start, end, false)
        }
        (None, None) => return None,
    };

    let id = raw
        .id
        .unwrap_or_else(|| format!("{}-{}", start.format("%Y-%m-%dT%H:%M:%S"), title));

    Some(CalendarEvent {
        id: EventId::Remote(RemoteId::new(id)),
        title,
        start,
        end,
        all_day,
    })
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn local(at: DateTime<FixedOffset>, offset: FixedOffset) -> NaiveDateTime {
    at.with_timezone(&offset).naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seoul() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, d).unwrap()
    }

    #[test]
    fn test_normalize_timed_event_into_local_offset() {
        let raw: RemoteEvent = serde_json::from_str(
            r#"{
                "id": "evt1",
                "summary": "Standup",
                "start": {"dateTime": "2025-12-10T00:30:00Z"},
                "end": {"dateTime": "2025-12-10T01:00:00Z"}
            }"#,
        )
        .unwrap();

        let event = normalize_remote_event(raw, seoul()).unwrap();

        assert_eq!(event.id, EventId::Remote(RemoteId::new("evt1")));
        assert!(!event.all_day);
        assert_eq!(event.start, date(10).and_hms_opt(9, 30, 0).unwrap());
        assert_eq!(event.end, date(10).and_hms_opt(10, 0, 0).unwrap());
    }

    #[test]
    fn test_normalize_all_day_event_is_midnight_to_midnight() {
        let raw: RemoteEvent = serde_json::from_str(
            r#"{"id": "h1", "summary": "Holiday", "start": {"date": "2025-12-24"}, "end": {"date": "2025-12-26"}}"#,
        )
        .unwrap();

        let event = normalize_remote_event(raw, seoul()).unwrap();

        assert!(event.all_day);
        assert_eq!(event.start, midnight(date(24)));
        assert_eq!(event.end, midnight(date(26)));
    }

    #[test]
    fn test_normalize_all_day_without_end_spans_one_day() {
        let raw = RemoteEvent {
            id: Some("h2".to_string()),
            summary: Some("Birthday".to_string()),
            start: Some(RemoteEventTime::date(date(5))),
            end: None,
        };

        let event = normalize_remote_event(raw, seoul()).unwrap();

        assert_eq!(event.end, midnight(date(6)));
    }

    #[test]
    fn test_normalize_fills_missing_title_and_id() {
        let raw: RemoteEvent =
            serde_json::from_str(r#"{"id": "", "summary": " ", "start": {"date": "2025-12-05"}}"#)
                .unwrap();

        let event = normalize_remote_event(raw, seoul()).unwrap();

        assert_eq!(event.title, UNTITLED_EVENT);
        assert_eq!(
            event.id,
            EventId::Remote(RemoteId::new("2025-12-05T00:00:00-(no title)"))
        );
    }

    #[test]
    fn test_normalize_drops_event_without_start() {
        let raw = RemoteEvent {
            id: Some("x".to_string()),
            ..RemoteEvent::default()
        };
        assert!(normalize_remote_event(raw, seoul()).is_none());
    }

    #[test]
    fn test_from_draft_encodes_timed_instants_with_offset() {
        let draft = EventDraft::timed(
            "Dentist",
            date(10).and_hms_opt(14, 0, 0).unwrap(),
            date(10).and_hms_opt(15, 0, 0).unwrap(),
        );

        let remote = RemoteEvent::from_draft(&draft, seoul()).unwrap();
        let json = serde_json::to_value(&remote).unwrap();

        assert_eq!(json["summary"], "Dentist");
        assert_eq!(json["start"]["dateTime"], "2025-12-10T14:00:00+09:00");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_from_draft_encodes_all_day_as_dates() {
        let draft = EventDraft::all_day("Trip", date(10), date(13));

        let remote = RemoteEvent::from_draft(&draft, seoul()).unwrap();

        assert_eq!(remote.start, Some(RemoteEventTime::date(date(10))));
        assert_eq!(remote.end, Some(RemoteEventTime::date(date(13))));
    }
}
