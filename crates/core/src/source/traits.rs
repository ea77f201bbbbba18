use async_trait::async_trait;

use crate::calendar::{CalendarEvent, DateRange, EventDraft, RemoteId};
use crate::recommend::CandidateSet;

use super::Result;

/// One page of events returned by [`CalendarSource::list_events`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPage {
    pub events: Vec<CalendarEvent>,
    pub next_page_token: Option<String>,
}

/// The invitee's personal calendar.
///
/// Implementations are responsible for boundary normalization, so every
/// returned event already uses the overlay's local wall-clock representation.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Lists events whose coverage intersects `range`, one page at a time.
    async fn list_events(&self, range: DateRange, page_token: Option<&str>) -> Result<EventPage>;

    /// Creates an event and returns it with its remote identity.
    async fn create_event(&self, draft: &EventDraft) -> Result<CalendarEvent>;

    /// Deletes an event by its remote id.
    async fn delete_event(&self, id: &RemoteId) -> Result<()>;
}

/// Server-side availability analysis for an invite.
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Returns the candidate intervals for `invite_code`, ordered by date then time.
    async fn candidates(&self, invite_code: &str, min_duration_minutes: u16)
        -> Result<CandidateSet>;
}
