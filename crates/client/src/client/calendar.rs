//! Calendar Source over HTTP.

use async_trait::async_trait;
use chrono::{NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::MeetsyncClient;
use crate::error::{ClientError, Result};
use meetsync_core::calendar::{
    normalize_remote_event, CalendarEvent, DateRange, EventDraft, RemoteEvent, RemoteId,
};
use meetsync_core::source::{self, CalendarSource, EventPage};

/// Query parameters for listing events.
#[derive(Debug, Serialize)]
pub struct ListEventsQuery {
    pub time_min: String,
    pub time_max: String,
    pub max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

/// One page as returned by `GET /calendar/events`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListResponse {
    #[serde(default)]
    pub events: Vec<RemoteEvent>,
    #[serde(default, deserialize_with = "meetsync_core::serde::deserialize_optional_string")]
    pub next_page_token: Option<String>,
}

impl MeetsyncClient {
    /// Instants bounding the whole local days of `range`.
    fn time_bounds(&self, range: DateRange) -> Result<(String, String)> {
        let bound = |date: chrono::NaiveDate, time: NaiveTime| {
            self.offset
                .from_local_datetime(&date.and_time(time))
                .single()
                .map(|at| at.to_rfc3339())
                .ok_or_else(|| ClientError::InvalidInput(format!("unrepresentable date {date}")))
        };
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        Ok((bound(range.start, NaiveTime::MIN)?, bound(range.end, end_of_day)?))
    }

    /// List one page of events covering `range`.
    pub async fn list_events_page(
        &self,
        range: DateRange,
        page_token: Option<&str>,
    ) -> Result<EventPage> {
        let (time_min, time_max) = self.time_bounds(range)?;
        let query = ListEventsQuery {
            time_min,
            time_max,
            max_results: self.page_size,
            page_token: page_token.map(str::to_string),
        };
        let request = self.client.get(self.url("/calendar/events")).query(&query);
        let response = self.authorized(request).await?.send().await?;
        let page: EventListResponse = self.handle_response(response).await?;

        let received = page.events.len();
        let events: Vec<CalendarEvent> = page
            .events
            .into_iter()
            .filter_map(|raw| normalize_remote_event(raw, self.offset))
            .collect();
        if events.len() < received {
            debug!(dropped = received - events.len(), "Dropped events without a start");
        }

        Ok(EventPage {
            events,
            next_page_token: page.next_page_token,
        })
    }

    /// Create an event.
    pub async fn create_calendar_event(&self, draft: &EventDraft) -> Result<CalendarEvent> {
        let body = RemoteEvent::from_draft(draft, self.offset).ok_or_else(|| {
            ClientError::InvalidInput(format!("unrepresentable time for {}", draft.title))
        })?;
        let request = self.client.post(self.url("/calendar/events")).json(&body);
        let response = self.authorized(request).await?.send().await?;
        let created: RemoteEvent = self.handle_response(response).await?;

        if created.id.is_none() {
            return Err(ClientError::InvalidResponse(
                "created event has no id".to_string(),
            ));
        }
        normalize_remote_event(created, self.offset)
            .ok_or_else(|| ClientError::InvalidResponse("created event has no start".to_string()))
    }

    /// Delete an event. An event that is already gone counts as deleted.
    pub async fn delete_calendar_event(&self, id: &RemoteId) -> Result<()> {
        let path = format!("/calendar/events/{}", urlencoding::encode(id.as_str()));
        let request = self.client.delete(self.url(&path));
        let response = self.authorized(request).await?.send().await?;
        if response.status().as_u16() == 404 {
            debug!(%id, "Event already deleted");
            return Ok(());
        }
        self.check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl CalendarSource for MeetsyncClient {
    async fn list_events(
        &self,
        range: DateRange,
        page_token: Option<&str>,
    ) -> source::Result<EventPage> {
        match self.list_events_page(range, page_token).await {
            Ok(page) => Ok(page),
            Err(error) => Err(self.into_source_error(error).await),
        }
    }

    async fn create_event(&self, draft: &EventDraft) -> source::Result<CalendarEvent> {
        match self.create_calendar_event(draft).await {
            Ok(event) => Ok(event),
            Err(error) => Err(self.into_source_error(error).await),
        }
    }

    async fn delete_event(&self, id: &RemoteId) -> source::Result<()> {
        match self.delete_calendar_event(id).await {
            Ok(()) => Ok(()),
            Err(error) => Err(self.into_source_error(error).await),
        }
    }
}
