//! In-memory sources for tests and offline runs.
//!
//! Both sources record every call and can be scripted to fail, so sync and
//! debounce behavior can be exercised without a backend.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use meetsync_core::calendar::{
    coverage_span, CalendarEvent, DateRange, EventDraft, EventId, RemoteId,
};
use meetsync_core::recommend::CandidateSet;
use meetsync_core::source::{
    CalendarSource, EventPage, RecommendationSource, Result, SourceError,
};

/// A calendar call as observed by [`InMemoryCalendar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCall {
    List { page_token: Option<String> },
    Create { title: String },
    Delete { id: RemoteId },
}

/// Which calendar operation a scripted failure applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarOperation {
    List,
    Create,
    Delete,
}

/// Calendar Source backed by a `Vec`, with scripted failures.
#[derive(Debug, Clone)]
pub struct InMemoryCalendar {
    events: Arc<RwLock<Vec<CalendarEvent>>>,
    failures: Arc<RwLock<HashMap<CalendarOperation, VecDeque<SourceError>>>>,
    calls: Arc<RwLock<Vec<CalendarCall>>>,
    next_id: Arc<AtomicU64>,
    page_size: usize,
}

impl Default for InMemoryCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCalendar {
    /// Creates an empty calendar listing 50 events per page.
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
            failures: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            page_size: 50,
        }
    }

    /// Creates a calendar holding `events`.
    pub fn with_events(events: Vec<CalendarEvent>) -> Self {
        Self {
            events: Arc::new(RwLock::new(events)),
            ..Self::new()
        }
    }

    pub fn with_page_size(self, page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..self
        }
    }

    /// Makes the next call of `operation` fail with `error`.
    pub async fn fail_next(&self, operation: CalendarOperation, error: SourceError) {
        self.failures
            .write()
            .await
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    /// Current remote events.
    pub async fn events(&self) -> Vec<CalendarEvent> {
        self.events.read().await.clone()
    }

    /// Every call received so far, in order.
    pub async fn calls(&self) -> Vec<CalendarCall> {
        self.calls.read().await.clone()
    }

    pub async fn clear_calls(&self) {
        self.calls.write().await.clear();
    }

    async fn record(&self, call: CalendarCall) {
        self.calls.write().await.push(call);
    }

    async fn scripted_failure(&self, operation: CalendarOperation) -> Result<()> {
        let mut failures = self.failures.write().await;
        match failures.get_mut(&operation).and_then(VecDeque::pop_front) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CalendarSource for InMemoryCalendar {
    async fn list_events(&self, range: DateRange, page_token: Option<&str>) -> Result<EventPage> {
        self.record(CalendarCall::List {
            page_token: page_token.map(str::to_string),
        })
        .await;
        self.scripted_failure(CalendarOperation::List).await?;

        let offset = match page_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| SourceError::transient(format!("invalid page token: {token}")))?,
            None => 0,
        };

        let events = self.events.read().await;
        let mut matching: Vec<&CalendarEvent> = events
            .iter()
            .filter(|event| coverage_span(event).overlaps(&range))
            .collect();
        matching.sort_by_key(|event| event.start);

        let page: Vec<CalendarEvent> = matching
            .iter()
            .skip(offset)
            .take(self.page_size)
            .map(|event| (*event).clone())
            .collect();
        let next = offset + page.len();
        Ok(EventPage {
            events: page,
            next_page_token: (next < matching.len()).then(|| next.to_string()),
        })
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<CalendarEvent> {
        self.record(CalendarCall::Create {
            title: draft.title.clone(),
        })
        .await;
        self.scripted_failure(CalendarOperation::Create).await?;

        let id = RemoteId::new(format!(
            "mem-{}",
            self.next_id.fetch_add(1, Ordering::SeqCst)
        ));
        let event = draft.clone().into_event(id);
        self.events.write().await.push(event.clone());
        Ok(event)
    }

    async fn delete_event(&self, id: &RemoteId) -> Result<()> {
        self.record(CalendarCall::Delete { id: id.clone() }).await;
        self.scripted_failure(CalendarOperation::Delete).await?;

        let target = EventId::Remote(id.clone());
        self.events.write().await.retain(|event| event.id != target);
        Ok(())
    }
}

/// Recommendation Source returning canned candidate sets.
///
/// Responses can be delayed per duration to simulate out-of-order arrival.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRecommendations {
    default: Arc<RwLock<CandidateSet>>,
    by_duration: Arc<RwLock<HashMap<u16, CandidateSet>>>,
    delays: Arc<RwLock<HashMap<u16, Duration>>>,
    failures: Arc<RwLock<VecDeque<SourceError>>>,
    calls: Arc<RwLock<Vec<(String, u16)>>>,
}

impl ScriptedRecommendations {
    /// Answers every request with `candidates`.
    pub fn new(candidates: CandidateSet) -> Self {
        Self {
            default: Arc::new(RwLock::new(candidates)),
            ..Self::default()
        }
    }

    /// Answers requests for `min_duration` with `candidates` instead.
    pub async fn respond_for(&self, min_duration: u16, candidates: CandidateSet) {
        self.by_duration.write().await.insert(min_duration, candidates);
    }

    /// Delays responses to requests for `min_duration`.
    pub async fn delay_for(&self, min_duration: u16, delay: Duration) {
        self.delays.write().await.insert(min_duration, delay);
    }

    pub async fn fail_next(&self, error: SourceError) {
        self.failures.write().await.push_back(error);
    }

    /// `(invite_code, min_duration)` of every request, in order.
    pub async fn calls(&self) -> Vec<(String, u16)> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl RecommendationSource for ScriptedRecommendations {
    async fn candidates(&self, invite_code: &str, min_duration_minutes: u16) -> Result<CandidateSet> {
        self.calls
            .write()
            .await
            .push((invite_code.to_string(), min_duration_minutes));

        let delay = self.delays.read().await.get(&min_duration_minutes).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.failures.write().await.pop_front() {
            return Err(error);
        }

        let specific = self
            .by_duration
            .read()
            .await
            .get(&min_duration_minutes)
            .cloned();
        match specific {
            Some(set) => Ok(set),
            None => Ok(self.default.read().await.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn december(start: u32, end: u32) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2025, 12, start).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, end).unwrap(),
        )
        .unwrap()
    }

    fn event(id: &str, d: u32) -> CalendarEvent {
        EventDraft::timed(id, at(d, 9), at(d, 10)).into_event(RemoteId::new(id))
    }

    #[tokio::test]
    async fn test_list_paginates_in_start_order() {
        let calendar =
            InMemoryCalendar::with_events(vec![event("c", 12), event("a", 10), event("b", 11)])
                .with_page_size(2);

        let first = calendar.list_events(december(1, 31), None).await.unwrap();
        assert_eq!(first.events.len(), 2);
        assert_eq!(first.events[0].title, "a");
        let token = first.next_page_token.unwrap();

        let second = calendar
            .list_events(december(1, 31), Some(&token))
            .await
            .unwrap();
        assert_eq!(second.events.len(), 1);
        assert_eq!(second.events[0].title, "c");
        assert!(second.next_page_token.is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_coverage() {
        let calendar = InMemoryCalendar::with_events(vec![event("a", 10), event("b", 20)]);
        let page = calendar.list_events(december(9, 11), None).await.unwrap();
        assert_eq!(page.events.len(), 1);
    }

    #[tokio::test]
    async fn test_scripted_failure_is_consumed_once() {
        let calendar = InMemoryCalendar::new();
        calendar
            .fail_next(CalendarOperation::Create, SourceError::transient("down"))
            .await;
        let draft = EventDraft::timed("Lunch", at(10, 12), at(10, 13));

        assert!(calendar.create_event(&draft).await.is_err());
        let created = calendar.create_event(&draft).await.unwrap();
        assert_eq!(created.id, EventId::Remote(RemoteId::new("mem-1")));
        assert_eq!(calendar.events().await.len(), 1);
        assert_eq!(calendar.calls().await.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_missing_event_succeeds() {
        let calendar = InMemoryCalendar::new();
        assert!(calendar.delete_event(&RemoteId::new("gone")).await.is_ok());
    }

    #[tokio::test]
    async fn test_scripted_recommendations_by_duration() {
        let named = CandidateSet {
            appointment_name: Some("Long".to_string()),
            ..CandidateSet::default()
        };
        let source = ScriptedRecommendations::new(CandidateSet::default());
        source.respond_for(120, named.clone()).await;

        assert_eq!(source.candidates("abc", 120).await.unwrap(), named);
        assert_eq!(
            source.candidates("abc", 30).await.unwrap(),
            CandidateSet::default()
        );
        assert_eq!(
            source.calls().await,
            vec![("abc".to_string(), 120), ("abc".to_string(), 30)]
        );
    }
}
