//! The availability overlay wired to a Calendar Source.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use meetsync_core::calendar::{
    events_on, group_by_date, CalendarEvent, DateRange, DayAgenda, EventDraft, EventError,
    EventId, LocalId, RemoteId,
};
use meetsync_core::overlay::{
    CreatedEvent, OverlayError, OverlayState, RemovalKind, SyncFailure, SyncReport, SyncStage,
};
use meetsync_core::source::{CalendarSource, SourceError};

/// One invitee's calendar with optimistic local edits.
///
/// Local edits are synchronous and never touch the source. Only
/// [`load_base`](Self::load_base) and [`sync`](Self::sync) do, and both take
/// `&mut self`, so at most one of them runs at a time.
#[derive(Debug)]
pub struct AvailabilityOverlay<S> {
    source: S,
    state: OverlayState,
    range: Option<DateRange>,
}

impl<S: CalendarSource> AvailabilityOverlay<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: OverlayState::new(),
            range: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    /// Range of the last successful load.
    pub fn range(&self) -> Option<DateRange> {
        self.range
    }

    /// Fetches every event covering `range` and makes it the new base.
    ///
    /// On failure the base, the pending queues and the loaded range are left
    /// as they were.
    pub async fn load_base(&mut self, range: DateRange) -> Result<usize, SourceError> {
        let events = fetch_all(&self.source, range).await?;
        let count = events.len();
        self.state.replace_base(events);
        self.range = Some(range);
        info!(count, start = %range.start, end = %range.end, "Loaded base events");
        Ok(count)
    }

    pub fn effective_view(&self) -> Vec<&CalendarEvent> {
        self.state.effective_view()
    }

    pub fn base(&self) -> &[CalendarEvent] {
        self.state.base()
    }

    pub fn pending_adds(&self) -> &[CalendarEvent] {
        self.state.pending_adds()
    }

    pub fn pending_removes(&self) -> &[RemoteId] {
        self.state.pending_removes()
    }

    pub fn has_pending(&self) -> bool {
        self.state.has_pending()
    }

    /// Effective events covering `date`, ordered by start.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        events_on(self.state.effective_view(), date)
    }

    /// Per-day agenda of the loaded range.
    pub fn agenda(&self) -> Vec<DayAgenda<'_>> {
        match self.range {
            Some(range) => group_by_date(&self.state.effective_view(), range),
            None => Vec::new(),
        }
    }

    pub fn add_local(&mut self, draft: EventDraft) -> Result<LocalId, EventError> {
        self.state.add_local(draft)
    }

    pub fn remove_local(&mut self, id: &EventId) -> Result<RemovalKind, OverlayError> {
        self.state.remove_local(id)
    }

    pub fn remove_many(&mut self, ids: &[EventId]) -> Result<Vec<RemovalKind>, OverlayError> {
        self.state.remove_many(ids)
    }

    pub fn edit_local(&mut self, id: &EventId, draft: EventDraft) -> Result<LocalId, OverlayError> {
        self.state.edit_local(id, draft)
    }

    /// Pushes pending deletes, then pending creates, to the source.
    ///
    /// Stops at the first failing call. Everything confirmed before that
    /// point stays confirmed; the rest stays pending for a retry. After a
    /// fully successful batch the base is reloaded for the loaded range.
    pub async fn sync(&mut self) -> Result<SyncReport, SyncFailure> {
        let plan = self.state.sync_plan();
        let mut report = SyncReport::default();
        if plan.is_empty() {
            debug!("Nothing to sync");
            return Ok(report);
        }
        info!(
            deletes = plan.deletes.len(),
            creates = plan.creates.len(),
            "Starting sync"
        );

        for id in &plan.deletes {
            if let Err(error) = self.source.delete_event(id).await {
                warn!(%id, %error, "Delete failed; aborting sync");
                return Err(self.failure(report, SyncStage::Delete, error));
            }
            debug!(%id, "Delete confirmed");
            self.state.confirm_delete(id);
            report.deleted.push(id.clone());
        }

        for event in &plan.creates {
            let Some(local) = event.id.as_local() else {
                continue;
            };
            let created = match self.source.create_event(&event.to_draft()).await {
                Ok(created) => created,
                Err(error) => {
                    warn!(id = %local, %error, "Create failed; aborting sync");
                    return Err(self.failure(report, SyncStage::Create, error));
                }
            };
            let Some(remote) = created.id.as_remote().cloned() else {
                let error = SourceError::transient("created event has no remote id");
                return Err(self.failure(report, SyncStage::Create, error));
            };
            debug!(%local, %remote, "Create confirmed");
            self.state.confirm_create(local, created);
            report.created.push(CreatedEvent { local, remote });
        }

        self.state.clear_pending();
        if let Some(range) = self.range {
            match fetch_all(&self.source, range).await {
                Ok(events) => {
                    self.state.replace_base(events);
                    report.reloaded = true;
                }
                Err(error) => {
                    warn!(%error, "Reload after sync failed");
                    return Err(self.failure(report, SyncStage::Reload, error));
                }
            }
        }

        info!(
            deleted = report.deleted.len(),
            created = report.created.len(),
            "Sync complete"
        );
        Ok(report)
    }

    fn failure(&self, mut report: SyncReport, stage: SyncStage, error: SourceError) -> SyncFailure {
        report.remaining_deletes = self.state.pending_removes().to_vec();
        report.remaining_creates = self
            .state
            .pending_adds()
            .iter()
            .filter_map(|event| event.id.as_local())
            .collect();
        SyncFailure {
            report,
            stage,
            error,
        }
    }
}

/// Follows page tokens until the source reports no further pages.
async fn fetch_all<S: CalendarSource>(
    source: &S,
    range: DateRange,
) -> Result<Vec<CalendarEvent>, SourceError> {
    let mut events = Vec::new();
    let mut token: Option<String> = None;
    let mut seen = HashSet::new();
    let mut page = 0usize;
    loop {
        let result = source.list_events(range, token.as_deref()).await?;
        page += 1;
        debug!(page, count = result.events.len(), "Fetched event page");
        events.extend(result.events);

        match result.next_page_token {
            Some(next) if !seen.insert(next.clone()) => {
                warn!(token = %next, "Source repeated a page token; stopping");
                break;
            }
            Some(next) => token = Some(next),
            None => break,
        }
    }
    Ok(events)
}
