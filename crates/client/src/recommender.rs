//! Debounced slot recommendation.
//!
//! Every request takes a ticket from a [`RequestSequence`]. A request first
//! waits out the quiet period and gives up if a newer ticket was issued in
//! the meantime; its response is applied only if its ticket is still current
//! when it arrives. Network calls are never cancelled, late answers are
//! simply ignored.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use meetsync_core::recommend::{
    display, recommend, validate, CalculationStatus, CandidateSet, MinuteOfDay, PreferenceWindow,
    Recommendation, RecommendedSlot, RequestSequence, Ticket, WindowError,
    DEFAULT_DISPLAY_LIMIT,
};
use meetsync_core::source::{RecommendationSource, SourceError};

/// Quiet period used unless configured otherwise.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// User input, any part of which may still be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub duration_minutes: Option<u16>,
    pub start: Option<MinuteOfDay>,
    pub end: Option<MinuteOfDay>,
}

impl Preferences {
    pub fn new(duration_minutes: u16, start: MinuteOfDay, end: MinuteOfDay) -> Self {
        Self {
            duration_minutes: Some(duration_minutes),
            start: Some(start),
            end: Some(end),
        }
    }

    /// Hour-based input as typed into the form.
    pub fn from_hours(duration_hours: f64, start_hour: u8, end_hour: u8) -> Result<Self, WindowError> {
        let window = PreferenceWindow::from_hours(duration_hours, start_hour, end_hour)?;
        Ok(Self::new(window.min_duration, window.start, window.end))
    }

    /// The window, once every part is present and the duration is positive.
    pub fn window(&self) -> Option<PreferenceWindow> {
        let duration = self.duration_minutes.filter(|minutes| *minutes > 0)?;
        Some(PreferenceWindow::new(duration, self.start?, self.end?))
    }
}

/// What the recommender currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecommenderSnapshot {
    pub recommendation: Recommendation,
    pub status: Option<CalculationStatus>,
    pub appointment_name: Option<String>,
    /// Last remote failure, cleared by the next successful response.
    pub error: Option<SourceError>,
    /// True while a request for the current input is outstanding.
    pub loading: bool,
}

#[derive(Debug, Default)]
struct Inner {
    preferences: Preferences,
    candidates: Option<(u16, CandidateSet)>,
    requested: Option<u16>,
    snapshot: RecommenderSnapshot,
}

impl Inner {
    fn recompute(&mut self) {
        let Some(window) = self.preferences.window() else {
            self.snapshot.recommendation = Recommendation::default();
            return;
        };
        self.snapshot.recommendation = match &self.candidates {
            Some((duration, set)) if *duration == window.min_duration => {
                recommend(&set.intervals, &window)
            }
            _ => Recommendation {
                slots: Vec::new(),
                message: validate(&window).err(),
            },
        };
    }
}

/// Turns preference input into recommended slots for one invite.
#[derive(Debug)]
pub struct SlotRecommender<S> {
    source: Arc<S>,
    invite_code: String,
    quiet_period: Duration,
    display_limit: usize,
    sequence: Arc<RequestSequence>,
    inner: Arc<RwLock<Inner>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl<S> SlotRecommender<S>
where
    S: RecommendationSource + 'static,
{
    pub fn new(source: Arc<S>, invite_code: impl Into<String>) -> Self {
        Self {
            source,
            invite_code: invite_code.into(),
            quiet_period: DEFAULT_QUIET_PERIOD,
            display_limit: DEFAULT_DISPLAY_LIMIT,
            sequence: Arc::new(RequestSequence::new()),
            inner: Arc::new(RwLock::new(Inner::default())),
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = limit;
        self
    }

    pub fn invite_code(&self) -> &str {
        &self.invite_code
    }

    /// Applies new input.
    ///
    /// Incomplete input or an invalid window clears the result. A changed
    /// duration schedules a debounced request; a changed window alone is
    /// re-filtered against the candidates already held.
    pub async fn update(&self, preferences: Preferences) {
        let mut inner = self.inner.write().await;
        inner.preferences = preferences;

        let Some(window) = preferences.window() else {
            self.sequence.invalidate();
            inner.requested = None;
            inner.snapshot.loading = false;
            inner.recompute();
            return;
        };

        if let Err(error) = validate(&window) {
            debug!(%error, "Rejected preference window");
            self.sequence.invalidate();
            inner.requested = None;
            inner.snapshot.loading = false;
            inner.snapshot.recommendation = Recommendation {
                slots: Vec::new(),
                message: Some(error),
            };
            return;
        }

        let held = inner.candidates.as_ref().map(|(duration, _)| *duration);
        if held == Some(window.min_duration) {
            if inner.requested != held {
                // a request for another duration is in flight; its answer no longer matters
                self.sequence.invalidate();
                inner.requested = held;
                inner.snapshot.loading = false;
            }
            inner.recompute();
            return;
        }
        if inner.requested == Some(window.min_duration) {
            inner.recompute();
            return;
        }

        let ticket = self.issue(&mut inner, window.min_duration);
        inner.recompute();
        drop(inner);
        self.spawn_request(ticket, window.min_duration).await;
    }

    /// Schedules a query for `min_duration_minutes` after the quiet period,
    /// superseding any query scheduled or in flight.
    pub async fn request_candidates(&self, min_duration_minutes: u16) -> Ticket {
        let ticket = {
            let mut inner = self.inner.write().await;
            self.issue(&mut inner, min_duration_minutes)
        };
        self.spawn_request(ticket, min_duration_minutes).await;
        ticket
    }

    fn issue(&self, inner: &mut Inner, min_duration_minutes: u16) -> Ticket {
        inner.requested = Some(min_duration_minutes);
        inner.snapshot.loading = true;
        let ticket = self.sequence.next();
        debug!(sequence = ticket.value(), min_duration_minutes, "Scheduling candidate request");
        ticket
    }

    async fn spawn_request(&self, ticket: Ticket, min_duration_minutes: u16) {
        let source = Arc::clone(&self.source);
        let sequence = Arc::clone(&self.sequence);
        let inner = Arc::clone(&self.inner);
        let invite_code = self.invite_code.clone();
        let quiet_period = self.quiet_period;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            if !sequence.is_current(ticket) {
                debug!(sequence = ticket.value(), "Superseded before sending");
                return;
            }

            let result = source.candidates(&invite_code, min_duration_minutes).await;
            let mut inner = inner.write().await;
            // update() issues and invalidates tickets while holding this lock
            if !sequence.is_current(ticket) {
                debug!(sequence = ticket.value(), "Discarding stale candidate response");
                return;
            }
            inner.snapshot.loading = false;
            match result {
                Ok(set) => {
                    inner.snapshot.status = Some(set.status);
                    inner.snapshot.appointment_name = set.appointment_name.clone();
                    inner.snapshot.error = None;
                    inner.candidates = Some((min_duration_minutes, set));
                }
                Err(error) => {
                    warn!(%error, "Candidate request failed");
                    inner.requested = None;
                    inner.candidates = None;
                    inner.snapshot.error = Some(error);
                }
            }
            inner.recompute();
        });

        let mut tasks = self.tasks.lock().await;
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
    }

    /// Current result.
    pub async fn snapshot(&self) -> RecommenderSnapshot {
        self.inner.read().await.snapshot.clone()
    }

    /// The first slots, capped at the display limit.
    pub async fn displayed(&self) -> Vec<RecommendedSlot> {
        let inner = self.inner.read().await;
        display(&inner.snapshot.recommendation.slots, self.display_limit).to_vec()
    }

    /// Waits until every scheduled request has finished or given up.
    pub async fn wait_idle(&self) {
        loop {
            let pending: Vec<_> = self.tasks.lock().await.drain(..).collect();
            if pending.is_empty() {
                return;
            }
            for task in pending {
                if let Err(error) = task.await {
                    warn!(%error, "Recommendation task ended abnormally");
                }
            }
        }
    }

    /// Stops listening: responses to outstanding requests are ignored.
    pub fn close(&self) {
        self.sequence.invalidate();
    }
}
