use tracing::debug;

use super::{OverlayError, SyncPlan};
use crate::calendar::{CalendarEvent, EventDraft, EventError, EventId, LocalId, RemoteId};

/// What [`OverlayState::remove_local`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalKind {
    /// The event only existed locally; it was dropped with no remote effect.
    CancelledAdd,
    /// The remote event was queued for deletion.
    QueuedDelete,
}

/// Base events plus the pending add and remove queues.
///
/// `pending_add` only ever holds events with a [`LocalId`] and
/// `pending_remove` only [`RemoteId`]s, so an id cannot sit in both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayState {
    base: Vec<CalendarEvent>,
    pending_add: Vec<CalendarEvent>,
    pending_remove: Vec<RemoteId>,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state with `events` as base and nothing pending.
    pub fn with_base(events: Vec<CalendarEvent>) -> Self {
        let mut state = Self::new();
        state.replace_base(events);
        state
    }

    /// Replaces the base, keeping both pending queues.
    ///
    /// Events without a remote identity are not remote truth and are ignored,
    /// as are repeated ids.
    pub fn replace_base(&mut self, events: Vec<CalendarEvent>) {
        let mut base: Vec<CalendarEvent> = Vec::with_capacity(events.len());
        for event in events {
            if event.id.is_local() {
                debug!(id = %event.id, "Ignoring local event in base");
                continue;
            }
            if base.iter().any(|existing| existing.id == event.id) {
                debug!(id = %event.id, "Ignoring duplicate event in base");
                continue;
            }
            base.push(event);
        }
        self.base = base;
    }

    pub fn base(&self) -> &[CalendarEvent] {
        &self.base
    }

    pub fn pending_adds(&self) -> &[CalendarEvent] {
        &self.pending_add
    }

    pub fn pending_removes(&self) -> &[RemoteId] {
        &self.pending_remove
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_add.is_empty() || !self.pending_remove.is_empty()
    }

    fn is_pending_remove(&self, id: &RemoteId) -> bool {
        self.pending_remove.contains(id)
    }

    /// The events to render: base minus pending removes, then pending adds.
    pub fn effective_view(&self) -> Vec<&CalendarEvent> {
        self.base
            .iter()
            .filter(|event| {
                event
                    .id
                    .as_remote()
                    .is_none_or(|id| !self.is_pending_remove(id))
            })
            .chain(self.pending_add.iter())
            .collect()
    }

    /// Looks an id up in the effective view.
    pub fn get(&self, id: &EventId) -> Option<&CalendarEvent> {
        match id {
            EventId::Local(_) => self.pending_add.iter().find(|event| &event.id == id),
            EventId::Remote(remote) if self.is_pending_remove(remote) => None,
            EventId::Remote(_) => self.base.iter().find(|event| &event.id == id),
        }
    }

    pub fn contains(&self, id: &EventId) -> bool {
        self.get(id).is_some()
    }

    /// Adds an event under a fresh temporary id.
    pub fn add_local(&mut self, draft: EventDraft) -> Result<LocalId, EventError> {
        draft.validate()?;
        let id = LocalId::generate();
        debug!(%id, title = %draft.title, "Queued local add");
        self.pending_add.push(draft.into_event(id));
        Ok(id)
    }

    /// Removes an event from the effective view.
    ///
    /// A local event is simply dropped. A remote event is queued for deletion.
    pub fn remove_local(&mut self, id: &EventId) -> Result<RemovalKind, OverlayError> {
        match id {
            EventId::Local(_) => {
                let index = self
                    .pending_add
                    .iter()
                    .position(|event| &event.id == id)
                    .ok_or_else(|| OverlayError::UnknownEvent(id.clone()))?;
                self.pending_add.remove(index);
                debug!(%id, "Cancelled local add");
                Ok(RemovalKind::CancelledAdd)
            }
            EventId::Remote(remote) => {
                if !self.contains(id) {
                    return Err(OverlayError::UnknownEvent(id.clone()));
                }
                self.pending_remove.push(remote.clone());
                debug!(%id, "Queued remote delete");
                Ok(RemovalKind::QueuedDelete)
            }
        }
    }

    /// Removes several events at once. Nothing changes unless every id is
    /// present in the effective view.
    pub fn remove_many(&mut self, ids: &[EventId]) -> Result<Vec<RemovalKind>, OverlayError> {
        let mut unique: Vec<&EventId> = Vec::with_capacity(ids.len());
        for id in ids {
            if !self.contains(id) {
                return Err(OverlayError::UnknownEvent(id.clone()));
            }
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        unique.into_iter().map(|id| self.remove_local(id)).collect()
    }

    /// Replaces an event with an edited copy under a new temporary id.
    ///
    /// Editing a remote event therefore results in a delete and a create at
    /// sync time.
    pub fn edit_local(&mut self, id: &EventId, draft: EventDraft) -> Result<LocalId, OverlayError> {
        draft.validate()?;
        self.remove_local(id)?;
        Ok(self.add_local(draft)?)
    }

    /// Snapshot of what a sync has to do.
    pub fn sync_plan(&self) -> SyncPlan {
        SyncPlan {
            deletes: self.pending_remove.clone(),
            creates: self.pending_add.clone(),
        }
    }

    /// Records a delete the remote source has confirmed.
    pub fn confirm_delete(&mut self, id: &RemoteId) {
        self.pending_remove.retain(|pending| pending != id);
        self.base
            .retain(|event| event.id.as_remote().is_none_or(|remote| remote != id));
    }

    /// Records a create the remote source has confirmed, moving the event
    /// from the pending queue into the base under its remote identity.
    pub fn confirm_create(&mut self, local: LocalId, created: CalendarEvent) {
        let local_id = EventId::Local(local);
        self.pending_add.retain(|event| event.id != local_id);
        if created.id.is_local() {
            return;
        }
        match self.base.iter_mut().find(|event| event.id == created.id) {
            Some(existing) => *existing = created,
            None => self.base.push(created),
        }
    }

    /// Drops both pending queues.
    pub fn clear_pending(&mut self) {
        self.pending_add.clear();
        self.pending_remove.clear();
    }
}
