use std::fmt;

use serde::Serialize;

use crate::calendar::{CalendarEvent, LocalId, RemoteId};

/// One unsubmitted change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingMutation {
    /// A locally created event awaiting creation.
    Add(CalendarEvent),
    /// A remote event awaiting deletion.
    Remove(RemoteId),
}

/// Snapshot of the pending queues, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub deletes: Vec<RemoteId>,
    pub creates: Vec<CalendarEvent>,
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty() && self.creates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.deletes.len() + self.creates.len()
    }

    /// Deletes first, then creates.
    pub fn mutations(&self) -> impl Iterator<Item = PendingMutation> + '_ {
        self.deletes
            .iter()
            .cloned()
            .map(PendingMutation::Remove)
            .chain(self.creates.iter().cloned().map(PendingMutation::Add))
    }
}

/// Phase of a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStage {
    Delete,
    Create,
    Reload,
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SyncStage::Delete => "delete",
            SyncStage::Create => "create",
            SyncStage::Reload => "reload",
        })
    }
}

/// A temporary id and the remote id it was created under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedEvent {
    pub local: LocalId,
    pub remote: RemoteId,
}

/// What a sync run achieved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub deleted: Vec<RemoteId>,
    pub created: Vec<CreatedEvent>,
    /// Deletes still pending after the run.
    pub remaining_deletes: Vec<RemoteId>,
    /// Creates still pending after the run.
    pub remaining_creates: Vec<LocalId>,
    /// Whether the base was reloaded from the remote source.
    pub reloaded: bool,
}

impl SyncReport {
    /// Returns true if nothing is left for a retry.
    pub fn is_complete(&self) -> bool {
        self.remaining_deletes.is_empty() && self.remaining_creates.is_empty()
    }

    pub fn confirmed(&self) -> usize {
        self.deleted.len() + self.created.len()
    }
}
