use serde::Serialize;
use thiserror::Error;

use super::{SyncReport, SyncStage};
use crate::calendar::{EventError, EventId};
use crate::source::SourceError;

/// Errors from overlay operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OverlayError {
    #[error("Event not found: {0}")]
    UnknownEvent(EventId),
    #[error(transparent)]
    Validation(#[from] EventError),
    #[error(transparent)]
    Remote(#[from] SourceError),
}

impl OverlayError {
    /// Returns true if the caller must re-authenticate before continuing.
    pub fn requires_reauth(&self) -> bool {
        matches!(self, OverlayError::Remote(error) if error.requires_reauth())
    }
}

/// A sync that stopped early. `report` tells which mutations were confirmed
/// before the failure and which are still pending.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[error("Sync failed during {stage}: {error}")]
pub struct SyncFailure {
    pub report: SyncReport,
    pub stage: SyncStage,
    pub error: SourceError,
}

impl SyncFailure {
    pub fn requires_reauth(&self) -> bool {
        self.error.requires_reauth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::RemoteId;

    #[test]
    fn test_overlay_error_display() {
        let error = OverlayError::UnknownEvent(EventId::Remote(RemoteId::new("evt-1")));
        assert_eq!(error.to_string(), "Event not found: evt-1");
        assert_eq!(
            OverlayError::from(EventError::EmptyTitle).to_string(),
            "Event title cannot be empty"
        );
    }

    #[test]
    fn test_requires_reauth() {
        assert!(OverlayError::from(SourceError::auth("expired")).requires_reauth());
        assert!(!OverlayError::from(SourceError::transient("timeout")).requires_reauth());
    }

    #[test]
    fn test_sync_failure_display() {
        let failure = SyncFailure {
            report: SyncReport::default(),
            stage: SyncStage::Create,
            error: SourceError::transient("timeout"),
        };
        assert_eq!(
            failure.to_string(),
            "Sync failed during create: Remote call failed: timeout"
        );
    }
}
