use serde::Serialize;
use thiserror::Error;

/// Failure of a call to a calendar or recommendation source.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceError {
    /// Network or server failure. Retryable; local state is kept.
    #[error("Remote call failed: {message}")]
    Transient {
        status: Option<u16>,
        message: String,
    },
    /// Missing or expired credential. The caller must re-authenticate.
    #[error("Authentication required: {reason}")]
    Auth { reason: String },
}

impl SourceError {
    pub fn transient(message: impl Into<String>) -> Self {
        SourceError::Transient {
            status: None,
            message: message.into(),
        }
    }

    pub fn auth(reason: impl Into<String>) -> Self {
        SourceError::Auth {
            reason: reason.into(),
        }
    }

    /// Returns true if retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SourceError::Transient { .. })
    }

    /// Returns true if the flow must stop until the user signs in again.
    pub fn requires_reauth(&self) -> bool {
        matches!(self, SourceError::Auth { .. })
    }

    /// HTTP status reported by the source, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            SourceError::Transient { status, .. } => *status,
            SourceError::Auth { .. } => None,
        }
    }
}

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
