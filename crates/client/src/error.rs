//! Client error types.

use meetsync_core::source::{status_to_source_error, SourceError};
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No calendar credential; sign in again")]
    MissingCredential,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ClientError> for SourceError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::ServerError { status, body } => status_to_source_error(status, &body),
            ClientError::MissingCredential => SourceError::auth("missing_credential"),
            ClientError::Request(error) => SourceError::Transient {
                status: error.status().map(|status| status.as_u16()),
                message: error.to_string(),
            },
            other => SourceError::transient(other.to_string()),
        }
    }
}
