//! HTTP client for the meetsync backend.

pub mod appointments;
pub mod calendar;

use std::sync::Arc;

use chrono::FixedOffset;
use reqwest::RequestBuilder;
use tokio::sync::RwLock;
use tracing::warn;

use crate::config::{default_offset, Config, DEFAULT_PAGE_SIZE};
use crate::error::{ClientError, Result};
use meetsync_core::source::SourceError;

/// HTTP client for the meetsync backend.
///
/// The bearer credential is shared between clones and dropped as soon as the
/// backend reports it as expired or lacking scope.
#[derive(Debug, Clone)]
pub struct MeetsyncClient {
    client: reqwest::Client,
    base_url: String,
    credential: Arc<RwLock<Option<String>>>,
    offset: FixedOffset,
    page_size: u32,
}

impl MeetsyncClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credential: Arc::new(RwLock::new(None)),
            offset: default_offset(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Create from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.base_url)
            .with_credential(config.token.clone())
            .with_offset(config.utc_offset)
            .with_page_size(config.page_size)
    }

    /// Create from environment (see [`Config::from_env`]).
    pub fn from_env() -> Self {
        Self::from_config(&Config::from_env())
    }

    pub fn with_credential(self, token: Option<String>) -> Self {
        Self {
            credential: Arc::new(RwLock::new(token)),
            ..self
        }
    }

    pub fn with_offset(self, offset: FixedOffset) -> Self {
        Self { offset, ..self }
    }

    pub fn with_page_size(self, page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            ..self
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Offset of the invite's local day.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Replace the bearer credential.
    pub async fn set_credential(&self, token: impl Into<String>) {
        *self.credential.write().await = Some(token.into());
    }

    pub async fn has_credential(&self) -> bool {
        self.credential.read().await.is_some()
    }

    /// Drop the credential. Nothing else held by callers is affected.
    pub async fn clear_credential(&self) {
        self.credential.write().await.take();
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the credential, failing if there is none.
    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let credential = self.credential.read().await;
        let token = credential.as_deref().ok_or(ClientError::MissingCredential)?;
        Ok(request.bearer_auth(token))
    }

    /// Attach the credential when one is held.
    async fn maybe_authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credential.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let response = self.check_status(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(ClientError::from)
    }

    /// Turns a non-success response into [`ClientError::ServerError`].
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ClientError::ServerError {
            status: status.as_u16(),
            body,
        })
    }

    /// Converts a client error for the source traits, dropping the credential
    /// on authentication failures.
    async fn into_source_error(&self, error: ClientError) -> SourceError {
        let error = SourceError::from(error);
        if error.requires_reauth() {
            warn!(%error, "Clearing calendar credential");
            self.clear_credential().await;
        }
        error
    }
}
