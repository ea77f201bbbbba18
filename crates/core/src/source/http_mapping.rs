//! Pure functions for mapping HTTP failures to [`SourceError`] kinds.

use serde::Deserialize;

use super::SourceError;

/// Error codes that mean the calendar credential must be renewed.
pub const AUTH_ERROR_CODES: &[&str] = &[
    "google_reauth_required",
    "calendar_scope_missing",
    "insufficient_scope",
];

/// Error bodies come either as `{"code": ...}` or `{"detail": ...}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Maps a non-success HTTP status and its body to a [`SourceError`].
///
/// - `401` -> `Auth`
/// - `400`/`403` carrying one of [`AUTH_ERROR_CODES`] -> `Auth`
/// - everything else (`429`, `5xx`, other `4xx`) -> `Transient`
///
/// # Examples
///
/// ```
/// use meetsync_core::source::status_to_source_error;
///
/// let error = status_to_source_error(403, r#"{"code": "insufficient_scope"}"#);
/// assert!(error.requires_reauth());
///
/// let error = status_to_source_error(503, "upstream down");
/// assert!(error.is_retryable());
/// ```
pub fn status_to_source_error(status: u16, body: &str) -> SourceError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let detail = parsed.detail.as_ref().and_then(|detail| match detail {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    });
    let code = parsed.code.or_else(|| detail.clone());

    if status == 401 {
        return SourceError::auth(code.unwrap_or_else(|| "unauthorized".to_string()));
    }

    if let Some(code) = code
        .as_deref()
        .filter(|code| AUTH_ERROR_CODES.contains(code))
    {
        if status == 400 || status == 403 {
            return SourceError::auth(code);
        }
    }

    let message = detail
        .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
        .unwrap_or_else(|| format!("HTTP {status}"));
    SourceError::Transient {
        status: Some(status),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_401_maps_to_auth() {
        let error = status_to_source_error(401, r#"{"code": "google_reauth_required"}"#);
        assert_eq!(error, SourceError::auth("google_reauth_required"));
    }

    #[test]
    fn test_401_without_body_maps_to_auth() {
        let error = status_to_source_error(401, "");
        assert_eq!(error, SourceError::auth("unauthorized"));
    }

    #[test]
    fn test_scope_missing_maps_to_auth() {
        let error = status_to_source_error(400, r#"{"code": "calendar_scope_missing"}"#);
        assert!(error.requires_reauth());
    }

    #[test]
    fn test_plain_400_maps_to_transient() {
        let error = status_to_source_error(400, r#"{"detail": "bad page token"}"#);
        assert_eq!(
            error,
            SourceError::Transient {
                status: Some(400),
                message: "bad page token".to_string()
            }
        );
    }

    #[test]
    fn test_429_maps_to_transient() {
        let error = status_to_source_error(429, r#"{"detail": "rate_limited"}"#);
        assert!(error.is_retryable());
        assert_eq!(error.status(), Some(429));
    }

    #[test]
    fn test_500_with_text_body_keeps_message() {
        let error = status_to_source_error(500, "boom");
        assert_eq!(error.to_string(), "Remote call failed: boom");
    }

    #[test]
    fn test_empty_body_falls_back_to_status() {
        let error = status_to_source_error(502, "  ");
        assert_eq!(error.to_string(), "Remote call failed: HTTP 502");
    }
}
