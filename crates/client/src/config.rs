use std::{env, time::Duration};

use chrono::{FixedOffset, Offset, Utc};

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL (default: "http://localhost:8000")
    pub base_url: String,
    /// Bearer credential for calendar calls, if any
    pub token: Option<String>,
    /// Offset of the invite's local day (default: +09:00)
    pub utc_offset: FixedOffset,
    /// Events requested per page when loading the base (default: 50)
    pub page_size: u32,
    /// Quiet period before a recommendation request is sent (default: 300)
    pub debounce_ms: u64,
    /// Recommended slots shown at once (default: 5)
    pub display_limit: usize,
}

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MEETSYNC_URL` - Backend base URL (default: "http://localhost:8000")
    /// - `MEETSYNC_TOKEN` - Bearer credential (default: none)
    /// - `MEETSYNC_UTC_OFFSET` - Local day offset such as `+09:00` (default: +09:00)
    /// - `MEETSYNC_PAGE_SIZE` - Page size for event listing (default: 50)
    /// - `MEETSYNC_DEBOUNCE_MS` - Recommendation debounce (default: 300)
    /// - `MEETSYNC_DISPLAY_LIMIT` - Slots shown (default: 5)
    ///
    /// Malformed values fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("MEETSYNC_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            token: env::var("MEETSYNC_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            utc_offset: env::var("MEETSYNC_UTC_OFFSET")
                .ok()
                .and_then(|v| parse_utc_offset(&v))
                .unwrap_or_else(default_offset),
            page_size: env::var("MEETSYNC_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            debounce_ms: env::var("MEETSYNC_DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DEBOUNCE_MS),
            display_limit: env::var("MEETSYNC_DISPLAY_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(meetsync_core::recommend::DEFAULT_DISPLAY_LIMIT),
        }
    }

    /// Get the debounce period as a Duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            utc_offset: default_offset(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            display_limit: meetsync_core::recommend::DEFAULT_DISPLAY_LIMIT,
        }
    }
}

/// The invite's local day is Korea Standard Time unless configured otherwise.
pub fn default_offset() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap_or_else(|| Utc.fix())
}

/// Parses `+HH:MM`, `-HH:MM` or `Z`.
pub fn parse_utc_offset(value: &str) -> Option<FixedOffset> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("z") || value.eq_ignore_ascii_case("utc") {
        return Some(Utc.fix());
    }
    let (sign, rest) = match value.as_bytes().first()? {
        b'+' => (1, &value[1..]),
        b'-' => (-1, &value[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':')?;
    let hours = offset_field(hours).filter(|h| *h <= 23)?;
    let minutes = offset_field(minutes).filter(|m| *m < 60)?;
    FixedOffset::east_opt(sign * (i32::from(hours) * 3600 + i32::from(minutes) * 60))
}

/// One or two ASCII digits; signs and whitespace are rejected.
fn offset_field(field: &str) -> Option<u8> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
