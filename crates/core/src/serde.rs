//! Serde helper functions for boundary payloads.
//!
//! The remote services are loose about blanks and date formats: empty
//! strings stand in for missing values and calendar dates sometimes arrive as
//! full timestamps.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize a calendar date, ignoring any time component.
/// Accepts `YYYY-MM-DD` as well as `YYYY-MM-DDTHH:MM:SS...`.
pub fn deserialize_lenient_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_lenient_date(&s).map_err(serde::de::Error::custom)
}

/// Parses the date part of a date or date-time string.
pub fn parse_lenient_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    let date_part = s.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
}
