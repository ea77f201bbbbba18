use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when parsing an `HH:MM` time of day.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("Invalid time format (expected HH:MM): {0}")]
    InvalidFormat(String),
    #[error("Time of day out of range: {0}")]
    OutOfRange(String),
}

/// Validation errors for preference windows and candidate intervals.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowError {
    #[error("Duration must be positive")]
    NonPositiveDuration,
    #[error("End time must be later than start time")]
    InvertedWindow,
    #[error("Time window ({span} min) is shorter than the duration ({required} min)")]
    TooShort { span: u16, required: u16 },
    #[error("Hour must be between 0 and 24: {0}")]
    HourOutOfRange(u8),
}
