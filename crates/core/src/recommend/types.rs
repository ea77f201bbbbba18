use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{MinuteOfDay, WindowError};

/// A span `[start, end)` on `date` during which the participants are free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateInterval {
    #[serde(deserialize_with = "crate::serde::deserialize_lenient_date")]
    pub date: NaiveDate,
    pub start: MinuteOfDay,
    pub end: MinuteOfDay,
    #[serde(default)]
    pub participant_count: u32,
    #[serde(default)]
    pub total_participants: u32,
}

impl CandidateInterval {
    /// Returns `None` unless `start < end`.
    pub fn new(date: NaiveDate, start: MinuteOfDay, end: MinuteOfDay) -> Option<Self> {
        (start < end).then_some(Self {
            date,
            start,
            end,
            participant_count: 0,
            total_participants: 0,
        })
    }

    pub fn with_participants(mut self, count: u32, total: u32) -> Self {
        self.participant_count = count;
        self.total_participants = total;
        self
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes_since(self.start)
    }
}

/// Minimum meeting length and the preferred time-of-day range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceWindow {
    pub min_duration: u16,
    pub start: MinuteOfDay,
    pub end: MinuteOfDay,
}

impl PreferenceWindow {
    pub fn new(min_duration: u16, start: MinuteOfDay, end: MinuteOfDay) -> Self {
        Self {
            min_duration,
            start,
            end,
        }
    }

    /// Builds a window from hour-based input, rounding the duration to whole minutes.
    ///
    /// Only the units are checked here; ordering and span are left to
    /// [`validate`](super::validate) so the caller gets a single message.
    pub fn from_hours(duration_hours: f64, start_hour: u8, end_hour: u8) -> Result<Self, WindowError> {
        let minutes = (duration_hours * 60.0).round();
        if !minutes.is_finite() || minutes < 1.0 {
            return Err(WindowError::NonPositiveDuration);
        }
        let start =
            MinuteOfDay::from_hour(start_hour).ok_or(WindowError::HourOutOfRange(start_hour))?;
        let end = MinuteOfDay::from_hour(end_hour).ok_or(WindowError::HourOutOfRange(end_hour))?;
        // anything longer than a day can never fit anyway
        let min_duration = minutes.min(f64::from(u16::MAX)) as u16;
        Ok(Self::new(min_duration, start, end))
    }

    pub fn span_minutes(&self) -> u16 {
        self.end.minutes_since(self.start)
    }
}

/// A concrete proposal of exactly the requested duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendedSlot {
    pub date: NaiveDate,
    pub start: MinuteOfDay,
    pub end: MinuteOfDay,
    pub duration_minutes: u16,
    pub participant_count: u32,
    pub total_participants: u32,
}

impl fmt::Display for RecommendedSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.date, self.start, self.end)
    }
}

/// How far the server got analysing participant availability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationStatus {
    #[default]
    NoData,
    Partial,
    Complete,
}

/// Candidate intervals for one invite, in the order the server returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSet {
    pub appointment_name: Option<String>,
    pub total_participants: u32,
    pub status: CalculationStatus,
    pub intervals: Vec<CandidateInterval>,
}
