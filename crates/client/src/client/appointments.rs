//! Recommendation Source and Appointment Registry over HTTP.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::MeetsyncClient;
use crate::error::Result;
use meetsync_core::calendar::DateRange;
use meetsync_core::recommend::{CalculationStatus, CandidateInterval, CandidateSet, MinuteOfDay};
use meetsync_core::source::{self, RecommendationSource};

/// One interval of `GET /appointments/{invite}/optimal-times`.
#[derive(Debug, Clone, Deserialize)]
pub struct OptimalTimeSlot {
    #[serde(deserialize_with = "meetsync_core::serde::deserialize_lenient_date")]
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub participant_count: u32,
    #[serde(default)]
    pub total_participants: u32,
}

impl OptimalTimeSlot {
    /// Returns `None` for malformed times or an interval with `start >= end`.
    fn into_candidate(self) -> Option<CandidateInterval> {
        let start: MinuteOfDay = self.start_time.parse().ok()?;
        let end: MinuteOfDay = self.end_time.parse().ok()?;
        CandidateInterval::new(self.date, start, end)
            .map(|interval| interval.with_participants(self.participant_count, self.total_participants))
    }
}

/// Response of `GET /appointments/{invite}/optimal-times`.
#[derive(Debug, Clone, Deserialize)]
pub struct OptimalTimesResponse {
    #[serde(default)]
    pub appointment_name: Option<String>,
    #[serde(default)]
    pub total_participants: u32,
    #[serde(default)]
    pub optimal_times: Vec<OptimalTimeSlot>,
    #[serde(default)]
    pub calculation_status: CalculationStatus,
}

impl OptimalTimesResponse {
    /// Converts to a [`CandidateSet`], dropping invalid intervals.
    pub fn into_candidate_set(self) -> CandidateSet {
        let intervals = self
            .optimal_times
            .into_iter()
            .filter_map(|slot| {
                let label = format!("{} {}-{}", slot.date, slot.start_time, slot.end_time);
                let candidate = slot.into_candidate();
                if candidate.is_none() {
                    warn!(interval = %label, "Dropping invalid candidate interval");
                }
                candidate
            })
            .collect();
        CandidateSet {
            appointment_name: self.appointment_name,
            total_participants: self.total_participants,
            status: self.calculation_status,
            intervals,
        }
    }
}

/// Availability summary of one candidate date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateAvailability {
    #[serde(deserialize_with = "meetsync_core::serde::deserialize_lenient_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub available_count: u32,
    #[serde(default)]
    pub total_count: u32,
}

/// Response of `GET /appointments/{invite}/detail`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentDetail {
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub max_participants: u32,
    #[serde(default)]
    pub total_participants: u32,
    #[serde(default)]
    pub participants_with_data: u32,
    #[serde(default)]
    pub dates: Vec<DateAvailability>,
}

impl AppointmentDetail {
    /// Inclusive span of the candidate dates, if there are any.
    pub fn date_range(&self) -> Option<DateRange> {
        let first = self.dates.iter().map(|d| d.date).min()?;
        let last = self.dates.iter().map(|d| d.date).max()?;
        Some(DateRange::from_unordered(first, last))
    }
}

impl MeetsyncClient {
    /// Fetch candidate intervals for an invite.
    pub async fn optimal_times(
        &self,
        invite_code: &str,
        min_duration_minutes: u16,
    ) -> Result<OptimalTimesResponse> {
        let path = format!(
            "/appointments/{}/optimal-times",
            urlencoding::encode(invite_code)
        );
        let request = self
            .client
            .get(self.url(&path))
            .query(&[("min_duration_minutes", min_duration_minutes)]);
        let response = self.maybe_authorized(request).await.send().await?;
        self.handle_response(response).await
    }

    /// Fetch an appointment's candidate dates.
    pub async fn appointment_detail(&self, invite_code: &str) -> Result<AppointmentDetail> {
        let path = format!("/appointments/{}/detail", urlencoding::encode(invite_code));
        let request = self.client.get(self.url(&path));
        let response = self.maybe_authorized(request).await.send().await?;
        self.handle_response(response).await
    }
}

#[async_trait]
impl RecommendationSource for MeetsyncClient {
    async fn candidates(
        &self,
        invite_code: &str,
        min_duration_minutes: u16,
    ) -> source::Result<CandidateSet> {
        match self.optimal_times(invite_code, min_duration_minutes).await {
            Ok(response) => Ok(response.into_candidate_set()),
            Err(error) => Err(self.into_source_error(error).await),
        }
    }
}
