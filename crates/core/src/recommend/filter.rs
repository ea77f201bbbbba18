use serde::Serialize;

use super::{CandidateInterval, PreferenceWindow, RecommendedSlot, WindowError};

/// Number of slots shown when the caller does not choose a limit.
pub const DEFAULT_DISPLAY_LIMIT: usize = 5;

/// Output of [`recommend`]: the slots, or an empty list plus the reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub slots: Vec<RecommendedSlot>,
    pub message: Option<WindowError>,
}

impl Recommendation {
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Checks that the window can hold a meeting of the requested duration.
pub fn validate(window: &PreferenceWindow) -> Result<(), WindowError> {
    if window.min_duration == 0 {
        return Err(WindowError::NonPositiveDuration);
    }
    if window.end <= window.start {
        return Err(WindowError::InvertedWindow);
    }
    let span = window.span_minutes();
    if span < window.min_duration {
        return Err(WindowError::TooShort {
            span,
            required: window.min_duration,
        });
    }
    Ok(())
}

/// Clips each candidate to the window and keeps the earliest slot that fits.
///
/// Candidates whose overlap with the window is shorter than the requested
/// duration are dropped. Output order follows input order.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use meetsync_core::recommend::{filter, CandidateInterval, PreferenceWindow};
///
/// let date = NaiveDate::from_ymd_opt(2025, 12, 10).unwrap();
/// let candidate =
///     CandidateInterval::new(date, "09:00".parse().unwrap(), "12:00".parse().unwrap()).unwrap();
/// let window = PreferenceWindow::new(60, "10:00".parse().unwrap(), "11:30".parse().unwrap());
///
/// let slots = filter(&[candidate], &window);
/// assert_eq!(slots[0].to_string(), "2025-12-10 10:00-11:00");
/// ```
pub fn filter(candidates: &[CandidateInterval], window: &PreferenceWindow) -> Vec<RecommendedSlot> {
    let required = window.min_duration;
    if required == 0 {
        return Vec::new();
    }

    candidates
        .iter()
        .filter_map(|candidate| {
            let start = candidate.start.max(window.start);
            let end = candidate.end.min(window.end);
            if end.minutes_since(start) < required {
                return None;
            }
            let slot_end = start.checked_add(required)?;
            Some(RecommendedSlot {
                date: candidate.date,
                start,
                end: slot_end,
                duration_minutes: required,
                participant_count: candidate.participant_count,
                total_participants: candidate.total_participants,
            })
        })
        .collect()
}

/// Validates the window, then filters. An invalid window yields no slots.
pub fn recommend(candidates: &[CandidateInterval], window: &PreferenceWindow) -> Recommendation {
    match validate(window) {
        Ok(()) => Recommendation {
            slots: filter(candidates, window),
            message: None,
        },
        Err(error) => Recommendation {
            slots: Vec::new(),
            message: Some(error),
        },
    }
}

/// The first `limit` slots, in their existing order.
pub fn display(slots: &[RecommendedSlot], limit: usize) -> &[RecommendedSlot] {
    &slots[..slots.len().min(limit)]
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::recommend::MinuteOfDay;

    fn t(s: &str) -> MinuteOfDay {
        s.parse().unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, d).unwrap()
    }

    fn candidate(d: u32, start: &str, end: &str) -> CandidateInterval {
        CandidateInterval::new(day(d), t(start), t(end)).unwrap()
    }

    fn window(duration: u16, start: &str, end: &str) -> PreferenceWindow {
        PreferenceWindow::new(duration, t(start), t(end))
    }

    #[test]
    fn test_filter_clips_to_window_earliest_fit() {
        let slots = filter(&[candidate(10, "09:00", "12:00")], &window(60, "10:00", "11:30"));
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].date, day(10));
        assert_eq!(slots[0].start, t("10:00"));
        assert_eq!(slots[0].end, t("11:00"));
        assert_eq!(slots[0].duration_minutes, 60);
    }

    #[test]
    fn test_filter_drops_short_candidate() {
        let slots = filter(&[candidate(10, "09:00", "09:30")], &window(60, "00:00", "24:00"));
        assert!(slots.is_empty());
    }

    #[test]
    fn test_filter_drops_candidate_outside_window() {
        let slots = filter(&[candidate(10, "07:00", "09:00")], &window(30, "10:00", "18:00"));
        assert!(slots.is_empty());
    }

    #[test]
    fn test_filter_exact_fit_is_kept() {
        let slots = filter(&[candidate(10, "13:00", "14:00")], &window(60, "09:00", "18:00"));
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start, t("13:00"));
        assert_eq!(slots[0].end, t("14:00"));
    }

    #[test]
    fn test_filter_preserves_source_order() {
        let candidates = [
            candidate(12, "09:00", "10:00"),
            candidate(10, "15:00", "17:00"),
            candidate(11, "08:00", "08:30"),
            candidate(10, "09:00", "11:00"),
        ];
        let slots = filter(&candidates, &window(60, "09:00", "18:00"));
        let dates: Vec<_> = slots.iter().map(|s| (s.date, s.start)).collect();
        assert_eq!(
            dates,
            vec![
                (day(12), t("09:00")),
                (day(10), t("15:00")),
                (day(10), t("09:00")),
            ]
        );
    }

    #[test]
    fn test_filter_slots_stay_inside_candidate_and_window() {
        let candidates = [
            candidate(10, "00:00", "24:00"),
            candidate(11, "08:15", "10:45"),
            candidate(12, "16:30", "23:00"),
        ];
        let window = window(45, "08:30", "17:30");
        for slot in filter(&candidates, &window) {
            let source = candidates.iter().find(|c| c.date == slot.date).unwrap();
            assert_eq!(slot.end.minutes_since(slot.start), 45);
            assert!(slot.start >= source.start && slot.end <= source.end);
            assert!(slot.start >= window.start && slot.end <= window.end);
        }
    }

    #[test]
    fn test_filter_passes_participant_metadata() {
        let interval = candidate(10, "09:00", "12:00").with_participants(2, 3);
        let slots = filter(&[interval], &window(30, "09:00", "12:00"));
        assert_eq!(slots[0].participant_count, 2);
        assert_eq!(slots[0].total_participants, 3);
    }

    #[test]
    fn test_validate_rejects_inverted_window() {
        assert_eq!(
            validate(&window(60, "12:00", "12:00")),
            Err(WindowError::InvertedWindow)
        );
        assert_eq!(
            validate(&window(60, "14:00", "09:00")),
            Err(WindowError::InvertedWindow)
        );
    }

    #[test]
    fn test_validate_rejects_short_window() {
        assert_eq!(
            validate(&window(120, "09:00", "10:00")),
            Err(WindowError::TooShort {
                span: 60,
                required: 120
            })
        );
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        assert_eq!(
            validate(&window(0, "09:00", "10:00")),
            Err(WindowError::NonPositiveDuration)
        );
    }

    #[test]
    fn test_recommend_invalid_window_yields_empty_with_message() {
        let result = recommend(&[candidate(10, "09:00", "12:00")], &window(60, "11:00", "10:00"));
        assert!(result.is_empty());
        assert_eq!(result.message, Some(WindowError::InvertedWindow));
    }

    #[test]
    fn test_recommend_valid_window() {
        let result = recommend(&[candidate(10, "09:00", "12:00")], &window(60, "10:00", "11:30"));
        assert_eq!(result.slots.len(), 1);
        assert!(result.message.is_none());
    }

    #[test]
    fn test_display_caps_without_reordering() {
        let candidates: Vec<_> = (1..=8).rev().map(|d| candidate(d, "09:00", "10:00")).collect();
        let slots = filter(&candidates, &window(60, "09:00", "10:00"));
        let shown = display(&slots, DEFAULT_DISPLAY_LIMIT);
        assert_eq!(shown.len(), 5);
        assert_eq!(shown[0].date, day(8));
        assert_eq!(shown[4].date, day(4));
        assert_eq!(display(&slots[..2], DEFAULT_DISPLAY_LIMIT).len(), 2);
    }
}
