use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::DateRangeError;

/// A date range with inclusive start and end dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Creates a range from two dates given in any order.
    pub fn from_unordered(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A range covering exactly one day.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Creates a date range for an entire month.
    ///
    /// Returns `None` if the year/month combination is invalid.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = start.checked_add_months(chrono::Months::new(1))?.pred_opt()?;
        Some(Self { start, end })
    }

    /// Returns true if `date` falls inside the range (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns true if the two ranges share at least one day.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Number of days in the range, counting both ends.
    pub fn len_days(&self) -> u64 {
        (self.end - self.start).num_days().unsigned_abs() + 1
    }

    /// Iterates every day of the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Extends the end of the range by `days`, saturating at the calendar limit.
    pub fn extend_end(self, days: u64) -> Self {
        let end = self
            .end
            .checked_add_days(Days::new(days))
            .unwrap_or(NaiveDate::MAX);
        Self { end, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_range_construction() {
        let range = DateRange::new(date(2025, 12, 1), date(2025, 12, 31)).unwrap();

        assert_eq!(range.start, date(2025, 12, 1));
        assert_eq!(range.end, date(2025, 12, 31));
    }

    #[test]
    fn test_invalid_range_returns_error() {
        let result = DateRange::new(date(2025, 12, 31), date(2025, 12, 1));

        assert_eq!(result, Err(DateRangeError::InvalidRange));
    }

    #[test]
    fn test_from_unordered_swaps_reversed_dates() {
        let range = DateRange::from_unordered(date(2025, 12, 10), date(2025, 12, 7));

        assert_eq!(range.start, date(2025, 12, 7));
        assert_eq!(range.end, date(2025, 12, 10));
    }

    #[test]
    fn test_month_factory_february_leap_year() {
        let range = DateRange::month(2024, 2).unwrap();

        assert_eq!(range.start, date(2024, 2, 1));
        assert_eq!(range.end, date(2024, 2, 29));
    }

    #[test]
    fn test_month_factory_december() {
        let range = DateRange::month(2025, 12).unwrap();

        assert_eq!(range.end, date(2025, 12, 31));
    }

    #[test]
    fn test_month_factory_invalid_month() {
        assert!(DateRange::month(2025, 13).is_none());
    }

    #[test]
    fn test_days_iterates_inclusive_range() {
        let range = DateRange::new(date(2025, 12, 30), date(2026, 1, 2)).unwrap();
        let days: Vec<_> = range.days().collect();

        assert_eq!(
            days,
            vec![
                date(2025, 12, 30),
                date(2025, 12, 31),
                date(2026, 1, 1),
                date(2026, 1, 2)
            ]
        );
        assert_eq!(range.len_days(), 4);
    }

    #[test]
    fn test_contains_and_overlaps() {
        let range = DateRange::new(date(2025, 12, 10), date(2025, 12, 12)).unwrap();

        assert!(range.contains(date(2025, 12, 10)));
        assert!(range.contains(date(2025, 12, 12)));
        assert!(!range.contains(date(2025, 12, 13)));
        assert!(range.overlaps(&DateRange::single(date(2025, 12, 12))));
        assert!(!range.overlaps(&DateRange::single(date(2025, 12, 9))));
    }
}
