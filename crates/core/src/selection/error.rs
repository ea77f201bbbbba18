use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// User-facing warnings produced while painting dates.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectionWarning {
    #[error("Past dates cannot be selected: {0}")]
    PastDate(NaiveDate),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_warning_display() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(
            SelectionWarning::PastDate(date).to_string(),
            "Past dates cannot be selected: 2025-12-01"
        );
    }
}
