use chrono::{Datelike, Days, NaiveDate};

/// Weeks shown for any month.
const GRID_WEEKS: usize = 6;

/// Returns the 6x7 Sunday-first grid of dates displayed for a month.
///
/// The grid starts on the Sunday on or before the first of the month and
/// always holds 42 consecutive days, so leading and trailing days belong to
/// the neighbouring months. Returns `None` for an invalid year/month.
pub fn month_grid(year: i32, month: u32) -> Option<Vec<[NaiveDate; 7]>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let lead = u64::from(first.weekday().num_days_from_sunday());
    let mut day = first.checked_sub_days(Days::new(lead))?;

    let mut weeks = Vec::with_capacity(GRID_WEEKS);
    for _ in 0..GRID_WEEKS {
        let mut week = [day; 7];
        for slot in week.iter_mut() {
            *slot = day;
            day = day.succ_opt()?;
        }
        weeks.push(week);
    }
    Some(weeks)
}
