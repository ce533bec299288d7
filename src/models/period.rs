//! Calculation period model.
//!
//! A [`Period`] is the contiguous date interval over which KPIs are
//! computed, typically a calendar month.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A contiguous, inclusive `[start_date, end_date]` interval.
///
/// # Example
///
/// ```
/// use timecard_engine::models::Period;
/// use chrono::NaiveDate;
///
/// let period = Period {
///     start_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
/// };
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()));
/// assert_eq!(period.days().count(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// The start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the period (inclusive).
    pub end_date: NaiveDate,
}

impl Period {
    /// Checks if a given date falls within this period, inclusive of both
    /// endpoints.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Iterates every date in the period in chronological order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let mut current = Some(self.start_date);
        let end = self.end_date;
        std::iter::from_fn(move || {
            let date = current?;
            if date > end {
                return None;
            }
            current = date.checked_add_days(Days::new(1));
            Some(date)
        })
    }
}
