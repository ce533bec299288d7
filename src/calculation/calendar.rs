//! Working-calendar helpers.
//!
//! Business-day and rest-day counts for the month that anchors a KPI
//! computation. The base hourly rate divides the salary by the month's
//! business days times the contracted daily hours, and the DSR owed over
//! overtime is prorated on the month's rest days.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::config::EngineConfig;

/// Counts the business days (Mon-Fri, national holidays excluded) of the
/// given month.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::business_days_in_month;
/// use timecard_engine::config::EngineConfig;
///
/// let config = EngineConfig::default();
/// // June 2026 has 22 weekdays and no national holidays.
/// assert_eq!(business_days_in_month(2026, 6, &config), 22);
/// // January 2026 has 22 weekdays; Jan 1 is a holiday on a Thursday.
/// assert_eq!(business_days_in_month(2026, 1, &config), 21);
/// ```
pub fn business_days_in_month(year: i32, month: u32, config: &EngineConfig) -> u32 {
    month_days(year, month)
        .filter(|d| is_weekday(*d) && !config.is_national_holiday(*d))
        .count() as u32
}

/// Counts the paid rest days of the given month: Sundays plus national
/// holidays that fall on a weekday.
pub fn rest_days_in_month(year: i32, month: u32, config: &EngineConfig) -> u32 {
    month_days(year, month)
        .filter(|d| {
            d.weekday() == Weekday::Sun || (is_weekday(*d) && config.is_national_holiday(*d))
        })
        .count() as u32
}

fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn month_days(year: i32, month: u32) -> impl Iterator<Item = NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let mut current = first;
    std::iter::from_fn(move || {
        let date = current?;
        if date.month() != month {
            return None;
        }
        current = date.checked_add_days(Days::new(1));
        Some(date)
    })
}
