//! Configuration types for the KPI engine.
//!
//! All the tunables the labor rules depend on live here rather than as
//! constants inside the normalizer or the engine: the tolerance window, the
//! DSR week start, the overtime premiums, the national holiday calendar
//! and the fallback contracted day.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which day a DSR assessment week starts on.
///
/// Sunday-start is the default and the CLT art. 67 reading; Monday-start is
/// supported for employers that contract around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    /// Weeks run Sunday through Saturday.
    #[default]
    Sunday,
    /// Weeks run Monday through Sunday.
    Monday,
}

/// A recurring national holiday as a (month, day) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayDate {
    /// Month, 1-12.
    pub month: u32,
    /// Day of month.
    pub day: u32,
}

/// The process-wide engine configuration.
///
/// Loaded once at init and refreshable without restart through
/// [`SharedConfig`](crate::config::SharedConfig). Every field has a
/// compiled-in default so a partial file (or no file at all) still yields a
/// working configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Symmetric per-side tolerance in minutes (default 10).
    #[serde(default = "default_tolerance_minutes")]
    pub tolerance_minutes: u32,
    /// Week-start convention for the DSR calculator.
    #[serde(default)]
    pub dsr_week_start: WeekStart,
    /// Overtime premium percentage for Saturday work (default 50).
    #[serde(default = "default_pct_saturday")]
    pub overtime_pct_saturday: Decimal,
    /// Overtime premium percentage for Sunday and holiday work (default 100).
    #[serde(default = "default_pct_sunday_holiday")]
    pub overtime_pct_sunday_holiday: Decimal,
    /// Contracted daily hours used when no schedule is assigned.
    #[serde(default = "default_daily_hours")]
    pub default_daily_hours: Decimal,
    /// Fixed national holidays as (month, day) pairs.
    #[serde(default = "default_national_holidays")]
    pub national_holidays: Vec<HolidayDate>,
}

fn default_tolerance_minutes() -> u32 {
    10
}

fn default_pct_saturday() -> Decimal {
    Decimal::from(50)
}

fn default_pct_sunday_holiday() -> Decimal {
    Decimal::from(100)
}

fn default_daily_hours() -> Decimal {
    Decimal::new(88, 1)
}

fn default_national_holidays() -> Vec<HolidayDate> {
    // The eight fixed Brazilian national holidays.
    [
        (1, 1),
        (4, 21),
        (5, 1),
        (9, 7),
        (10, 12),
        (11, 2),
        (11, 15),
        (12, 25),
    ]
    .into_iter()
    .map(|(month, day)| HolidayDate { month, day })
    .collect()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerance_minutes: default_tolerance_minutes(),
            dsr_week_start: WeekStart::Sunday,
            overtime_pct_saturday: default_pct_saturday(),
            overtime_pct_sunday_holiday: default_pct_sunday_holiday(),
            default_daily_hours: default_daily_hours(),
            national_holidays: default_national_holidays(),
        }
    }
}

impl EngineConfig {
    /// Returns true when the date is a configured national holiday.
    ///
    /// # Example
    ///
    /// ```
    /// use timecard_engine::config::EngineConfig;
    /// use chrono::NaiveDate;
    ///
    /// let config = EngineConfig::default();
    /// assert!(config.is_national_holiday(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()));
    /// assert!(!config.is_national_holiday(NaiveDate::from_ymd_opt(2026, 5, 2).unwrap()));
    /// ```
    pub fn is_national_holiday(&self, date: NaiveDate) -> bool {
        self.national_holidays
            .iter()
            .any(|h| h.month == date.month() && h.day == date.day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiled_in_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.tolerance_minutes, 10);
        assert_eq!(config.dsr_week_start, WeekStart::Sunday);
        assert_eq!(config.overtime_pct_saturday, Decimal::from(50));
        assert_eq!(config.overtime_pct_sunday_holiday, Decimal::from(100));
        assert_eq!(config.default_daily_hours, Decimal::new(88, 1));
        assert_eq!(config.national_holidays.len(), 8);
    }

    #[test]
    fn test_is_national_holiday() {
        let config = EngineConfig::default();
        let holidays = [
            (2026, 1, 1),
            (2026, 4, 21),
            (2026, 9, 7),
            (2026, 12, 25),
        ];
        for (y, m, d) in holidays {
            assert!(config.is_national_holiday(NaiveDate::from_ymd_opt(y, m, d).unwrap()));
        }
        assert!(!config.is_national_holiday(NaiveDate::from_ymd_opt(2026, 6, 10).unwrap()));
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: EngineConfig = serde_yaml::from_str("tolerance_minutes: 5\n").unwrap();
        assert_eq!(config.tolerance_minutes, 5);
        assert_eq!(config.dsr_week_start, WeekStart::Sunday);
        assert_eq!(config.national_holidays.len(), 8);
    }

    #[test]
    fn test_week_start_deserializes_snake_case() {
        let config: EngineConfig = serde_yaml::from_str("dsr_week_start: monday\n").unwrap();
        assert_eq!(config.dsr_week_start, WeekStart::Monday);
    }
}
