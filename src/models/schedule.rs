//! Contracted work-schedule model.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An employee's contracted daily schedule.
///
/// `daily_hours` must equal `(exit - entry) - (lunch_end - lunch_start)` to
/// the minute; [`Schedule::validate`] enforces it. When an employee has no
/// schedule assigned the engine falls back to [`Schedule::default`]
/// (07:12-17:00 with a one-hour lunch, 8.8 h).
///
/// # Example
///
/// ```
/// use timecard_engine::models::Schedule;
/// use rust_decimal::Decimal;
///
/// let schedule = Schedule::default();
/// assert_eq!(schedule.daily_hours, Decimal::new(88, 1)); // 8.8
/// assert!(schedule.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Contracted clock-in time.
    pub entry_time: NaiveTime,
    /// Contracted clock-out time.
    pub exit_time: NaiveTime,
    /// Contracted lunch start.
    pub lunch_start: NaiveTime,
    /// Contracted lunch end.
    pub lunch_end: NaiveTime,
    /// Contracted hours per day, lunch excluded (decimal, e.g. 8.8).
    pub daily_hours: Decimal,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            entry_time: NaiveTime::from_hms_opt(7, 12, 0).unwrap(),
            exit_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            lunch_start: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            lunch_end: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            daily_hours: Decimal::new(88, 1),
        }
    }
}

impl Schedule {
    /// Checks the schedule's internal consistency.
    ///
    /// `daily_hours` must match the span between entry and exit minus the
    /// lunch break, to the minute.
    pub fn validate(&self) -> EngineResult<()> {
        if self.exit_time <= self.entry_time {
            return Err(EngineError::ComputationError {
                message: "schedule exit must be after entry".to_string(),
            });
        }
        if self.lunch_end < self.lunch_start {
            return Err(EngineError::ComputationError {
                message: "schedule lunch end must not precede lunch start".to_string(),
            });
        }
        let span_minutes = (self.exit_time - self.entry_time).num_minutes()
            - (self.lunch_end - self.lunch_start).num_minutes();
        let expected = Decimal::from(span_minutes) / Decimal::from(60);
        if expected != self.daily_hours {
            return Err(EngineError::ComputationError {
                message: format!(
                    "daily_hours {} does not match schedule span {}",
                    self.daily_hours, expected
                ),
            });
        }
        Ok(())
    }
}
