//! Overtime valuation.
//!
//! Each record's overtime is valued at the base hourly rate plus the
//! record's stored premium percentage: the 50% band for weekdays and
//! Saturdays, the 100% band for Sundays and national holidays. The
//! per-record `overtime_hours` column is the single source of truth.

use rust_decimal::Decimal;

use crate::models::TimeRecord;

/// Returns the monetary value of one record's overtime.
///
/// `hours x rate x (1 + pct/100)`; zero when the record carries no
/// overtime.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::overtime_value_for_record;
/// use timecard_engine::models::{RecordKind, TimeRecord};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut record = TimeRecord::raw(
///     "emp_001",
///     NaiveDate::from_ymd_opt(2026, 6, 6).unwrap(),
///     RecordKind::SaturdayWorked,
///     None, None, None, None,
/// );
/// record.overtime_hours = Decimal::from(8);
/// record.overtime_pct = Decimal::from(50);
///
/// let rate = Decimal::from_str("20").unwrap();
/// // 8 x 20 x 1.5 = 240
/// assert_eq!(overtime_value_for_record(&record, rate), Decimal::from(240));
/// ```
pub fn overtime_value_for_record(record: &TimeRecord, base_hourly_rate: Decimal) -> Decimal {
    if record.overtime_hours <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let multiplier = Decimal::ONE + record.overtime_pct / Decimal::from(100);
    record.overtime_hours * base_hourly_rate * multiplier
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordKind;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record_with(hours: &str, pct: &str) -> TimeRecord {
        let mut record = TimeRecord::raw(
            "emp_001",
            NaiveDate::from_ymd_opt(2026, 6, 8).unwrap(),
            RecordKind::WorkdayNormal,
            None,
            None,
            None,
            None,
        );
        record.overtime_hours = dec(hours);
        record.overtime_pct = dec(pct);
        record
    }

    #[test]
    fn test_fifty_percent_band() {
        let value = overtime_value_for_record(&record_with("2", "50"), dec("15.91"));
        assert_eq!(value, dec("2") * dec("15.91") * dec("1.5"));
    }

    #[test]
    fn test_hundred_percent_band() {
        let value = overtime_value_for_record(&record_with("6", "100"), dec("15.91"));
        assert_eq!(value, dec("6") * dec("15.91") * dec("2"));
    }

    #[test]
    fn test_zero_overtime_is_zero_value() {
        let value = overtime_value_for_record(&record_with("0", "50"), dec("15.91"));
        assert_eq!(value, Decimal::ZERO);
    }

    #[test]
    fn test_zero_pct_pays_base_rate() {
        let value = overtime_value_for_record(&record_with("1", "0"), dec("20"));
        assert_eq!(value, dec("20"));
    }
}
