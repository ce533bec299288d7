//! Punch normalization.
//!
//! Derives `worked_hours`, `overtime_hours`, `overtime_pct` and the delay
//! columns from a day's raw punches against the employee's contracted
//! schedule. The derivation is a pure function of its inputs and is
//! idempotent; it runs synchronously on every record upsert so the stored
//! columns are canonical.

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{RecordKind, Schedule, TimeRecord};

use super::tolerance::apply_tolerance;

/// Default lunch deduction in minutes when a `workday_normal` record has no
/// usable lunch punches.
const DEFAULT_LUNCH_MINUTES: i64 = 60;

/// Normalizes a raw record against the schedule, returning a copy with the
/// derived columns filled in.
///
/// * No-worked-day kinds (offs, absences, vacation, leave) get all derived
///   fields zeroed.
/// * Premium kinds (`saturday_worked`, `sunday_worked`, `holiday_worked`)
///   store zero worked hours and the full raw duration as overtime at the
///   configured premium; delay is undefined on those days.
/// * Weekday kinds go through the schedule-delta rule with the tolerance
///   window applied per side (see [`apply_tolerance`]). Minutes forgiven by
///   the band count neither as overtime nor as worked time, so
///   `worked_hours` is capped at `daily_hours + overtime_hours`.
///
/// Missing entry or exit on a weekday kind is a data error: the derived
/// fields stay zero and the record comes back flagged, never interpolated.
/// Impossible punch sequences fail the upsert with a DataIntegrity error.
pub fn normalize_record(
    record: &TimeRecord,
    schedule: &Schedule,
    config: &EngineConfig,
) -> EngineResult<TimeRecord> {
    validate_punch_order(record)?;

    let mut out = record.clone();
    out.worked_hours = Decimal::ZERO;
    out.overtime_hours = Decimal::ZERO;
    out.overtime_pct = Decimal::ZERO;
    out.delay_minutes_entry = 0;
    out.delay_minutes_exit = 0;
    out.total_delay_hours = Decimal::ZERO;
    out.flagged = false;

    if !record.kind.counts_as_worked_day() {
        return Ok(out);
    }

    let (Some(entry), Some(exit)) = (record.entry, record.exit) else {
        warn!(
            employee_id = %record.employee_id,
            date = %record.date,
            kind = ?record.kind,
            "record is missing entry or exit; derived fields left at zero"
        );
        out.flagged = true;
        return Ok(out);
    };

    // Lunch counts only when both punches are present; a partial pair is
    // treated as no lunch provided.
    let lunch_minutes = match (record.lunch_out, record.lunch_in) {
        (Some(lunch_out), Some(lunch_in)) => (lunch_in - lunch_out).num_minutes(),
        _ if record.kind == RecordKind::WorkdayNormal => DEFAULT_LUNCH_MINUTES,
        _ => 0,
    };

    let raw_minutes = (exit - entry).num_minutes() - lunch_minutes;
    let raw_hours = minutes_to_hours(raw_minutes.max(0));

    if record.kind.all_hours_are_overtime() {
        out.overtime_hours = raw_hours;
        out.overtime_pct = if record.kind == RecordKind::SaturdayWorked {
            config.overtime_pct_saturday
        } else {
            config.overtime_pct_sunday_holiday
        };
        return Ok(out);
    }

    let tolerance = i64::from(config.tolerance_minutes);

    let early_entry = (schedule.entry_time - entry).num_minutes().max(0);
    let late_exit = (exit - schedule.exit_time).num_minutes().max(0);
    let late_entry = (entry - schedule.entry_time).num_minutes().max(0);
    let early_exit = (schedule.exit_time - exit).num_minutes().max(0);

    let overtime_minutes =
        apply_tolerance(early_entry, tolerance) + apply_tolerance(late_exit, tolerance);
    out.delay_minutes_entry = apply_tolerance(late_entry, tolerance);
    out.delay_minutes_exit = apply_tolerance(early_exit, tolerance);

    out.overtime_hours = minutes_to_hours(overtime_minutes);
    out.total_delay_hours = minutes_to_hours(out.delay_minutes_entry + out.delay_minutes_exit);

    // Forgiven minutes are neither overtime nor worked time.
    let cap = schedule.daily_hours + out.overtime_hours;
    out.worked_hours = raw_hours.min(cap).max(Decimal::ZERO);

    if out.overtime_hours > Decimal::ZERO {
        // Weekday overtime carries the 50% band, same as Saturdays.
        out.overtime_pct = config.overtime_pct_saturday;
    }

    Ok(out)
}

/// Rejects impossible punch sequences before any derivation happens.
fn validate_punch_order(record: &TimeRecord) -> EngineResult<()> {
    if let (Some(entry), Some(exit)) = (record.entry, record.exit) {
        if exit <= entry {
            return Err(integrity_error(record, "exit", "exit is not after entry"));
        }
    }
    if let (Some(lunch_out), Some(lunch_in)) = (record.lunch_out, record.lunch_in) {
        if lunch_in <= lunch_out {
            return Err(integrity_error(
                record,
                "lunch_in",
                "lunch return is not after lunch out",
            ));
        }
        if let (Some(entry), Some(exit)) = (record.entry, record.exit) {
            if lunch_out < entry || lunch_in > exit {
                return Err(integrity_error(
                    record,
                    "lunch_out",
                    "lunch interval falls outside the entry-exit window",
                ));
            }
        }
    }
    Ok(())
}

fn integrity_error(record: &TimeRecord, field: &str, message: &str) -> EngineError {
    EngineError::DataIntegrity {
        employee_id: record.employee_id.clone(),
        date: record.date,
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::from(minutes) / Decimal::from(60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn time(h: u32, m: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, 0)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, d).unwrap()
    }

    fn raw(kind: RecordKind, entry: Option<NaiveTime>, exit: Option<NaiveTime>) -> TimeRecord {
        TimeRecord::raw("emp_001", date(10), kind, entry, None, None, exit)
    }

    fn eight_hour_schedule() -> Schedule {
        Schedule {
            entry_time: time(8, 0).unwrap(),
            exit_time: time(17, 0).unwrap(),
            lunch_start: time(12, 0).unwrap(),
            lunch_end: time(13, 0).unwrap(),
            daily_hours: Decimal::from(8),
        }
    }

    // ==========================================================================
    // NRM-001: early entry within tolerance, late exit beyond it
    // Schedule 07:12-17:00, actual 07:05-17:50
    // ==========================================================================
    #[test]
    fn test_nrm_001_forgiven_early_entry_counted_late_exit() {
        let config = EngineConfig::default();
        let schedule = Schedule::default();
        let record = raw(RecordKind::WorkdayNormal, time(7, 5), time(17, 50));

        let normalized = normalize_record(&record, &schedule, &config).unwrap();

        // Early entry of 7 min is forgiven; late exit of 50 min counts in full.
        assert_eq!(normalized.overtime_hours, dec("50") / dec("60"));
        assert_eq!(normalized.total_delay_hours, Decimal::ZERO);
        assert_eq!(normalized.overtime_pct, dec("50"));
        // The forgiven 7 minutes are not worked time either.
        assert_eq!(
            normalized.worked_hours,
            dec("8.8") + dec("50") / dec("60")
        );
        assert!(!normalized.flagged);
    }

    // ==========================================================================
    // NRM-002: delay and overtime on different sides both count
    // Schedule 08:00-17:00, actual 08:15-17:30
    // ==========================================================================
    #[test]
    fn test_nrm_002_late_entry_and_late_exit() {
        let config = EngineConfig::default();
        let schedule = eight_hour_schedule();
        let record = raw(RecordKind::WorkdayNormal, time(8, 15), time(17, 30));

        let normalized = normalize_record(&record, &schedule, &config).unwrap();

        assert_eq!(normalized.total_delay_hours, dec("0.25"));
        assert_eq!(normalized.overtime_hours, dec("0.5"));
        assert_eq!(normalized.delay_minutes_entry, 15);
        assert_eq!(normalized.delay_minutes_exit, 0);
    }

    // ==========================================================================
    // NRM-003: Saturday premium day, no lunch recorded
    // ==========================================================================
    #[test]
    fn test_nrm_003_saturday_all_hours_overtime() {
        let config = EngineConfig::default();
        let schedule = Schedule::default();
        let record = raw(RecordKind::SaturdayWorked, time(7, 0), time(15, 0));

        let normalized = normalize_record(&record, &schedule, &config).unwrap();

        assert_eq!(normalized.worked_hours, Decimal::ZERO);
        assert_eq!(normalized.overtime_hours, dec("8"));
        assert_eq!(normalized.overtime_pct, dec("50"));
        assert_eq!(normalized.total_delay_hours, Decimal::ZERO);
    }

    #[test]
    fn test_sunday_and_holiday_carry_double_premium() {
        let config = EngineConfig::default();
        let schedule = Schedule::default();

        for kind in [RecordKind::SundayWorked, RecordKind::HolidayWorked] {
            let record = raw(kind, time(7, 0), time(13, 0));
            let normalized = normalize_record(&record, &schedule, &config).unwrap();
            assert_eq!(normalized.overtime_hours, dec("6"));
            assert_eq!(normalized.overtime_pct, dec("100"));
            assert_eq!(normalized.worked_hours, Decimal::ZERO);
        }
    }

    #[test]
    fn test_premium_day_deducts_lunch_only_when_punched() {
        let config = EngineConfig::default();
        let schedule = Schedule::default();
        let mut record = raw(RecordKind::SaturdayWorked, time(7, 0), time(16, 0));
        record.lunch_out = time(12, 0);
        record.lunch_in = time(13, 0);

        let normalized = normalize_record(&record, &schedule, &config).unwrap();
        assert_eq!(normalized.overtime_hours, dec("8"));
    }

    #[test]
    fn test_exact_schedule_day_is_clean() {
        let config = EngineConfig::default();
        let schedule = Schedule::default();
        let mut record = raw(RecordKind::WorkdayNormal, time(7, 12), time(17, 0));
        record.lunch_out = time(12, 0);
        record.lunch_in = time(13, 0);

        let normalized = normalize_record(&record, &schedule, &config).unwrap();
        assert_eq!(normalized.worked_hours, dec("8.8"));
        assert_eq!(normalized.overtime_hours, Decimal::ZERO);
        assert_eq!(normalized.total_delay_hours, Decimal::ZERO);
        assert_eq!(normalized.overtime_pct, Decimal::ZERO);
    }

    #[test]
    fn test_tolerance_boundary_on_delay_side() {
        let config = EngineConfig::default();
        let schedule = eight_hour_schedule();

        // 10 minutes late: forgiven entirely.
        let record = raw(RecordKind::WorkdayNormal, time(8, 10), time(17, 0));
        let normalized = normalize_record(&record, &schedule, &config).unwrap();
        assert_eq!(normalized.total_delay_hours, Decimal::ZERO);

        // 11 minutes late: the full 11 minutes count.
        let record = raw(RecordKind::WorkdayNormal, time(8, 11), time(17, 0));
        let normalized = normalize_record(&record, &schedule, &config).unwrap();
        assert_eq!(normalized.total_delay_hours, dec("11") / dec("60"));
        assert_eq!(normalized.delay_minutes_entry, 11);
    }

    #[test]
    fn test_no_worked_day_kinds_zero_everything() {
        let config = EngineConfig::default();
        let schedule = Schedule::default();
        let kinds = [
            RecordKind::SaturdayOff,
            RecordKind::SundayOff,
            RecordKind::HolidayOff,
            RecordKind::AbsenceUnjustified,
            RecordKind::AbsenceJustified,
            RecordKind::MedicalLeave,
            RecordKind::Vacation,
            RecordKind::LicensedLeave,
        ];
        for kind in kinds {
            let record = raw(kind, time(7, 12), time(17, 0));
            let normalized = normalize_record(&record, &schedule, &config).unwrap();
            assert_eq!(normalized.worked_hours, Decimal::ZERO, "{:?}", kind);
            assert_eq!(normalized.overtime_hours, Decimal::ZERO, "{:?}", kind);
            assert_eq!(normalized.total_delay_hours, Decimal::ZERO, "{:?}", kind);
            assert!(!normalized.flagged);
        }
    }

    #[test]
    fn test_missing_exit_flags_record() {
        let config = EngineConfig::default();
        let schedule = Schedule::default();
        let record = raw(RecordKind::WorkdayNormal, time(7, 12), None);

        let normalized = normalize_record(&record, &schedule, &config).unwrap();
        assert!(normalized.flagged);
        assert_eq!(normalized.worked_hours, Decimal::ZERO);
        assert_eq!(normalized.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_partial_lunch_falls_back_to_default() {
        let config = EngineConfig::default();
        let schedule = Schedule::default();
        let mut record = raw(RecordKind::WorkdayNormal, time(7, 12), time(17, 0));
        record.lunch_out = time(12, 0); // no lunch_in punched

        let normalized = normalize_record(&record, &schedule, &config).unwrap();
        // 9h48m minus the 60-minute default.
        assert_eq!(normalized.worked_hours, dec("8.8"));
    }

    #[test]
    fn test_exit_before_entry_is_integrity_error() {
        let config = EngineConfig::default();
        let schedule = Schedule::default();
        let record = raw(RecordKind::WorkdayNormal, time(17, 0), time(7, 12));

        match normalize_record(&record, &schedule, &config) {
            Err(EngineError::DataIntegrity { field, .. }) => assert_eq!(field, "exit"),
            other => panic!("Expected DataIntegrity, got {:?}", other),
        }
    }

    #[test]
    fn test_lunch_in_before_lunch_out_is_integrity_error() {
        let config = EngineConfig::default();
        let schedule = Schedule::default();
        let mut record = raw(RecordKind::WorkdayNormal, time(7, 12), time(17, 0));
        record.lunch_out = time(13, 0);
        record.lunch_in = time(12, 0);

        assert!(matches!(
            normalize_record(&record, &schedule, &config),
            Err(EngineError::DataIntegrity { .. })
        ));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let config = EngineConfig::default();
        let schedule = Schedule::default();
        let record = raw(RecordKind::WorkdayNormal, time(7, 5), time(17, 50));

        let once = normalize_record(&record, &schedule, &config).unwrap();
        let twice = normalize_record(&once, &schedule, &config).unwrap();
        assert_eq!(once, twice);
    }
}
