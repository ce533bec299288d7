//! Time-record model and the closed set of record kinds.
//!
//! This module defines the [`RecordKind`] tagged variant and the
//! [`TimeRecord`] struct that carries one day of punches plus the derived
//! hours columns maintained by the normalizer.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The closed set of time-record kinds.
///
/// Every time record has exactly one kind. The kind determines the record's
/// cost and hours semantics through three predicates:
/// [`generates_cost`](RecordKind::generates_cost),
/// [`counts_as_worked_day`](RecordKind::counts_as_worked_day) and
/// [`all_hours_are_overtime`](RecordKind::all_hours_are_overtime).
///
/// Legacy imports carry free-form string tags with historical duplicates
/// (`trabalho_normal`, `trabalhado`, `sabado_horas_extras`, ...); those are
/// collapsed onto this enum by [`RecordKind::from_tag`] at the import
/// boundary, and downstream code branches only on the canonical variant.
///
/// # Example
///
/// ```
/// use timecard_engine::models::RecordKind;
///
/// assert!(RecordKind::SundayWorked.all_hours_are_overtime());
/// assert_eq!(RecordKind::from_tag("sabado_trabalhado"), Some(RecordKind::SaturdayWorked));
/// assert_eq!(RecordKind::from_tag("not_a_kind"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Regular work on a contracted weekday.
    WorkdayNormal,
    /// Work on a Saturday; every hour is overtime at the Saturday premium.
    SaturdayWorked,
    /// Work on a Sunday; every hour is overtime at the double premium.
    SundayWorked,
    /// Work on a national holiday; every hour is overtime at the double premium.
    HolidayWorked,
    /// Half of a contracted day worked.
    HalfDay,
    /// Saturday not worked.
    SaturdayOff,
    /// Sunday not worked.
    SundayOff,
    /// National holiday not worked.
    HolidayOff,
    /// Unjustified absence; deducts a day and forfeits the week's rest day.
    AbsenceUnjustified,
    /// Justified absence; the contracted day is paid, nothing is deducted.
    AbsenceJustified,
    /// Absence covered by a medical certificate; paid like a justified absence.
    MedicalLeave,
    /// Vacation day, paid with the one-third constitutional addition.
    Vacation,
    /// Licensed leave (paternity, bereavement, ...); paid, no deduction.
    LicensedLeave,
}

impl RecordKind {
    /// Returns true if records of this kind contribute to labor cost.
    pub fn generates_cost(self) -> bool {
        !matches!(
            self,
            RecordKind::SaturdayOff
                | RecordKind::SundayOff
                | RecordKind::HolidayOff
                | RecordKind::AbsenceUnjustified
        )
    }

    /// Returns true if records of this kind count as a worked day.
    pub fn counts_as_worked_day(self) -> bool {
        matches!(
            self,
            RecordKind::WorkdayNormal
                | RecordKind::SaturdayWorked
                | RecordKind::SundayWorked
                | RecordKind::HolidayWorked
                | RecordKind::HalfDay
        )
    }

    /// Returns true if every hour on this kind of day is premium overtime.
    ///
    /// On these days delay is undefined: `worked_hours` is stored as zero
    /// and the raw duration goes entirely into `overtime_hours`.
    pub fn all_hours_are_overtime(self) -> bool {
        matches!(
            self,
            RecordKind::SaturdayWorked | RecordKind::SundayWorked | RecordKind::HolidayWorked
        )
    }

    /// Returns true for the kinds that enter the attendance denominator
    /// (`days_with_record`): worked days plus absences of any kind.
    pub fn counts_in_attendance(self) -> bool {
        self.counts_as_worked_day()
            || matches!(
                self,
                RecordKind::AbsenceUnjustified
                    | RecordKind::AbsenceJustified
                    | RecordKind::MedicalLeave
            )
    }

    /// Maps a canonical or legacy string tag onto its kind.
    ///
    /// The legacy aliases cover the historical duplicates found in punch
    /// imports. Returns `None` for tags outside the closed set; the import
    /// path treats those as [`RecordKind::WorkdayNormal`] with a warning.
    pub fn from_tag(tag: &str) -> Option<RecordKind> {
        match tag {
            // canonical tags
            "workday_normal" => Some(RecordKind::WorkdayNormal),
            "saturday_worked" => Some(RecordKind::SaturdayWorked),
            "sunday_worked" => Some(RecordKind::SundayWorked),
            "holiday_worked" => Some(RecordKind::HolidayWorked),
            "half_day" => Some(RecordKind::HalfDay),
            "saturday_off" => Some(RecordKind::SaturdayOff),
            "sunday_off" => Some(RecordKind::SundayOff),
            "holiday_off" => Some(RecordKind::HolidayOff),
            "absence_unjustified" => Some(RecordKind::AbsenceUnjustified),
            "absence_justified" => Some(RecordKind::AbsenceJustified),
            "medical_leave" => Some(RecordKind::MedicalLeave),
            "vacation" => Some(RecordKind::Vacation),
            "licensed_leave" => Some(RecordKind::LicensedLeave),
            // legacy import aliases
            "trabalho_normal" | "trabalhado" => Some(RecordKind::WorkdayNormal),
            "sabado_trabalhado" | "sabado_horas_extras" => Some(RecordKind::SaturdayWorked),
            "domingo_trabalhado" | "domingo_horas_extras" => Some(RecordKind::SundayWorked),
            "feriado_trabalhado" => Some(RecordKind::HolidayWorked),
            "meio_periodo" => Some(RecordKind::HalfDay),
            "sabado_folga" | "sabado_nao_trabalhado" => Some(RecordKind::SaturdayOff),
            "domingo_folga" | "domingo_nao_trabalhado" => Some(RecordKind::SundayOff),
            "feriado_folga" | "feriado" => Some(RecordKind::HolidayOff),
            "falta" => Some(RecordKind::AbsenceUnjustified),
            "falta_justificada" => Some(RecordKind::AbsenceJustified),
            "atestado" | "atestado_medico" => Some(RecordKind::MedicalLeave),
            "ferias" => Some(RecordKind::Vacation),
            "licenca" => Some(RecordKind::LicensedLeave),
            _ => None,
        }
    }
}

/// One employee-day of punches plus the derived columns.
///
/// The derived fields (`worked_hours`, `overtime_hours`, `overtime_pct`,
/// the delay columns) are maintained by the normalizer on every upsert and
/// are canonical: the KPI engine sums the stored columns, it never
/// re-derives them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRecord {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The record date; unique per employee.
    pub date: NaiveDate,
    /// The record kind.
    pub kind: RecordKind,
    /// Clock-in time, if punched.
    pub entry: Option<NaiveTime>,
    /// Lunch-out time, if punched.
    pub lunch_out: Option<NaiveTime>,
    /// Lunch-return time, if punched.
    pub lunch_in: Option<NaiveTime>,
    /// Clock-out time, if punched.
    pub exit: Option<NaiveTime>,
    /// Derived: hours worked inside the contracted schedule.
    pub worked_hours: Decimal,
    /// Derived: overtime hours after tolerance.
    pub overtime_hours: Decimal,
    /// Derived: overtime premium percentage (0, 50 or 100).
    pub overtime_pct: Decimal,
    /// Derived: minutes of late entry beyond tolerance.
    pub delay_minutes_entry: i64,
    /// Derived: minutes of early exit beyond tolerance.
    pub delay_minutes_exit: i64,
    /// Derived: total delay in hours.
    pub total_delay_hours: Decimal,
    /// Set when the punches were unusable (missing entry or exit on a
    /// weekday kind); derived fields are zero and the day needs review.
    #[serde(default)]
    pub flagged: bool,
    /// Free-form annotation.
    #[serde(default)]
    pub notes: Option<String>,
}

impl TimeRecord {
    /// Creates a raw record for the given day with empty derived fields.
    ///
    /// The derived columns are filled in by the normalizer before the
    /// record is persisted.
    pub fn raw(
        employee_id: impl Into<String>,
        date: NaiveDate,
        kind: RecordKind,
        entry: Option<NaiveTime>,
        lunch_out: Option<NaiveTime>,
        lunch_in: Option<NaiveTime>,
        exit: Option<NaiveTime>,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            kind,
            entry,
            lunch_out,
            lunch_in,
            exit,
            worked_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            overtime_pct: Decimal::ZERO,
            delay_minutes_entry: 0,
            delay_minutes_exit: 0,
            total_delay_hours: Decimal::ZERO,
            flagged: false,
            notes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const ALL_KINDS: [RecordKind; 13] = [
        RecordKind::WorkdayNormal,
        RecordKind::SaturdayWorked,
        RecordKind::SundayWorked,
        RecordKind::HolidayWorked,
        RecordKind::HalfDay,
        RecordKind::SaturdayOff,
        RecordKind::SundayOff,
        RecordKind::HolidayOff,
        RecordKind::AbsenceUnjustified,
        RecordKind::AbsenceJustified,
        RecordKind::MedicalLeave,
        RecordKind::Vacation,
        RecordKind::LicensedLeave,
    ];

    #[test]
    fn test_cost_worked_overtime_triples() {
        // (kind, cost, worked, all-OT) per the classification table
        let table = [
            (RecordKind::WorkdayNormal, true, true, false),
            (RecordKind::SaturdayWorked, true, true, true),
            (RecordKind::SundayWorked, true, true, true),
            (RecordKind::HolidayWorked, true, true, true),
            (RecordKind::HalfDay, true, true, false),
            (RecordKind::SaturdayOff, false, false, false),
            (RecordKind::SundayOff, false, false, false),
            (RecordKind::HolidayOff, false, false, false),
            (RecordKind::AbsenceUnjustified, false, false, false),
            (RecordKind::AbsenceJustified, true, false, false),
            (RecordKind::MedicalLeave, true, false, false),
            (RecordKind::Vacation, true, false, false),
            (RecordKind::LicensedLeave, true, false, false),
        ];
        for (kind, cost, worked, all_ot) in table {
            assert_eq!(kind.generates_cost(), cost, "{:?} cost", kind);
            assert_eq!(kind.counts_as_worked_day(), worked, "{:?} worked", kind);
            assert_eq!(kind.all_hours_are_overtime(), all_ot, "{:?} all-OT", kind);
        }
    }

    #[test]
    fn test_all_overtime_implies_cost_and_worked_day() {
        for kind in ALL_KINDS {
            if kind.all_hours_are_overtime() {
                assert!(kind.generates_cost());
                assert!(kind.counts_as_worked_day());
            }
        }
    }

    #[test]
    fn test_attendance_set_includes_absences() {
        assert!(RecordKind::AbsenceUnjustified.counts_in_attendance());
        assert!(RecordKind::MedicalLeave.counts_in_attendance());
        assert!(RecordKind::SundayWorked.counts_in_attendance());
        assert!(!RecordKind::SundayOff.counts_in_attendance());
        assert!(!RecordKind::Vacation.counts_in_attendance());
    }

    #[test]
    fn test_from_tag_canonical() {
        assert_eq!(
            RecordKind::from_tag("workday_normal"),
            Some(RecordKind::WorkdayNormal)
        );
        assert_eq!(
            RecordKind::from_tag("medical_leave"),
            Some(RecordKind::MedicalLeave)
        );
    }

    #[test]
    fn test_from_tag_legacy_duplicates_collapse() {
        assert_eq!(
            RecordKind::from_tag("sabado_trabalhado"),
            Some(RecordKind::SaturdayWorked)
        );
        assert_eq!(
            RecordKind::from_tag("sabado_horas_extras"),
            Some(RecordKind::SaturdayWorked)
        );
        assert_eq!(
            RecordKind::from_tag("trabalhado"),
            Some(RecordKind::WorkdayNormal)
        );
        assert_eq!(RecordKind::from_tag("falta"), Some(RecordKind::AbsenceUnjustified));
    }

    #[test]
    fn test_from_tag_unknown_is_none() {
        assert_eq!(RecordKind::from_tag("mystery_tag"), None);
        assert_eq!(RecordKind::from_tag(""), None);
    }

    #[test]
    fn test_kind_serialization_round_trip() {
        for kind in ALL_KINDS {
            let json = serde_json::to_string(&kind).unwrap();
            let back: RecordKind = serde_json::from_str(&json).unwrap();
            assert_eq!(kind, back);
        }
        assert_eq!(
            serde_json::to_string(&RecordKind::AbsenceUnjustified).unwrap(),
            "\"absence_unjustified\""
        );
    }

    #[test]
    fn test_raw_record_has_zero_derived_fields() {
        let record = TimeRecord::raw(
            "emp_001",
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            RecordKind::WorkdayNormal,
            NaiveTime::from_hms_opt(7, 12, 0),
            None,
            None,
            NaiveTime::from_hms_opt(17, 0, 0),
        );
        assert_eq!(record.worked_hours, Decimal::ZERO);
        assert_eq!(record.overtime_hours, Decimal::ZERO);
        assert_eq!(record.total_delay_hours, Decimal::ZERO);
        assert!(!record.flagged);
    }

    #[test]
    fn test_record_deserialization() {
        let json = r#"{
            "employee_id": "emp_001",
            "date": "2026-01-15",
            "kind": "workday_normal",
            "entry": "07:12:00",
            "lunch_out": "12:00:00",
            "lunch_in": "13:00:00",
            "exit": "17:00:00",
            "worked_hours": "8.8",
            "overtime_hours": "0",
            "overtime_pct": "0",
            "delay_minutes_entry": 0,
            "delay_minutes_exit": 0,
            "total_delay_hours": "0"
        }"#;
        let record: TimeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, RecordKind::WorkdayNormal);
        assert_eq!(record.worked_hours, dec("8.8"));
        assert!(!record.flagged);
        assert!(record.notes.is_none());
    }
}
