//! Cross-validation of the KPI engine.
//!
//! Recomputes every monetary and hours indicator by the straightforward
//! per-record summation and compares it against the aggregate the engine
//! produced. The two paths share nothing but the models, so a category or
//! rounding error in either one surfaces as a divergence. Used by the test
//! suite and as an optional runtime audit; a non-empty divergence list is a
//! hard failure.

use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, WeekStart};
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeKpi, Period, RecordKind, Schedule, TimeRecord};

use super::costs::ExternalCosts;

/// Money indicators must agree to the cent.
const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
/// Hours indicators must agree to a tenth of an hour.
const HOURS_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// One disagreement between the aggregate KPI and the naive recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divergence {
    /// The KPI that diverged.
    pub kpi: String,
    /// The engine's aggregate value.
    pub aggregate_value: Decimal,
    /// The naive per-record value.
    pub naive_value: Decimal,
    /// `aggregate - naive`.
    pub diff: Decimal,
}

/// Recomputes the KPI vector naively and reports every divergence.
///
/// Returns an empty list when the engine output reconciles.
pub fn cross_validate(
    kpi: &EmployeeKpi,
    employee: &Employee,
    schedule: &Schedule,
    records: &[TimeRecord],
    period: &Period,
    external: ExternalCosts,
    config: &EngineConfig,
) -> Vec<Divergence> {
    let naive = naive_recompute(employee, schedule, records, period, external, config);
    let mut divergences = Vec::new();

    let hours_checks = [
        ("worked_hours", kpi.worked_hours, naive.worked_hours),
        ("overtime_hours", kpi.overtime_hours, naive.overtime_hours),
        ("delay_hours", kpi.delay_hours, naive.delay_hours),
        ("lost_hours", kpi.lost_hours, naive.lost_hours),
    ];
    for (name, aggregate, naive_value) in hours_checks {
        push_if_diverged(&mut divergences, name, aggregate, naive_value, HOURS_TOLERANCE);
    }

    let money_checks = [
        ("overtime_value", kpi.overtime_value, naive.overtime_value),
        (
            "justified_absence_value",
            kpi.justified_absence_value,
            naive.justified_absence_value,
        ),
        ("dsr_forfeiture", kpi.dsr_forfeiture, naive.dsr_forfeiture),
        (
            "overtime_dsr_value",
            kpi.overtime_dsr_value,
            naive.overtime_dsr_value,
        ),
        ("labor_cost", kpi.labor_cost, naive.labor_cost),
        ("meals_cost", kpi.meals_cost, naive.meals_cost),
        ("transport_cost", kpi.transport_cost, naive.transport_cost),
        ("other_costs", kpi.other_costs, naive.other_costs),
        ("total_cost", kpi.total_cost, naive.total_cost),
    ];
    for (name, aggregate, naive_value) in money_checks {
        push_if_diverged(&mut divergences, name, aggregate, naive_value, MONEY_TOLERANCE);
    }

    let count_checks = [
        ("absences", kpi.absences, naive.absences),
        (
            "justified_absences",
            kpi.justified_absences,
            naive.justified_absences,
        ),
    ];
    for (name, aggregate, naive_value) in count_checks {
        push_if_diverged(
            &mut divergences,
            name,
            Decimal::from(aggregate),
            Decimal::from(naive_value),
            Decimal::ZERO,
        );
    }

    divergences
}

/// Runs the audit and fails hard on any divergence.
pub fn verify(
    kpi: &EmployeeKpi,
    employee: &Employee,
    schedule: &Schedule,
    records: &[TimeRecord],
    period: &Period,
    external: ExternalCosts,
    config: &EngineConfig,
) -> EngineResult<()> {
    let divergences = cross_validate(kpi, employee, schedule, records, period, external, config);
    if divergences.is_empty() {
        return Ok(());
    }
    let names: Vec<&str> = divergences.iter().map(|d| d.kpi.as_str()).collect();
    Err(EngineError::ComputationError {
        message: format!("cross-validation divergences: {}", names.join(", ")),
    })
}

fn push_if_diverged(
    divergences: &mut Vec<Divergence>,
    kpi: &str,
    aggregate_value: Decimal,
    naive_value: Decimal,
    tolerance: Decimal,
) {
    let diff = aggregate_value - naive_value;
    if diff.abs() > tolerance {
        divergences.push(Divergence {
            kpi: kpi.to_string(),
            aggregate_value,
            naive_value,
            diff,
        });
    }
}

struct NaiveKpi {
    worked_hours: Decimal,
    overtime_hours: Decimal,
    delay_hours: Decimal,
    lost_hours: Decimal,
    absences: u32,
    justified_absences: u32,
    overtime_value: Decimal,
    justified_absence_value: Decimal,
    dsr_forfeiture: Decimal,
    overtime_dsr_value: Decimal,
    labor_cost: Decimal,
    meals_cost: Decimal,
    transport_cost: Decimal,
    other_costs: Decimal,
    total_cost: Decimal,
}

/// The deliberately plain recomputation: one pass over the records with an
/// explicit match per kind, calendar walked day by day, DSR weeks collected
/// into a set of week-start dates.
fn naive_recompute(
    employee: &Employee,
    schedule: &Schedule,
    records: &[TimeRecord],
    period: &Period,
    external: ExternalCosts,
    config: &EngineConfig,
) -> NaiveKpi {
    let hundred = Decimal::from(100);

    let mut worked_hours = Decimal::ZERO;
    let mut overtime_hours = Decimal::ZERO;
    let mut delay_hours = Decimal::ZERO;
    let mut absences = 0u32;
    let mut justified_absences = 0u32;

    for record in records {
        match record.kind {
            RecordKind::WorkdayNormal | RecordKind::HalfDay => {
                worked_hours += record.worked_hours;
                delay_hours += record.total_delay_hours;
            }
            RecordKind::SaturdayWorked | RecordKind::SundayWorked | RecordKind::HolidayWorked => {
                worked_hours += record.worked_hours;
            }
            RecordKind::AbsenceUnjustified => {
                absences += 1;
                delay_hours += record.total_delay_hours;
            }
            RecordKind::AbsenceJustified | RecordKind::MedicalLeave => {
                justified_absences += 1;
                delay_hours += record.total_delay_hours;
            }
            RecordKind::SaturdayOff
            | RecordKind::SundayOff
            | RecordKind::HolidayOff
            | RecordKind::Vacation
            | RecordKind::LicensedLeave => {
                delay_hours += record.total_delay_hours;
            }
        }
        overtime_hours += record.overtime_hours;
    }

    // Month calendar walked date by date.
    let anchor = period.end_date;
    let mut business_days = 0u32;
    let mut rest_days = 0u32;
    let mut day = NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1);
    while let Some(d) = day {
        if d.month() != anchor.month() {
            break;
        }
        let weekend = matches!(d.weekday(), Weekday::Sat | Weekday::Sun);
        let holiday = config.is_national_holiday(d);
        if !weekend && !holiday {
            business_days += 1;
        }
        if d.weekday() == Weekday::Sun || (!weekend && holiday) {
            rest_days += 1;
        }
        day = d.checked_add_days(Days::new(1));
    }

    let hourly = if business_days > 0 && schedule.daily_hours > Decimal::ZERO {
        employee.salary / (Decimal::from(business_days) * schedule.daily_hours)
    } else {
        Decimal::ZERO
    };

    let mut overtime_value = Decimal::ZERO;
    for record in records {
        if record.overtime_hours > Decimal::ZERO {
            overtime_value +=
                record.overtime_hours * hourly * (Decimal::ONE + record.overtime_pct / hundred);
        }
    }

    let justified_absence_value =
        Decimal::from(justified_absences) * schedule.daily_hours * hourly;

    // Forfeited weeks as the set of distinct week starts holding absences.
    let mut forfeited: HashSet<NaiveDate> = HashSet::new();
    for record in records {
        if record.kind == RecordKind::AbsenceUnjustified && period.contains_date(record.date) {
            let back = match config.dsr_week_start {
                WeekStart::Sunday => record.date.weekday().num_days_from_sunday(),
                WeekStart::Monday => record.date.weekday().num_days_from_monday(),
            };
            if let Some(start) = record.date.checked_sub_days(Days::new(u64::from(back))) {
                forfeited.insert(start);
            }
        }
    }

    let daily_rate = employee.salary / Decimal::from(30);
    let dsr_forfeiture = daily_rate * Decimal::from(forfeited.len() as u64);
    let overtime_dsr_value = if business_days > 0 {
        overtime_value / Decimal::from(business_days) * Decimal::from(rest_days)
    } else {
        Decimal::ZERO
    };

    let labor_cost = employee.salary - daily_rate * Decimal::from(absences) - dsr_forfeiture
        + overtime_value
        + overtime_dsr_value;

    let lost_hours = Decimal::from(absences) * schedule.daily_hours + delay_hours;
    let total_cost = labor_cost + external.meals + external.transport + external.other;

    NaiveKpi {
        worked_hours,
        overtime_hours,
        delay_hours,
        lost_hours,
        absences,
        justified_absences,
        overtime_value,
        justified_absence_value,
        dsr_forfeiture,
        overtime_dsr_value,
        labor_cost,
        meals_cost: external.meals,
        transport_cost: external.transport,
        other_costs: external.other,
        total_cost,
    }
}
