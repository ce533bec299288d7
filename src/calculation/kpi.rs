//! The KPI calculation engine.
//!
//! Aggregates an employee's normalized records over a period into the
//! fifteen-indicator vector. Deterministic and side-effect free: the same
//! inputs always produce the same output, which is what the cross-validator
//! and payroll reconciliation rely on.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{info, warn};

use crate::config::{EngineConfig, SharedConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeKpi, Period, RecordKind, Schedule, TimeRecord};
use crate::store::TimecardStore;

use super::calendar::{business_days_in_month, rest_days_in_month};
use super::costs::{CostBucket, ExternalCosts};
use super::dsr::assess_dsr;
use super::overtime::overtime_value_for_record;

/// The KPI engine bound to a store and a configuration handle.
///
/// [`compute`](KpiEngine::compute) reads everything it needs through the
/// store port in one pass, then runs the pure computation. KPIs are never
/// persisted.
pub struct KpiEngine<S> {
    store: S,
    config: SharedConfig,
}

impl<S: TimecardStore> KpiEngine<S> {
    /// Creates an engine over the given store and configuration handle.
    pub fn new(store: S, config: SharedConfig) -> Self {
        Self { store, config }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Computes the KPI vector for one employee over `[start_date, end_date]`.
    ///
    /// An employee without a schedule falls back to the configured default
    /// with a warning; any arithmetic anomaly aborts the whole computation,
    /// partial KPIs are never returned.
    pub fn compute(
        &self,
        employee_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> EngineResult<EmployeeKpi> {
        let config = self.config.get();
        let employee = self.store.get_employee(employee_id)?;

        let schedule = match self.store.get_schedule(employee_id)? {
            Some(schedule) => schedule,
            None => {
                warn!(
                    employee_id = %employee_id,
                    daily_hours = %config.default_daily_hours,
                    "employee has no schedule; using the configured default"
                );
                fallback_schedule(&config)
            }
        };

        let period = Period {
            start_date,
            end_date,
        };
        let records = self.store.list_records(employee_id, start_date, end_date)?;
        let external = ExternalCosts {
            meals: self
                .store
                .sum_external_cost(employee_id, start_date, end_date, CostBucket::Meals)?,
            transport: self.store.sum_external_cost(
                employee_id,
                start_date,
                end_date,
                CostBucket::Transport,
            )?,
            other: self
                .store
                .sum_external_cost(employee_id, start_date, end_date, CostBucket::Other)?,
        };

        let kpi =
            compute_kpis_from_parts(&employee, &schedule, &records, &period, external, &config)?;

        info!(
            employee_id = %employee_id,
            start = %start_date,
            end = %end_date,
            records = records.len(),
            labor_cost = %kpi.labor_cost,
            "KPI computation served"
        );

        Ok(kpi)
    }
}

/// Builds the fallback schedule for employees without one: the standard
/// 07:12 entry with a one-hour lunch, stretched to the configured daily
/// hours.
pub fn fallback_schedule(config: &EngineConfig) -> Schedule {
    let mut schedule = Schedule::default();
    if config.default_daily_hours != schedule.daily_hours {
        let minutes = (config.default_daily_hours * Decimal::from(60))
            .to_i64()
            .unwrap_or(528);
        schedule.exit_time = schedule.entry_time
            + chrono::Duration::minutes(minutes)
            + (schedule.lunch_end - schedule.lunch_start);
        schedule.daily_hours = config.default_daily_hours;
    }
    schedule
}

/// The pure KPI computation over already-loaded parts.
///
/// This is the function the cross-validator audits: every aggregate it
/// produces must equal the straightforward per-record summation within a
/// cent for money and a tenth of an hour for hours.
pub fn compute_kpis_from_parts(
    employee: &Employee,
    schedule: &Schedule,
    records: &[TimeRecord],
    period: &Period,
    external: ExternalCosts,
    config: &EngineConfig,
) -> EngineResult<EmployeeKpi> {
    validate_records(records, period)?;

    let anchor = period.end_date;
    let business_days = business_days_in_month(anchor.year(), anchor.month(), config);
    if business_days == 0 {
        return Err(EngineError::ComputationError {
            message: format!(
                "zero business days in month {}-{:02}",
                anchor.year(),
                anchor.month()
            ),
        });
    }

    let daily_hours = schedule.daily_hours;
    if daily_hours <= Decimal::ZERO {
        return Err(EngineError::ComputationError {
            message: "contracted daily hours must be positive".to_string(),
        });
    }

    let base_hourly_rate = employee.salary / (Decimal::from(business_days) * daily_hours);
    let daily_rate = employee.salary / Decimal::from(30);

    let worked_hours: Decimal = records
        .iter()
        .filter(|r| r.kind.counts_as_worked_day())
        .map(|r| r.worked_hours)
        .sum();

    // No filter and no NULL semantics: the per-record column is canonical.
    let overtime_hours: Decimal = records.iter().map(|r| r.overtime_hours).sum();

    let absences = records
        .iter()
        .filter(|r| r.kind == RecordKind::AbsenceUnjustified)
        .count() as u32;

    let justified_absences = records
        .iter()
        .filter(|r| {
            matches!(
                r.kind,
                RecordKind::AbsenceJustified | RecordKind::MedicalLeave
            )
        })
        .count() as u32;

    // Delay is undefined on premium days.
    let delay_hours: Decimal = records
        .iter()
        .filter(|r| !r.kind.all_hours_are_overtime())
        .map(|r| r.total_delay_hours)
        .sum();

    let lost_hours = Decimal::from(absences) * daily_hours + delay_hours;

    let worked_day_count = records
        .iter()
        .filter(|r| r.kind.counts_as_worked_day())
        .count();
    let daily_mean_hours = if worked_day_count > 0 {
        worked_hours / Decimal::from(worked_day_count as u64)
    } else {
        Decimal::ZERO
    };

    let days_with_record = records
        .iter()
        .filter(|r| r.kind.counts_in_attendance())
        .count();
    let absenteeism_pct = if days_with_record > 0 {
        Decimal::from(100) * Decimal::from(absences) / Decimal::from(days_with_record as u64)
    } else {
        Decimal::ZERO
    };

    let productivity_pct = if lost_hours.is_zero() {
        // Nothing lost: full marks, unless nothing was worked either.
        if worked_hours > Decimal::ZERO {
            Decimal::from(100)
        } else {
            Decimal::ZERO
        }
    } else {
        let delivered = worked_hours + overtime_hours;
        Decimal::from(100) * delivered / (delivered + lost_hours)
    };

    let efficiency_pct =
        productivity_pct * (Decimal::ONE - absenteeism_pct / Decimal::from(100));

    let overtime_value: Decimal = records
        .iter()
        .map(|r| overtime_value_for_record(r, base_hourly_rate))
        .sum();

    let justified_absence_value =
        Decimal::from(justified_absences) * daily_hours * base_hourly_rate;

    let absence_dates: Vec<NaiveDate> = records
        .iter()
        .filter(|r| r.kind == RecordKind::AbsenceUnjustified)
        .map(|r| r.date)
        .collect();
    let dsr = assess_dsr(
        employee.salary,
        &absence_dates,
        period,
        config.dsr_week_start,
    );

    // DSR owed over overtime earnings, prorated on the month's rest days.
    let rest_days = rest_days_in_month(anchor.year(), anchor.month(), config);
    let overtime_dsr_value =
        overtime_value / Decimal::from(business_days) * Decimal::from(rest_days);

    let labor_cost = employee.salary - daily_rate * Decimal::from(absences)
        - dsr.forfeiture_amount
        + overtime_value
        + overtime_dsr_value;

    let meals_cost = round_money(external.meals);
    let transport_cost = round_money(external.transport);
    let other_costs = round_money(external.other);
    let labor_cost = round_money(labor_cost);
    let total_cost = labor_cost + meals_cost + transport_cost + other_costs;

    Ok(EmployeeKpi {
        worked_hours: round_hours(worked_hours),
        overtime_hours: round_hours(overtime_hours),
        absences,
        delay_hours: round_hours(delay_hours),
        productivity_pct: round_pct(productivity_pct),
        absenteeism_pct: round_pct(absenteeism_pct),
        daily_mean_hours: round_hours(daily_mean_hours),
        justified_absences,
        labor_cost,
        meals_cost,
        transport_cost,
        other_costs,
        lost_hours: round_hours(lost_hours),
        overtime_value: round_money(overtime_value),
        justified_absence_value: round_money(justified_absence_value),
        efficiency_pct: round_pct(efficiency_pct),
        dsr_forfeiture: round_money(dsr.forfeiture_amount),
        overtime_dsr_value: round_money(overtime_dsr_value),
        total_cost,
    })
}

/// Rejects record sets the engine must not aggregate: duplicate days,
/// dates outside the period, negative derived durations.
fn validate_records(records: &[TimeRecord], period: &Period) -> EngineResult<()> {
    let mut seen: std::collections::HashSet<NaiveDate> = std::collections::HashSet::new();
    for record in records {
        if !period.contains_date(record.date) {
            return Err(EngineError::DataIntegrity {
                employee_id: record.employee_id.clone(),
                date: record.date,
                field: "date".to_string(),
                message: "record date outside the computation period".to_string(),
            });
        }
        if !seen.insert(record.date) {
            return Err(EngineError::DataIntegrity {
                employee_id: record.employee_id.clone(),
                date: record.date,
                field: "date".to_string(),
                message: "duplicate record for employee and date".to_string(),
            });
        }
        if record.worked_hours < Decimal::ZERO
            || record.overtime_hours < Decimal::ZERO
            || record.total_delay_hours < Decimal::ZERO
        {
            return Err(EngineError::ComputationError {
                message: format!("negative duration on record {}", record.date),
            });
        }
    }
    Ok(())
}

/// Rounds a monetary amount half-up to two decimals.
fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds an hours figure half-up to one decimal.
fn round_hours(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a percentage half-up to one decimal.
fn round_pct(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}
