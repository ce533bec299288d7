//! The read-side port the engine computes against, plus the in-memory
//! reference implementation used by tests and the API facade.
//!
//! Writers go through [`MemoryStore::upsert_record`], the
//! `on_record_upsert` hook: the normalizer runs synchronously before
//! persistence so the stored derived columns are always canonical, and the
//! (employee, date) key keeps record days unique.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{CostBucket, normalize_record};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Schedule, TimeRecord};

/// The read-side queries the KPI engine consumes.
///
/// Implementations must hand every call of one computation a consistent
/// snapshot so the cross-validation invariants hold.
pub trait TimecardStore {
    /// Lists the employee's records with dates in `[start, end]`, ordered
    /// by date.
    fn list_records(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<TimeRecord>>;

    /// Returns the employee's contracted schedule, if one is assigned.
    fn get_schedule(&self, employee_id: &str) -> EngineResult<Option<Schedule>>;

    /// Returns the employee attribute contract.
    fn get_employee(&self, employee_id: &str) -> EngineResult<Employee>;

    /// Sums one external cost bucket over `[start, end]`.
    fn sum_external_cost(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        bucket: CostBucket,
    ) -> EngineResult<Decimal>;
}

/// One external cost row (meal, transport voucher, sundry reimbursement)
/// keyed by employee and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalCostRow {
    /// The employee charged.
    pub employee_id: String,
    /// The expense date.
    pub date: NaiveDate,
    /// Which bucket the expense belongs to.
    pub bucket: CostBucket,
    /// The expense amount.
    pub amount: Decimal,
}

/// In-memory store.
///
/// Records live in a map keyed by (employee, date), which is the logical
/// equivalent of the unique index that serializes concurrent edits to the
/// same day in the relational deployment.
#[derive(Debug, Default)]
pub struct MemoryStore {
    config: EngineConfig,
    employees: HashMap<String, Employee>,
    schedules: HashMap<String, Schedule>,
    records: BTreeMap<(String, NaiveDate), TimeRecord>,
    costs: Vec<ExternalCostRow>,
}

impl MemoryStore {
    /// Creates an empty store normalizing against the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Registers an employee.
    pub fn add_employee(&mut self, employee: Employee) {
        self.employees.insert(employee.id.clone(), employee);
    }

    /// Assigns a schedule to an employee after validating it.
    pub fn set_schedule(&mut self, employee_id: &str, schedule: Schedule) -> EngineResult<()> {
        schedule.validate()?;
        self.schedules.insert(employee_id.to_string(), schedule);
        Ok(())
    }

    /// Adds an external cost row.
    pub fn add_external_cost(&mut self, row: ExternalCostRow) {
        self.costs.push(row);
    }

    /// The `on_record_upsert` hook: normalizes the raw record against the
    /// employee's schedule (or the default) and persists the canonical
    /// version, replacing any previous record for the same day.
    ///
    /// Impossible punch sequences fail the upsert with a DataIntegrity
    /// error and leave the stored state untouched.
    pub fn upsert_record(&mut self, record: TimeRecord) -> EngineResult<TimeRecord> {
        let schedule = self
            .schedules
            .get(&record.employee_id)
            .cloned()
            .unwrap_or_else(|| crate::calculation::fallback_schedule(&self.config));

        let normalized = normalize_record(&record, &schedule, &self.config)?;
        self.records.insert(
            (normalized.employee_id.clone(), normalized.date),
            normalized.clone(),
        );
        Ok(normalized)
    }

    /// Number of stored records, across all employees.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

impl TimecardStore for MemoryStore {
    fn list_records(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<TimeRecord>> {
        Ok(self
            .records
            .range((employee_id.to_string(), start)..=(employee_id.to_string(), end))
            .map(|(_, record)| record.clone())
            .collect())
    }

    fn get_schedule(&self, employee_id: &str) -> EngineResult<Option<Schedule>> {
        Ok(self.schedules.get(employee_id).cloned())
    }

    fn get_employee(&self, employee_id: &str) -> EngineResult<Employee> {
        self.employees
            .get(employee_id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    fn sum_external_cost(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        bucket: CostBucket,
    ) -> EngineResult<Decimal> {
        Ok(self
            .costs
            .iter()
            .filter(|row| {
                row.employee_id == employee_id
                    && row.bucket == bucket
                    && row.date >= start
                    && row.date <= end
            })
            .map(|row| row.amount)
            .sum())
    }
}
