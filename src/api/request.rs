//! Request types for the KPI engine API.
//!
//! This module defines the JSON request structures for the `/calculate`
//! endpoint. Records arrive as raw punches with string kind tags so that
//! legacy imports can post their historical tags directly.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::CostBucket;
use crate::models::{Employee, Period, Schedule};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employee information.
    pub employee: EmployeeRequest,
    /// The contracted schedule; the configured default applies when absent.
    #[serde(default)]
    pub schedule: Option<ScheduleRequest>,
    /// The period to compute over.
    pub period: PeriodRequest,
    /// The period's raw time records.
    #[serde(default)]
    pub records: Vec<RecordRequest>,
    /// External cost rows (meals, transport, other).
    #[serde(default)]
    pub external_costs: Vec<ExternalCostRequest>,
}

/// Employee information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// Monthly base salary.
    pub salary: Decimal,
    /// Whether the employee is active; defaults to true.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Schedule information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Contracted clock-in time.
    pub entry_time: NaiveTime,
    /// Contracted clock-out time.
    pub exit_time: NaiveTime,
    /// Contracted lunch start.
    pub lunch_start: NaiveTime,
    /// Contracted lunch end.
    pub lunch_end: NaiveTime,
    /// Contracted hours per day.
    pub daily_hours: Decimal,
}

/// Period information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// The start date (inclusive).
    pub start_date: NaiveDate,
    /// The end date (inclusive).
    pub end_date: NaiveDate,
}

/// One raw time record in a calculation request.
///
/// `kind` is a string tag; canonical tags and legacy aliases are both
/// accepted, anything else is treated as a normal workday with a warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordRequest {
    /// The record date.
    pub date: NaiveDate,
    /// Canonical or legacy kind tag.
    pub kind: String,
    /// Clock-in punch.
    #[serde(default)]
    pub entry: Option<NaiveTime>,
    /// Lunch-out punch.
    #[serde(default)]
    pub lunch_out: Option<NaiveTime>,
    /// Lunch-return punch.
    #[serde(default)]
    pub lunch_in: Option<NaiveTime>,
    /// Clock-out punch.
    #[serde(default)]
    pub exit: Option<NaiveTime>,
    /// Free-form annotation.
    #[serde(default)]
    pub notes: Option<String>,
}

/// One external cost row in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalCostRequest {
    /// The expense date.
    pub date: NaiveDate,
    /// The cost bucket.
    pub bucket: CostBucket,
    /// The expense amount.
    pub amount: Decimal,
}

impl From<EmployeeRequest> for Employee {
    fn from(req: EmployeeRequest) -> Self {
        Employee {
            id: req.id,
            salary: req.salary,
            active: req.active,
        }
    }
}

impl From<ScheduleRequest> for Schedule {
    fn from(req: ScheduleRequest) -> Self {
        Schedule {
            entry_time: req.entry_time,
            exit_time: req.exit_time,
            lunch_start: req.lunch_start,
            lunch_end: req.lunch_end,
            daily_hours: req.daily_hours,
        }
    }
}

impl From<PeriodRequest> for Period {
    fn from(req: PeriodRequest) -> Self {
        Period {
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}
