//! Data models for the KPI engine.
//!
//! This module contains the record classification model, the contracted
//! schedule, the employee attribute contract, the calculation period and
//! the KPI output vector.

mod employee;
mod kpi;
mod period;
mod record;
mod schedule;

pub use employee::Employee;
pub use kpi::EmployeeKpi;
pub use period::Period;
pub use record::{RecordKind, TimeRecord};
pub use schedule::Schedule;
