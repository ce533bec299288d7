//! Employee model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The employee attribute contract seen by the engine.
///
/// Only the fields the KPI computation needs: identity, the monthly base
/// salary, and whether the employee is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Monthly base salary.
    pub salary: Decimal,
    /// Whether the employee is currently active.
    pub active: bool,
}
