//! The employee-period KPI output vector.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The fifteen indicators computed for one (employee, period) pair, plus
/// the roll-ups derived from them.
///
/// KPIs are never persisted; recomputation is idempotent and cheap, which
/// is what makes the cross-validation audit meaningful. Monetary fields are
/// rounded half-up to two decimals, hours to one decimal, percentages to
/// one decimal, all at the final step only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeKpi {
    /// 1. Hours worked inside the contracted schedule.
    pub worked_hours: Decimal,
    /// 2. Overtime hours; the per-record column summed with no filter.
    pub overtime_hours: Decimal,
    /// 3. Count of unjustified absences.
    pub absences: u32,
    /// 4. Delay hours (late entry + early exit beyond tolerance).
    pub delay_hours: Decimal,
    /// 5. Productivity percentage.
    pub productivity_pct: Decimal,
    /// 6. Absenteeism percentage.
    pub absenteeism_pct: Decimal,
    /// 7. Mean worked hours per worked day.
    pub daily_mean_hours: Decimal,
    /// 8. Count of justified absences (justified + medical leave).
    pub justified_absences: u32,
    /// 9. Labor cost: salary minus deductions plus overtime value.
    pub labor_cost: Decimal,
    /// 10. Meals cost pulled from the external cost table.
    pub meals_cost: Decimal,
    /// 11. Transport cost pulled from the external cost table.
    pub transport_cost: Decimal,
    /// 12. Other external costs.
    pub other_costs: Decimal,
    /// 13. Lost hours: absences in hours plus delay hours.
    pub lost_hours: Decimal,
    /// 14. Monetary value of overtime at the record premiums.
    pub overtime_value: Decimal,
    /// 15. Monetary value paid for justified absences.
    pub justified_absence_value: Decimal,
    /// Efficiency percentage: productivity scaled by attendance.
    pub efficiency_pct: Decimal,
    /// DSR forfeiture deducted for weeks containing unjustified absences.
    pub dsr_forfeiture: Decimal,
    /// DSR owed over overtime earnings (Law 605/49), added into labor cost.
    pub overtime_dsr_value: Decimal,
    /// Roll-up of the four cost buckets.
    pub total_cost: Decimal,
}
