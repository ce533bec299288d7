//! Cost buckets and the employee-period cost split.
//!
//! The labor bucket comes out of the KPI computation; meals, transport and
//! other are pure sums over external cost rows keyed by employee and date.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::EmployeeKpi;

/// The external cost buckets tracked alongside labor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostBucket {
    /// Meal expenses (canteen, meal vouchers).
    Meals,
    /// Transport expenses (vouchers, fuel reimbursement).
    Transport,
    /// Everything else (PPE, tooling, sundry reimbursements).
    Other,
}

/// External cost sums for one employee-period, one value per bucket.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExternalCosts {
    /// Meals bucket sum.
    pub meals: Decimal,
    /// Transport bucket sum.
    pub transport: Decimal,
    /// Other bucket sum.
    pub other: Decimal,
}

/// The four-bucket split of an employee-period's total cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Labor cost (salary, deductions, overtime).
    pub labor: Decimal,
    /// Meals cost.
    pub meals: Decimal,
    /// Transport cost.
    pub transport: Decimal,
    /// Other costs.
    pub other: Decimal,
    /// Sum of the four buckets.
    pub total: Decimal,
}

/// Splits a computed KPI vector into the cost buckets used for project
/// cost attribution.
pub fn allocate_costs(kpi: &EmployeeKpi) -> CostBreakdown {
    CostBreakdown {
        labor: kpi.labor_cost,
        meals: kpi.meals_cost,
        transport: kpi.transport_cost,
        other: kpi.other_costs,
        total: kpi.labor_cost + kpi.meals_cost + kpi.transport_cost + kpi.other_costs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn kpi_with_costs() -> EmployeeKpi {
        EmployeeKpi {
            worked_hours: dec("176.0"),
            overtime_hours: Decimal::ZERO,
            absences: 0,
            delay_hours: Decimal::ZERO,
            productivity_pct: dec("100"),
            absenteeism_pct: Decimal::ZERO,
            daily_mean_hours: dec("8.8"),
            justified_absences: 0,
            labor_cost: dec("3500.00"),
            meals_cost: dec("280.00"),
            transport_cost: dec("150.00"),
            other_costs: dec("32.50"),
            lost_hours: Decimal::ZERO,
            overtime_value: Decimal::ZERO,
            justified_absence_value: Decimal::ZERO,
            efficiency_pct: dec("100"),
            dsr_forfeiture: Decimal::ZERO,
            overtime_dsr_value: Decimal::ZERO,
            total_cost: dec("3962.50"),
        }
    }

    #[test]
    fn test_allocation_mirrors_kpi_buckets() {
        let breakdown = allocate_costs(&kpi_with_costs());
        assert_eq!(breakdown.labor, dec("3500.00"));
        assert_eq!(breakdown.meals, dec("280.00"));
        assert_eq!(breakdown.transport, dec("150.00"));
        assert_eq!(breakdown.other, dec("32.50"));
        assert_eq!(breakdown.total, dec("3962.50"));
    }

    #[test]
    fn test_bucket_serialization() {
        assert_eq!(serde_json::to_string(&CostBucket::Meals).unwrap(), "\"meals\"");
        assert_eq!(
            serde_json::to_string(&CostBucket::Transport).unwrap(),
            "\"transport\""
        );
        assert_eq!(serde_json::to_string(&CostBucket::Other).unwrap(), "\"other\"");
    }

    #[test]
    fn test_external_costs_default_is_zero() {
        let costs = ExternalCosts::default();
        assert_eq!(costs.meals, Decimal::ZERO);
        assert_eq!(costs.transport, Decimal::ZERO);
        assert_eq!(costs.other, Decimal::ZERO);
    }
}
