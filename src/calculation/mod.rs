//! Calculation logic for the KPI engine.
//!
//! This module contains the punch normalizer with its tolerance rule, the
//! working-calendar helpers, the overtime valuation, the DSR forfeiture
//! calculator, the fifteen-indicator KPI engine, the cost allocation and
//! the cross-validation audit.

mod calendar;
mod costs;
mod cross_validator;
mod dsr;
mod kpi;
mod normalizer;
mod overtime;
mod tolerance;

pub use calendar::{business_days_in_month, rest_days_in_month};
pub use costs::{CostBreakdown, CostBucket, ExternalCosts, allocate_costs};
pub use cross_validator::{Divergence, cross_validate, verify};
pub use dsr::{DsrAssessment, DsrWeek, assess_dsr};
pub use kpi::{KpiEngine, compute_kpis_from_parts, fallback_schedule};
pub use normalizer::normalize_record;
pub use overtime::overtime_value_for_record;
pub use tolerance::apply_tolerance;
