//! HTTP facade for the KPI engine.
//!
//! A single `POST /calculate` endpoint wraps the pure calculation: raw
//! punches in, the audited fifteen-indicator vector out. All rules live in
//! [`crate::calculation`]; this module only adapts JSON to the models.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CalculationRequest, EmployeeRequest, ExternalCostRequest, PeriodRequest, RecordRequest,
    ScheduleRequest,
};
pub use response::{ApiError, ApiErrorResponse, KpiResponse};
pub use state::AppState;
