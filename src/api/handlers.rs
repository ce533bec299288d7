//! HTTP request handlers for the KPI engine API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    CostBucket, ExternalCosts, allocate_costs, compute_kpis_from_parts, cross_validate,
    fallback_schedule, normalize_record,
};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::{Employee, Period, RecordKind, Schedule, TimeRecord};

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, KpiResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

/// Handler for the POST /calculate endpoint.
///
/// Normalizes the submitted punches, computes the KPI vector and runs the
/// cross-validation audit. Per-record problems (unusable punches, unknown
/// kind tags, duplicate days) are reported as warnings without aborting the
/// batch; computation-level anomalies fail the request.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing KPI calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    if request.period.start_date > request.period.end_date {
        return (
            StatusCode::BAD_REQUEST,
            [(header::CONTENT_TYPE, "application/json")],
            Json(ApiError::validation_error(
                "period start_date must not be after end_date",
            )),
        )
            .into_response();
    }

    let config = state.config().get();
    let employee: Employee = request.employee.clone().into();
    let period: Period = request.period.clone().into();

    let schedule: Schedule = match &request.schedule {
        Some(req) => req.clone().into(),
        None => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee.id,
                "no schedule in request; using the configured default"
            );
            fallback_schedule(&config)
        }
    };
    if let Err(err) = schedule.validate() {
        return (
            StatusCode::BAD_REQUEST,
            [(header::CONTENT_TYPE, "application/json")],
            Json(ApiError::validation_error(err.to_string())),
        )
            .into_response();
    }

    let start_time = Instant::now();
    match perform_calculation(&request, &employee, &schedule, &period, &config) {
        Ok(response) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee.id,
                records_count = request.records.len(),
                labor_cost = %response.kpis.labor_cost,
                divergences = response.divergences.len(),
                duration_us = duration.as_micros(),
                "KPI calculation completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(response),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "KPI calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Normalizes the request's records and computes the audited KPI vector.
fn perform_calculation(
    request: &CalculationRequest,
    employee: &Employee,
    schedule: &Schedule,
    period: &Period,
    config: &EngineConfig,
) -> Result<KpiResponse, EngineError> {
    let mut warnings: Vec<String> = Vec::new();
    let mut records: Vec<TimeRecord> = Vec::new();

    for raw in &request.records {
        let kind = match RecordKind::from_tag(&raw.kind) {
            Some(kind) => kind,
            None => {
                warn!(tag = %raw.kind, date = %raw.date, "unknown record kind tag");
                warnings.push(format!(
                    "unknown record kind '{}' on {}; treated as workday_normal",
                    raw.kind, raw.date
                ));
                RecordKind::WorkdayNormal
            }
        };

        if records.iter().any(|r| r.date == raw.date) {
            warnings.push(format!("duplicate record for {} skipped", raw.date));
            continue;
        }

        let record = TimeRecord {
            notes: raw.notes.clone(),
            ..TimeRecord::raw(
                employee.id.clone(),
                raw.date,
                kind,
                raw.entry,
                raw.lunch_out,
                raw.lunch_in,
                raw.exit,
            )
        };

        match normalize_record(&record, schedule, config) {
            Ok(normalized) => {
                if normalized.flagged {
                    warnings.push(format!(
                        "record on {} is missing entry or exit; derived fields zeroed",
                        normalized.date
                    ));
                }
                records.push(normalized);
            }
            Err(err) => {
                // A broken record never aborts the batch.
                warnings.push(format!("record on {} rejected: {}", raw.date, err));
            }
        }
    }

    let mut external = ExternalCosts::default();
    for cost in &request.external_costs {
        if !period.contains_date(cost.date) {
            warnings.push(format!("external cost on {} outside period skipped", cost.date));
            continue;
        }
        match cost.bucket {
            CostBucket::Meals => external.meals += cost.amount,
            CostBucket::Transport => external.transport += cost.amount,
            CostBucket::Other => external.other += cost.amount,
        }
    }
    let kpis = compute_kpis_from_parts(employee, schedule, &records, period, external, config)?;
    let divergences = cross_validate(&kpis, employee, schedule, &records, period, external, config);
    let cost_breakdown = allocate_costs(&kpis);

    Ok(KpiResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: employee.id.clone(),
        period: *period,
        kpis,
        cost_breakdown,
        divergences,
        warnings,
    })
}
