//! Error types for the KPI engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during normalization and KPI
//! computation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the KPI engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use timecard_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A time record is in an impossible state (exit before entry, lunch
    /// return before lunch out, duplicate day). Fails the upsert; never
    /// silently corrected.
    #[error("Data integrity violation for employee '{employee_id}' on {date}, field '{field}': {message}")]
    DataIntegrity {
        /// The employee the record belongs to.
        employee_id: String,
        /// The record date.
        date: NaiveDate,
        /// The offending field.
        field: String,
        /// A description of the violation.
        message: String,
    },

    /// Employee was not found in the store.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee id that was not found.
        employee_id: String,
    },

    /// An arithmetic anomaly occurred during KPI computation. The whole
    /// period computation aborts; partial KPIs are never surfaced.
    #[error("Computation error: {message}")]
    ComputationError {
        /// A description of the computation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
