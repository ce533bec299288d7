//! Application state for the KPI engine API.

use crate::config::SharedConfig;

/// Shared application state.
///
/// Holds the refreshable engine configuration used by every request
/// handler.
#[derive(Clone)]
pub struct AppState {
    config: SharedConfig,
}

impl AppState {
    /// Creates a new application state around the given configuration
    /// handle.
    pub fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration handle.
    pub fn config(&self) -> &SharedConfig {
        &self.config
    }
}
