//! Engine configuration: typed settings, YAML loading, and the refreshable
//! process-wide handle.

mod loader;
mod types;

pub use loader::{ConfigLoader, SharedConfig};
pub use types::{EngineConfig, HolidayDate, WeekStart};
