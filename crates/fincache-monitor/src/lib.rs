//! Logging setup and cache statistics.

mod logging;
mod stats;

pub use logging::setup_logging;
pub use stats::{CacheStats, StatsSnapshot};
