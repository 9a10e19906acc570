//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, CacheSettings, LoggingConfig};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables use the `FINCACHE` prefix and `__` as the section
/// separator, e.g. `FINCACHE__CACHE__DIR=/tmp/cache`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("FINCACHE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
