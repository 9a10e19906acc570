//! CLI command implementations.

pub mod categories;
pub mod clear;
pub mod get;
pub mod key;
pub mod validate;

use fincache_config::{load_config, AppConfig};
use fincache_data::ExpiringDiskCache;
use std::path::Path;
use tracing::warn;

/// Load the configuration, falling back to defaults when the file is absent.
pub(crate) fn config_or_default(config_path: &Path) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        warn!("Config file {:?} not found, using defaults", config_path);
        return Ok(AppConfig::default());
    }
    Ok(load_config(config_path)?)
}

/// Disk cache described by the configuration.
pub(crate) fn disk_cache(config_path: &Path) -> anyhow::Result<ExpiringDiskCache> {
    let config = config_or_default(config_path)?;
    Ok(ExpiringDiskCache::from_settings(&config.cache))
}
