//! Configuration structures.

use fincache_core::error::{CacheError, CacheResult};
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cache: CacheSettings,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "fincache".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl LoggingConfig {
    /// Whether log lines should be emitted as JSON.
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Disk cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Directory holding cache entries, relative to the working directory
    pub dir: String,
    /// Validity window for memoized results
    pub default_duration_hours: i64,
}

impl CacheSettings {
    /// Validity window as a duration.
    ///
    /// Fails for negative values and for hour counts chrono cannot represent.
    pub fn default_duration(&self) -> CacheResult<chrono::Duration> {
        if self.default_duration_hours < 0 {
            return Err(CacheError::Config(format!(
                "cache.default_duration_hours must not be negative, got {}",
                self.default_duration_hours
            )));
        }
        chrono::Duration::try_hours(self.default_duration_hours).ok_or_else(|| {
            CacheError::Config(format!(
                "cache.default_duration_hours out of range: {}",
                self.default_duration_hours
            ))
        })
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            dir: "cache".to_string(),
            default_duration_hours: 24,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.cache.dir, "cache");
        assert_eq!(config.cache.default_duration().unwrap(), chrono::Duration::hours(24));
        assert!(!config.logging.is_json());
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_default_duration_rejects_out_of_range_hours() {
        let settings = CacheSettings {
            default_duration_hours: i64::MAX,
            ..CacheSettings::default()
        };
        assert!(matches!(settings.default_duration(), Err(CacheError::Config(_))));

        let negative = CacheSettings {
            default_duration_hours: -1,
            ..CacheSettings::default()
        };
        assert!(matches!(negative.default_duration(), Err(CacheError::Config(_))));
    }
}
