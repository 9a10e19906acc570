//! Inspect a cached value.

use anyhow::{anyhow, Result};
use chrono::Duration;
use fincache_config::CacheSettings;
use fincache_data::ExpiringDiskCache;
use serde_json::Value;
use std::path::Path;

use super::config_or_default;
use crate::cli::GetArgs;

pub async fn run(args: GetArgs, config_path: &Path) -> Result<()> {
    let config = config_or_default(config_path)?;
    let cache = ExpiringDiskCache::from_settings(&config.cache);
    let max_age = max_age(&args, &config.cache)?;

    match cache.get::<Value>(&args.key, max_age) {
        Some(value) => {
            if let Some(age) = cache.entry_age(&args.key) {
                println!("Age: {}s", age.num_seconds());
            }
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        None => println!("miss"),
    }

    Ok(())
}

/// Max age for the lookup: the flag, no limit, or the configured window.
fn max_age(args: &GetArgs, settings: &CacheSettings) -> Result<Option<Duration>> {
    if args.no_expiry {
        return Ok(None);
    }
    match args.max_age_secs {
        Some(secs) if secs < 0 => Err(anyhow!("--max-age-secs must not be negative, got {}", secs)),
        Some(secs) => Duration::try_seconds(secs)
            .map(Some)
            .ok_or_else(|| anyhow!("--max-age-secs out of range: {}", secs)),
        None => Ok(Some(settings.default_duration()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(max_age_secs: Option<i64>, no_expiry: bool) -> GetArgs {
        GetArgs {
            key: "prices_ticker=AAPL".to_string(),
            max_age_secs,
            no_expiry,
        }
    }

    #[test]
    fn test_max_age_sources() {
        let settings = CacheSettings::default();

        assert_eq!(max_age(&args(Some(30), false), &settings).unwrap(), Some(Duration::seconds(30)));
        assert_eq!(max_age(&args(None, true), &settings).unwrap(), None);
        assert_eq!(max_age(&args(None, false), &settings).unwrap(), Some(Duration::hours(24)));
    }

    #[test]
    fn test_out_of_range_max_age_is_an_error() {
        let settings = CacheSettings::default();
        assert!(max_age(&args(Some(i64::MAX), false), &settings).is_err());
        assert!(max_age(&args(Some(-5), false), &settings).is_err());

        let broken = CacheSettings {
            default_duration_hours: i64::MAX,
            ..CacheSettings::default()
        };
        assert!(max_age(&args(None, false), &broken).is_err());
    }
}
