//! Memoization of fetch operations through the disk cache.

use crate::disk::ExpiringDiskCache;
use crate::key::CallArgs;
use chrono::Duration;
use fincache_config::CacheSettings;
use fincache_core::error::CacheResult;
use fincache_monitor::CacheStats;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};

/// Default validity window of a memoized result.
pub fn default_duration() -> Duration {
    Duration::hours(24)
}

/// Layers disk caching around fetch operations.
///
/// A call derives its key from `prefix` and the call arguments, answers from
/// the disk cache when a fresh entry exists, and otherwise runs the fetch and
/// stores any non-empty result.
#[derive(Debug, Clone)]
pub struct CachedFetch {
    prefix: String,
    duration: Duration,
    cache: Arc<ExpiringDiskCache>,
    stats: Arc<CacheStats>,
}

impl CachedFetch {
    /// Create a wrapper with the default 24 hour validity.
    pub fn new(prefix: impl Into<String>, cache: Arc<ExpiringDiskCache>) -> Self {
        Self {
            prefix: prefix.into(),
            duration: default_duration(),
            cache,
            stats: Arc::new(CacheStats::new()),
        }
    }

    /// Create a wrapper using the configured directory and validity window.
    pub fn from_settings(prefix: impl Into<String>, settings: &CacheSettings) -> CacheResult<Self> {
        let cache = Arc::new(ExpiringDiskCache::from_settings(settings));
        Ok(Self::new(prefix, cache).with_duration(settings.default_duration()?))
    }

    /// Set how long stored results stay valid.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Report hits and misses into shared counters.
    pub fn with_stats(mut self, stats: Arc<CacheStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn stats(&self) -> &Arc<CacheStats> {
        &self.stats
    }

    /// Bind this wrapper to a fetch operation.
    pub fn wrap<F>(self, inner: F) -> Cached<F> {
        Cached { fetch: self, inner }
    }

    /// Run `fetch` unless a fresh result for `args` is cached.
    ///
    /// Errors from `fetch` propagate unchanged. `None` and empty results
    /// (`null`, `[]`, `{}` once serialized) are returned but never stored.
    pub async fn call<T, E, F, Fut>(&self, args: &CallArgs, fetch: F) -> Result<Option<T>, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(CallArgs) -> Fut,
        Fut: Future<Output = Result<Option<T>, E>>,
    {
        let key = args.key(&self.prefix);

        if let Some(cached) = self.cache.get::<T>(&key, Some(self.duration)) {
            self.stats.record_hit();
            info!("Cache HIT for {}: {}", self.prefix, args.ticker());
            return Ok(Some(cached));
        }

        self.stats.record_miss();
        info!("Cache MISS for {}: {}", self.prefix, args.ticker());

        let result = fetch(args.clone()).await?;

        if let Some(value) = &result {
            if self.should_store(value) {
                match self.cache.put(&key, value) {
                    Ok(()) => {
                        self.stats.record_store();
                        info!("Saved to cache: {}: {}", self.prefix, args.ticker());
                    }
                    Err(e) => warn!("Failed to cache {}: {}", key, e),
                }
            }
        }

        Ok(result)
    }

    fn should_store<T: Serialize>(&self, value: &T) -> bool {
        match serde_json::to_value(value) {
            Ok(Value::Null) => false,
            Ok(Value::Array(items)) => !items.is_empty(),
            Ok(Value::Object(fields)) => !fields.is_empty(),
            Ok(_) => true,
            Err(e) => {
                warn!("Result for {} is not serializable: {}", self.prefix, e);
                false
            }
        }
    }
}

/// A fetch operation with disk caching layered on.
#[derive(Debug, Clone)]
pub struct Cached<F> {
    fetch: CachedFetch,
    inner: F,
}

/// Wrap `inner` so that every call goes through `fetch`.
pub fn cached<F>(fetch: CachedFetch, inner: F) -> Cached<F> {
    fetch.wrap(inner)
}

impl<F> Cached<F> {
    /// Call the wrapped operation through the cache.
    pub async fn call<T, E, Fut>(&self, args: CallArgs) -> Result<Option<T>, E>
    where
        T: Serialize + DeserializeOwned,
        F: Fn(CallArgs) -> Fut,
        Fut: Future<Output = Result<Option<T>, E>>,
    {
        self.fetch.call(&args, |a| (self.inner)(a)).await
    }

    pub fn cache(&self) -> &CachedFetch {
        &self.fetch
    }
}
