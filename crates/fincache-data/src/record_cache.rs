//! In-memory record cache.

use fincache_core::error::RecordError;
use fincache_core::types::{key_of, CacheCategory, Record};
use std::collections::{HashMap, HashSet};
use std::sync::{OnceLock, PoisonError, RwLock};
use tracing::debug;

type BucketKey = (CacheCategory, String);

/// In-memory cache of record lists per (category, ticker).
///
/// Writes merge into the stored list instead of replacing it: records whose
/// key field is already present are dropped and the stored version wins.
#[derive(Debug, Default)]
pub struct RecordCache {
    lists: RwLock<HashMap<BucketKey, Vec<Record>>>,
}

static GLOBAL: OnceLock<RecordCache> = OnceLock::new();

/// Process-wide record cache, created on first use.
pub fn global_cache() -> &'static RecordCache {
    GLOBAL.get_or_init(RecordCache::new)
}

impl RecordCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket(category: CacheCategory, ticker: &str) -> BucketKey {
        (category, ticker.to_string())
    }

    /// Get the cached records, or `None` if nothing was stored for this ticker.
    pub fn get(&self, category: CacheCategory, ticker: &str) -> Option<Vec<Record>> {
        let lists = self.lists.read().unwrap_or_else(PoisonError::into_inner);
        lists.get(&Self::bucket(category, ticker)).cloned()
    }

    /// Merge `records` into the cached list.
    ///
    /// Existing records keep their order; new records are appended in input
    /// order, skipping any whose key field value is already present. Fails
    /// without touching the cache if any record lacks the key field.
    pub fn set(
        &self,
        category: CacheCategory,
        ticker: &str,
        records: Vec<Record>,
    ) -> Result<(), RecordError> {
        let keys = records
            .iter()
            .enumerate()
            .map(|(i, r)| key_of(r, category, i))
            .collect::<Result<Vec<_>, _>>()?;

        let mut lists = self.lists.write().unwrap_or_else(PoisonError::into_inner);
        let stored = lists.entry(Self::bucket(category, ticker)).or_default();

        let mut seen = stored
            .iter()
            .enumerate()
            .map(|(i, r)| key_of(r, category, i))
            .collect::<Result<HashSet<_>, _>>()?;

        let before = stored.len();
        for (record, key) in records.into_iter().zip(keys) {
            if seen.insert(key) {
                stored.push(record);
            }
        }

        debug!(
            "Merged {} {} records for {} ({} total)",
            stored.len() - before,
            category,
            ticker,
            stored.len()
        );
        Ok(())
    }

    /// Number of cached records for a ticker.
    pub fn len(&self, category: CacheCategory, ticker: &str) -> usize {
        let lists = self.lists.read().unwrap_or_else(PoisonError::into_inner);
        lists
            .get(&Self::bucket(category, ticker))
            .map_or(0, Vec::len)
    }

    /// Tickers with cached data in a category, sorted.
    pub fn tickers(&self, category: CacheCategory) -> Vec<String> {
        let lists = self.lists.read().unwrap_or_else(PoisonError::into_inner);
        let mut tickers: Vec<String> = lists
            .keys()
            .filter(|(c, _)| *c == category)
            .map(|(_, t)| t.clone())
            .collect();
        tickers.sort();
        tickers
    }

    /// Drop all cached data.
    pub fn clear(&self) {
        self.lists
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn get_prices(&self, ticker: &str) -> Option<Vec<Record>> {
        self.get(CacheCategory::Prices, ticker)
    }

    pub fn set_prices(&self, ticker: &str, data: Vec<Record>) -> Result<(), RecordError> {
        self.set(CacheCategory::Prices, ticker, data)
    }

    pub fn get_financial_metrics(&self, ticker: &str) -> Option<Vec<Record>> {
        self.get(CacheCategory::FinancialMetrics, ticker)
    }

    pub fn set_financial_metrics(&self, ticker: &str, data: Vec<Record>) -> Result<(), RecordError> {
        self.set(CacheCategory::FinancialMetrics, ticker, data)
    }

    pub fn get_line_items(&self, ticker: &str) -> Option<Vec<Record>> {
        self.get(CacheCategory::LineItems, ticker)
    }

    pub fn set_line_items(&self, ticker: &str, data: Vec<Record>) -> Result<(), RecordError> {
        self.set(CacheCategory::LineItems, ticker, data)
    }

    pub fn get_insider_trades(&self, ticker: &str) -> Option<Vec<Record>> {
        self.get(CacheCategory::InsiderTrades, ticker)
    }

    pub fn set_insider_trades(&self, ticker: &str, data: Vec<Record>) -> Result<(), RecordError> {
        self.set(CacheCategory::InsiderTrades, ticker, data)
    }

    pub fn get_company_news(&self, ticker: &str) -> Option<Vec<Record>> {
        self.get(CacheCategory::CompanyNews, ticker)
    }

    pub fn set_company_news(&self, ticker: &str, data: Vec<Record>) -> Result<(), RecordError> {
        self.set(CacheCategory::CompanyNews, ticker, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::thread;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn price(time: &str, close: f64) -> Record {
        record(json!({"time": time, "close": close}))
    }

    #[test]
    fn test_miss_on_unknown_ticker() {
        let cache = RecordCache::new();
        assert!(cache.get(CacheCategory::Prices, "UNKNOWN").is_none());
        assert_eq!(cache.len(CacheCategory::Prices, "UNKNOWN"), 0);
    }

    #[test]
    fn test_explicit_empty_list_is_present() {
        let cache = RecordCache::new();
        cache.set(CacheCategory::CompanyNews, "AAPL", vec![]).unwrap();
        assert_eq!(cache.get(CacheCategory::CompanyNews, "AAPL"), Some(vec![]));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let cache = RecordCache::new();
        let batch = vec![price("2024-01-02", 10.0), price("2024-01-03", 11.0)];

        cache.set_prices("AAPL", batch.clone()).unwrap();
        let once = cache.get_prices("AAPL").unwrap();
        cache.set_prices("AAPL", batch).unwrap();

        assert_eq!(cache.get_prices("AAPL").unwrap(), once);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_order_preserved() {
        let cache = RecordCache::new();
        let r1 = price("2024-01-02", 10.0);
        let r2 = price("2024-01-03", 11.0);
        let r3 = price("2024-01-01", 9.0);

        cache.set_prices("AAPL", vec![r1.clone(), r2.clone()]).unwrap();
        cache.set_prices("AAPL", vec![r3.clone()]).unwrap();

        assert_eq!(cache.get_prices("AAPL").unwrap(), vec![r1, r2, r3]);
    }

    #[test]
    fn test_existing_record_wins() {
        let cache = RecordCache::new();
        let original = price("2024-01-02", 10.0);
        let revised = price("2024-01-02", 99.0);

        cache.set_prices("AAPL", vec![original.clone()]).unwrap();
        cache.set_prices("AAPL", vec![revised]).unwrap();

        assert_eq!(cache.get_prices("AAPL").unwrap(), vec![original]);
    }

    #[test]
    fn test_duplicates_within_batch_collapse() {
        let cache = RecordCache::new();
        let first = record(json!({"date": "2024-03-01", "title": "first"}));
        let second = record(json!({"date": "2024-03-01", "title": "second"}));

        cache.set_company_news("MSFT", vec![first.clone(), second]).unwrap();

        assert_eq!(cache.get_company_news("MSFT").unwrap(), vec![first]);
    }

    #[test]
    fn test_missing_key_field_fails_without_mutation() {
        let cache = RecordCache::new();
        let good = record(json!({"filing_date": "2024-02-01", "shares": 100}));
        cache.set_insider_trades("TSLA", vec![good.clone()]).unwrap();

        let bad = record(json!({"transaction_date": "2024-02-02"}));
        let err = cache
            .set_insider_trades("TSLA", vec![record(json!({"filing_date": "2024-02-03"})), bad])
            .unwrap_err();

        assert_eq!(
            err,
            RecordError::MissingKeyField {
                category: CacheCategory::InsiderTrades,
                field: "filing_date",
                index: 1,
            }
        );
        assert_eq!(cache.get_insider_trades("TSLA").unwrap(), vec![good]);
    }

    #[test]
    fn test_categories_are_independent() {
        let cache = RecordCache::new();
        let metrics = record(json!({"report_period": "2023-12-31", "pe_ratio": 28.1}));
        cache.set_financial_metrics("AAPL", vec![metrics.clone()]).unwrap();

        assert!(cache.get_line_items("AAPL").is_none());
        assert_eq!(cache.get_financial_metrics("AAPL").unwrap(), vec![metrics]);

        let item = record(json!({"report_period": "2023-12-31", "revenue": 1}));
        cache.set_line_items("AAPL", vec![item]).unwrap();
        assert_eq!(cache.len(CacheCategory::LineItems, "AAPL"), 1);
        assert_eq!(cache.len(CacheCategory::FinancialMetrics, "AAPL"), 1);
    }

    #[test]
    fn test_tickers_and_clear() {
        let cache = RecordCache::new();
        cache.set_prices("MSFT", vec![price("2024-01-02", 1.0)]).unwrap();
        cache.set_prices("AAPL", vec![price("2024-01-02", 1.0)]).unwrap();

        assert_eq!(cache.tickers(CacheCategory::Prices), vec!["AAPL", "MSFT"]);
        assert!(cache.tickers(CacheCategory::CompanyNews).is_empty());

        cache.clear();
        assert!(cache.get_prices("AAPL").is_none());
    }

    #[test]
    fn test_concurrent_sets_keep_every_record() {
        let cache = Arc::new(RecordCache::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..50 {
                        let time = format!("t{}-{}", t, i);
                        cache.set_prices("AAPL", vec![price(&time, 1.0)]).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(CacheCategory::Prices, "AAPL"), 400);
    }

    #[test]
    fn test_global_cache_is_shared() {
        let a = global_cache() as *const RecordCache;
        let b = global_cache() as *const RecordCache;
        assert_eq!(a, b);
    }
}
