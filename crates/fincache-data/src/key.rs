//! Deterministic cache keys.

use std::collections::BTreeMap;
use std::fmt::Display;

/// Separator between the prefix and each rendered argument.
pub const KEY_DELIMITER: &str = "_";

/// Build a cache key from a prefix and named arguments.
///
/// Arguments are rendered as `name=value` in name order and joined with
/// [`KEY_DELIMITER`]: `build_key("prices", {ticker: AAPL, end: 2024})` is
/// `prices_end=2024_ticker=AAPL`. Delimiters inside names or values are not
/// escaped, so callers must avoid arguments that could run together.
pub fn build_key(prefix: &str, args: &BTreeMap<String, String>) -> String {
    let args = args
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(KEY_DELIMITER);
    format!("{}{}{}", prefix, KEY_DELIMITER, args)
}

/// Named arguments of a cached call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallArgs {
    args: BTreeMap<String, String>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an argument, rendered with its `Display` form.
    pub fn arg(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.args.insert(name.into(), value.to_string());
        self
    }

    /// Rendered value of an argument.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.args.get(name).map(String::as_str)
    }

    /// Ticker argument, if any. Used in log lines.
    pub fn ticker(&self) -> &str {
        self.get("ticker").unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Cache key for these arguments under `prefix`.
    pub fn key(&self, prefix: &str) -> String {
        build_key(prefix, &self.args)
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for CallArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(CallArgs::new(), |args, (k, v)| args.arg(k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_ignores_argument_order() {
        let a = CallArgs::new().arg("ticker", "AAPL").arg("period", "Q1");
        let b = CallArgs::new().arg("period", "Q1").arg("ticker", "AAPL");

        assert_eq!(a.key("financial"), b.key("financial"));
        assert_eq!(a.key("financial"), "financial_period=Q1_ticker=AAPL");
    }

    #[test]
    fn test_build_key_renders_values() {
        let args: CallArgs = [("limit", 10)].into_iter().collect();
        let args = args.arg("ticker", "MSFT").arg("ratio", 1.5);

        assert_eq!(args.key("news"), "news_limit=10_ratio=1.5_ticker=MSFT");
        assert_eq!(args.get("limit"), Some("10"));
        assert_eq!(args.ticker(), "MSFT");
    }

    #[test]
    fn test_empty_args_keep_delimiter() {
        assert_eq!(build_key("prices", &BTreeMap::new()), "prices_");
        assert!(CallArgs::new().is_empty());
        assert_eq!(CallArgs::new().ticker(), "");
    }

    #[test]
    fn test_delimiter_collisions_are_not_escaped() {
        let a = CallArgs::new().arg("a", "1_b=2");
        let b = CallArgs::new().arg("a", "1").arg("b", "2");
        assert_eq!(a.key("p"), b.key("p"));
    }
}
