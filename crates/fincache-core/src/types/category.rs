//! Cache categories and their key fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of market data held by the record cache.
///
/// Each category names exactly one key field whose value must be unique
/// within a cached record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheCategory {
    /// Price bars, keyed by `time`
    Prices,
    /// Financial metrics, keyed by `report_period`
    FinancialMetrics,
    /// Financial statement line items, keyed by `report_period`
    LineItems,
    /// Insider trades, keyed by `filing_date`
    InsiderTrades,
    /// Company news, keyed by `date`
    CompanyNews,
}

impl CacheCategory {
    /// Every category, in declaration order.
    pub const ALL: [CacheCategory; 5] = [
        CacheCategory::Prices,
        CacheCategory::FinancialMetrics,
        CacheCategory::LineItems,
        CacheCategory::InsiderTrades,
        CacheCategory::CompanyNews,
    ];

    /// Name of the field that identifies a record within this category.
    pub fn key_field(&self) -> &'static str {
        match self {
            CacheCategory::Prices => "time",
            CacheCategory::FinancialMetrics => "report_period",
            CacheCategory::LineItems => "report_period",
            CacheCategory::InsiderTrades => "filing_date",
            CacheCategory::CompanyNews => "date",
        }
    }

    /// Wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheCategory::Prices => "prices",
            CacheCategory::FinancialMetrics => "financial_metrics",
            CacheCategory::LineItems => "line_items",
            CacheCategory::InsiderTrades => "insider_trades",
            CacheCategory::CompanyNews => "company_news",
        }
    }
}

impl fmt::Display for CacheCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prices" => Ok(CacheCategory::Prices),
            "financial_metrics" => Ok(CacheCategory::FinancialMetrics),
            "line_items" => Ok(CacheCategory::LineItems),
            "insider_trades" => Ok(CacheCategory::InsiderTrades),
            "company_news" => Ok(CacheCategory::CompanyNews),
            _ => Err(format!("Invalid cache category: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_fields() {
        assert_eq!(CacheCategory::Prices.key_field(), "time");
        assert_eq!(CacheCategory::FinancialMetrics.key_field(), "report_period");
        assert_eq!(CacheCategory::LineItems.key_field(), "report_period");
        assert_eq!(CacheCategory::InsiderTrades.key_field(), "filing_date");
        assert_eq!(CacheCategory::CompanyNews.key_field(), "date");
    }

    #[test]
    fn test_category_parse_and_display() {
        for category in CacheCategory::ALL {
            let parsed: CacheCategory = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
        assert!("news".parse::<CacheCategory>().is_err());
    }

    #[test]
    fn test_category_serde_names() {
        let json = serde_json::to_string(&CacheCategory::InsiderTrades).unwrap();
        assert_eq!(json, "\"insider_trades\"");
    }
}
