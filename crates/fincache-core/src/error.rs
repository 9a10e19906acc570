//! Error types for the cache.

use crate::types::CacheCategory;
use thiserror::Error;

/// Top-level cache error.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

/// Errors raised while merging records into the in-memory cache.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Record {index} for {category} is missing key field '{field}'")]
    MissingKeyField {
        category: CacheCategory,
        field: &'static str,
        index: usize,
    },
}

/// Result type alias for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
