//! Core data types for the cache.

mod category;
mod record;

pub use category::CacheCategory;
pub use record::{key_of, Record};
