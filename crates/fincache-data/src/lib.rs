//! In-memory and disk cache tiers for market data.
//!
//! - [`RecordCache`] keeps merged record lists per category and ticker for
//!   the lifetime of the process.
//! - [`ExpiringDiskCache`] persists arbitrary values across runs, each entry
//!   stamped with its write time and checked against a maximum age on read.
//! - [`CachedFetch`] composes the disk cache around a fetch operation.

mod disk;
mod key;
mod memoize;
mod record_cache;

pub use disk::{ExpiringDiskCache, DEFAULT_CACHE_DIR};
pub use key::{build_key, CallArgs, KEY_DELIMITER};
pub use memoize::{cached, default_duration, Cached, CachedFetch};
pub use record_cache::{global_cache, RecordCache};
