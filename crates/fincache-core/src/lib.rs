//! Core types and errors for the market data cache.
//!
//! This crate provides the building blocks shared by the cache tiers:
//! - Cache categories and their key fields
//! - The opaque record representation and key-field extraction
//! - Error types for the in-memory and disk tiers

pub mod types;
pub mod error;

pub use error::{CacheError, CacheResult, RecordError};
pub use types::*;
