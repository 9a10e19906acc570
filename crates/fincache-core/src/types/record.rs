//! Opaque record representation.

use crate::error::RecordError;
use crate::types::CacheCategory;
use serde_json::{Map, Value};

/// A single cached record: a mapping of field name to JSON value.
///
/// Only the category's key field is ever inspected by the cache.
pub type Record = Map<String, Value>;

/// Extract the identity of a record within `category`.
///
/// The key field's JSON text is used as the identity, so `"2024-01-02"` and
/// `20240102` are distinct keys. Numbers compare by value: `1` and `1.0` are
/// the same key. `index` is the record's position in its batch and is only
/// used for error reporting.
pub fn key_of(record: &Record, category: CacheCategory, index: usize) -> Result<String, RecordError> {
    let field = category.key_field();
    record
        .get(field)
        .map(identity)
        .ok_or(RecordError::MissingKeyField {
            category,
            field,
            index,
        })
}

fn identity(value: &Value) -> String {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            // Integral floats render like the equal integer.
            Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                (f as i64).to_string()
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
