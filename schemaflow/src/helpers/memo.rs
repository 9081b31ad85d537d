//! Memoized validators backed by a concurrent map.
//!
//! The cache is local to one wrapped validator. Concurrent calls with
//! identical arguments may both compute, but neither corrupts the cache nor
//! observes a partially-computed result.

use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::trace;

use crate::schema::FieldValidator;

/// Wraps a validator so repeated runs against equal values reuse the first
/// result.
#[must_use]
pub fn memoized(inner: FieldValidator) -> FieldValidator {
    let cache: Arc<DashMap<String, Result<Value, String>>> = Arc::new(DashMap::new());
    let name = inner.name().to_string();

    FieldValidator::new(format!("memoized({name})"), move |value| {
        let Ok(key) = serde_json::to_string(&value) else {
            // Unkeyable values bypass the cache.
            return inner.apply(value);
        };

        if let Some(hit) = cache.get(&key) {
            trace!(validator = %name, "memoized validator cache hit");
            return hit.clone();
        }

        let result = inner.apply(value);
        cache.insert(key, result.clone());
        result
    })
}
