//! Normalized records and serialization projections.
//!
//! A [`Record`] is the success result of a validation pass: every value has
//! been coerced, defaulted, and checked. Records are read-only; to change
//! one, change the input and validate again.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::errors::SchemaflowError;

/// A normalized record, with fields in schema declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    values: Map<String, Value>,
}

impl Record {
    /// Creates a record from already-normalized values.
    pub(crate) fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Gets a field value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns true if the record holds the field.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the field names in declaration order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the record holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a copy of the record as a plain mapping.
    #[must_use]
    pub fn to_dict(&self) -> Map<String, Value> {
        self.values.clone()
    }

    /// Returns the record as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }

    /// Renders the record as JSON text.
    pub fn to_json(&self) -> Result<String, SchemaflowError> {
        serde_json::to_string(&self.values)
            .map_err(|e| SchemaflowError::Serialization(e.to_string()))
    }

    /// Returns a filtered projection of the record.
    #[must_use]
    pub fn dump(&self, config: &DumpConfig) -> Map<String, Value> {
        self.values
            .iter()
            .filter(|(key, _)| config.admits(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Renders a filtered projection as JSON text.
    pub fn dump_json(&self, config: &DumpConfig) -> Result<String, SchemaflowError> {
        serde_json::to_string(&self.dump(config))
            .map_err(|e| SchemaflowError::Serialization(e.to_string()))
    }
}

/// Field filter for serialization projections.
///
/// Include and exclude filters are mutually exclusive by construction: each
/// constructor produces one filter kind and there is no way to combine them.
#[derive(Debug, Clone, Default)]
pub struct DumpConfig {
    filter: Filter,
}

#[derive(Debug, Clone, Default)]
enum Filter {
    #[default]
    All,
    Include(HashSet<String>),
    Exclude(HashSet<String>),
}

impl DumpConfig {
    /// Projects every field.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Projects only the named fields.
    #[must_use]
    pub fn include(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            filter: Filter::Include(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Projects every field except the named ones.
    #[must_use]
    pub fn exclude(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            filter: Filter::Exclude(names.into_iter().map(Into::into).collect()),
        }
    }

    fn admits(&self, key: &str) -> bool {
        match &self.filter {
            Filter::All => true,
            Filter::Include(names) => names.contains(key),
            Filter::Exclude(names) => !names.contains(key),
        }
    }
}
