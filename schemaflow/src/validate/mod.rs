//! The validation engine.
//!
//! This module provides:
//! - Type coercion over the full type tree, with primitive rules in
//!   [`coerce`]
//! - Field-level validator execution (fail-fast per field, aggregated
//!   across fields)
//! - Nested-schema recursion with spliced failure paths
//! - Root validator execution once every field individually passed

mod coerce;

pub use coerce::json_type_name;

use serde_json::{Map, Value};
use tracing::debug;

use crate::record::Record;
use crate::report::{FieldPath, ValidationFailure, ValidationReport};
use crate::schema::{FieldType, SchemaSpec};

/// Configuration for a validation pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationConfig {
    /// Reject input keys that are not declared in the schema.
    pub strict: bool,
    /// Allow numbers to coerce to declared string fields.
    pub coerce_numeric_strings: bool,
    /// Allow aliased fields to also populate from their field name.
    pub populate_by_name: bool,
}

impl ValidationConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables strict mode: undeclared input keys become failures.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Enables number-to-string coercion for string fields.
    #[must_use]
    pub fn coerce_numeric_strings(mut self) -> Self {
        self.coerce_numeric_strings = true;
        self
    }

    /// Lets aliased fields populate from the field name as well.
    #[must_use]
    pub fn populate_by_name(mut self) -> Self {
        self.populate_by_name = true;
        self
    }
}

/// The validation engine.
///
/// A `Validator` is a pure function over its inputs: the same schema and
/// input always produce an equivalent result, and concurrent calls against
/// a shared schema need no coordination.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Creates a validator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with the given configuration.
    #[must_use]
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validates an input mapping against a schema.
    ///
    /// On success returns the normalized record; otherwise the complete
    /// ordered list of failures. Expected validation failures never panic
    /// and never surface as a hard error.
    pub fn validate(
        &self,
        schema: &SchemaSpec,
        input: &Map<String, Value>,
    ) -> Result<Record, ValidationReport> {
        debug!(schema = schema.name(), fields = schema.len(), "validating input");
        match self.validate_mapping(schema, input) {
            Ok(values) => Ok(Record::new(values)),
            Err(failures) => {
                debug!(
                    schema = schema.name(),
                    failures = failures.len(),
                    "validation rejected input"
                );
                Err(ValidationReport::from_failures(failures))
            }
        }
    }

    /// Validates an arbitrary JSON value, which must be an object.
    pub fn validate_value(
        &self,
        schema: &SchemaSpec,
        value: &Value,
    ) -> Result<Record, ValidationReport> {
        match value.as_object() {
            Some(map) => self.validate(schema, map),
            None => Err(ValidationReport::from_failures(vec![
                ValidationFailure::malformed(format!(
                    "Expected an object, got {}",
                    json_type_name(value)
                )),
            ])),
        }
    }

    /// Parses JSON text and validates the result.
    ///
    /// Malformed JSON surfaces as a single `MalformedInput` failure; no
    /// field processing is attempted.
    pub fn validate_json(
        &self,
        schema: &SchemaSpec,
        text: &str,
    ) -> Result<Record, ValidationReport> {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => self.validate_value(schema, &value),
            Err(e) => Err(ValidationReport::from_failures(vec![
                ValidationFailure::malformed(e.to_string()),
            ])),
        }
    }

    /// Runs one full pass over a mapping: fields, unknown keys, then root
    /// validators. Used for the top-level input and recursively for nested
    /// schema fields.
    fn validate_mapping(
        &self,
        schema: &SchemaSpec,
        input: &Map<String, Value>,
    ) -> Result<Map<String, Value>, Vec<ValidationFailure>> {
        let mut failures = Vec::new();
        let mut candidate = Map::new();

        for field in schema.fields() {
            let raw = self.lookup(field.alias.as_deref(), &field.name, input);
            let path = FieldPath::field(&field.name);

            let Some(raw) = raw else {
                if field.required {
                    failures.push(ValidationFailure::missing(path));
                } else if let Some(default) = &field.default {
                    candidate.insert(field.name.clone(), default.clone());
                } else if matches!(field.field_type, FieldType::Optional(_)) {
                    candidate.insert(field.name.clone(), Value::Null);
                }
                continue;
            };

            let Some(coerced) = self.check_type(raw, &field.field_type, &path, &mut failures)
            else {
                continue;
            };

            // Validators fail fast within one field; other fields still run.
            let mut value = coerced;
            let mut passed = true;
            for validator in &field.validators {
                match validator.apply(value.clone()) {
                    Ok(next) => value = next,
                    Err(message) => {
                        failures.push(ValidationFailure::constraint(path.clone(), message));
                        passed = false;
                        break;
                    }
                }
            }
            if passed {
                candidate.insert(field.name.clone(), value);
            }
        }

        if self.config.strict {
            for key in input.keys() {
                if !schema.accepts_key(key) {
                    failures.push(ValidationFailure::unknown(FieldPath::field(key)));
                }
            }
        }

        // Root validators see the record only when every field passed.
        if failures.is_empty() {
            for validator in schema.root_validators() {
                if let Err(message) = validator.apply(&mut candidate) {
                    failures.push(ValidationFailure::cross_field(
                        validator.path().clone(),
                        message,
                    ));
                }
            }
        }

        if failures.is_empty() {
            Ok(candidate)
        } else {
            Err(failures)
        }
    }

    fn lookup<'a>(
        &self,
        alias: Option<&str>,
        name: &str,
        input: &'a Map<String, Value>,
    ) -> Option<&'a Value> {
        match alias {
            Some(alias) => match input.get(alias) {
                Some(value) => Some(value),
                None if self.config.populate_by_name => input.get(name),
                None => None,
            },
            None => input.get(name),
        }
    }

    /// Walks the declared type tree, coercing leaves and recursing into
    /// containers and nested schemas. Returns `None` after recording one or
    /// more failures.
    fn check_type(
        &self,
        raw: &Value,
        ty: &FieldType,
        path: &FieldPath,
        failures: &mut Vec<ValidationFailure>,
    ) -> Option<Value> {
        match ty {
            FieldType::List(inner) => {
                let Some(items) = raw.as_array() else {
                    failures.push(ValidationFailure::type_mismatch(
                        path.clone(),
                        ty.type_name(),
                        json_type_name(raw),
                    ));
                    return None;
                };
                let mut out = Vec::with_capacity(items.len());
                let mut ok = true;
                for (i, item) in items.iter().enumerate() {
                    match self.check_type(item, inner, &path.index(i), failures) {
                        Some(value) => out.push(value),
                        None => ok = false,
                    }
                }
                ok.then_some(Value::Array(out))
            }
            FieldType::Map(inner) => {
                let Some(entries) = raw.as_object() else {
                    failures.push(ValidationFailure::type_mismatch(
                        path.clone(),
                        ty.type_name(),
                        json_type_name(raw),
                    ));
                    return None;
                };
                let mut out = Map::new();
                let mut ok = true;
                for (key, item) in entries {
                    match self.check_type(item, inner, &path.child(key), failures) {
                        Some(value) => {
                            out.insert(key.clone(), value);
                        }
                        None => ok = false,
                    }
                }
                ok.then_some(Value::Object(out))
            }
            FieldType::Optional(inner) => {
                if raw.is_null() {
                    Some(Value::Null)
                } else {
                    self.check_type(raw, inner, path, failures)
                }
            }
            FieldType::Union(alternatives) => {
                for alternative in alternatives {
                    let mut scratch = Vec::new();
                    if let Some(value) = self.check_type(raw, alternative, path, &mut scratch) {
                        if scratch.is_empty() {
                            return Some(value);
                        }
                    }
                }
                failures.push(ValidationFailure::type_mismatch(
                    path.clone(),
                    ty.type_name(),
                    json_type_name(raw),
                ));
                None
            }
            FieldType::Nested(schema) => {
                let Some(entries) = raw.as_object() else {
                    failures.push(ValidationFailure::type_mismatch(
                        path.clone(),
                        ty.type_name(),
                        json_type_name(raw),
                    ));
                    return None;
                };
                match self.validate_mapping(schema, entries) {
                    Ok(values) => Some(Value::Object(values)),
                    Err(child_failures) => {
                        // Splice child failures with this field's path prepended.
                        failures.extend(child_failures.into_iter().map(|mut failure| {
                            failure.path = path.join(&failure.path);
                            failure
                        }));
                        None
                    }
                }
            }
            _ => match coerce::coerce_primitive(raw, ty, self.config.coerce_numeric_strings) {
                Ok(value) => Some(value),
                Err(e) => {
                    failures.push(ValidationFailure::type_mismatch(
                        path.clone(),
                        e.expected,
                        e.actual,
                    ));
                    None
                }
            },
        }
    }
}

/// Validates an input mapping with default configuration.
pub fn validate(
    schema: &SchemaSpec,
    input: &Map<String, Value>,
) -> Result<Record, ValidationReport> {
    Validator::new().validate(schema, input)
}

/// Validates an arbitrary JSON value with default configuration.
pub fn validate_value(schema: &SchemaSpec, value: &Value) -> Result<Record, ValidationReport> {
    Validator::new().validate_value(schema, value)
}

/// Parses and validates JSON text with default configuration.
pub fn validate_json(schema: &SchemaSpec, text: &str) -> Result<Record, ValidationReport> {
    Validator::new().validate_json(schema, text)
}
