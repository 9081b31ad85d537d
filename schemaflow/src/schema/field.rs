//! Field definitions: declared types, per-field validators, and the field
//! specification itself.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::errors::SchemaBuildError;
use crate::schema::SchemaSpec;

/// Function signature for field-level validators.
///
/// A validator receives the coerced value and either returns the (possibly
/// transformed) value or rejects it with a message.
pub type ValidatorFn = dyn Fn(Value) -> Result<Value, String> + Send + Sync;

/// A named field-level validator.
#[derive(Clone)]
pub struct FieldValidator {
    name: String,
    func: Arc<ValidatorFn>,
}

impl FieldValidator {
    /// Creates a new named validator.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Returns the validator's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the validator against a coerced value.
    pub fn apply(&self, value: Value) -> Result<Value, String> {
        (self.func)(value)
    }
}

impl fmt::Debug for FieldValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldValidator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Declared type of a field.
#[derive(Debug, Clone)]
pub enum FieldType {
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    String,
    /// Calendar date, normalized to `YYYY-MM-DD`.
    Date,
    /// Timestamp, normalized to RFC 3339 in UTC.
    DateTime,
    /// UUID, normalized to hyphenated lowercase.
    Uuid,
    /// A closed set of allowed string values.
    Literal(Vec<String>),
    /// Homogeneous list with a single element type.
    List(Box<FieldType>),
    /// String-keyed mapping with homogeneous value type.
    Map(Box<FieldType>),
    /// A value that may be JSON null.
    Optional(Box<FieldType>),
    /// First alternative that fully coerces wins.
    Union(Vec<FieldType>),
    /// A nested record validated against its own schema.
    Nested(Arc<SchemaSpec>),
}

impl FieldType {
    /// Returns the type description used in error messages.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Int => "int".to_string(),
            Self::Float => "float".to_string(),
            Self::Bool => "bool".to_string(),
            Self::String => "string".to_string(),
            Self::Date => "date".to_string(),
            Self::DateTime => "datetime".to_string(),
            Self::Uuid => "uuid".to_string(),
            Self::Literal(allowed) => format!("literal[{}]", allowed.join(", ")),
            Self::List(inner) => format!("list[{}]", inner.type_name()),
            Self::Map(inner) => format!("map[{}]", inner.type_name()),
            Self::Optional(inner) => format!("optional[{}]", inner.type_name()),
            Self::Union(alternatives) => {
                let names: Vec<String> =
                    alternatives.iter().map(FieldType::type_name).collect();
                format!("union[{}]", names.join(", "))
            }
            Self::Nested(schema) => schema.name().to_string(),
        }
    }
}

/// Specification of a single named field within a schema.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// The field name, unique within its schema.
    pub name: String,
    /// Alternate input key. Output always uses the field name.
    pub alias: Option<String>,
    /// The declared type.
    pub field_type: FieldType,
    /// Whether the field must be present in the input.
    pub required: bool,
    /// Value used when the field is absent and not required.
    pub default: Option<Value>,
    /// Ordered field-level validators, run against the coerced value.
    pub validators: Vec<FieldValidator>,
}

impl FieldSpec {
    /// Creates a new required field with the given type.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            alias: None,
            field_type,
            required: true,
            default: None,
            validators: Vec::new(),
        }
    }

    /// Creates a required int field.
    #[must_use]
    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Int)
    }

    /// Creates a required float field.
    #[must_use]
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Float)
    }

    /// Creates a required bool field.
    #[must_use]
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Bool)
    }

    /// Creates a required string field.
    #[must_use]
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    /// Creates a required date field.
    #[must_use]
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Date)
    }

    /// Creates a required datetime field.
    #[must_use]
    pub fn datetime(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::DateTime)
    }

    /// Creates a required UUID field.
    #[must_use]
    pub fn uuid(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Uuid)
    }

    /// Creates a required literal field restricted to the given values.
    #[must_use]
    pub fn literal(
        name: impl Into<String>,
        allowed: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(
            name,
            FieldType::Literal(allowed.into_iter().map(Into::into).collect()),
        )
    }

    /// Creates a required list field with the given element type.
    #[must_use]
    pub fn list(name: impl Into<String>, element_type: FieldType) -> Self {
        Self::new(name, FieldType::List(Box::new(element_type)))
    }

    /// Creates a required mapping field with the given value type.
    #[must_use]
    pub fn map(name: impl Into<String>, value_type: FieldType) -> Self {
        Self::new(name, FieldType::Map(Box::new(value_type)))
    }

    /// Creates a required nested-record field.
    #[must_use]
    pub fn nested(name: impl Into<String>, schema: Arc<SchemaSpec>) -> Self {
        Self::new(name, FieldType::Nested(schema))
    }

    /// Creates a required union field over the given alternatives.
    #[must_use]
    pub fn union(name: impl Into<String>, alternatives: Vec<FieldType>) -> Self {
        Self::new(name, FieldType::Union(alternatives))
    }

    /// Marks the field as optional with no default; an absent field is
    /// omitted from the normalized record.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Wraps the declared type so the field also accepts JSON null.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.field_type = FieldType::Optional(Box::new(self.field_type));
        self
    }

    /// Sets a default value and marks the field as optional.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self.required = false;
        self
    }

    /// Sets an alternate input key.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Appends a field-level validator. Validators run in the order added.
    #[must_use]
    pub fn with_validator(mut self, validator: FieldValidator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Validates the field specification itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, a literal set is empty, or a
    /// union declares no alternatives.
    pub fn validate(&self, schema: &str) -> Result<(), SchemaBuildError> {
        if self.name.trim().is_empty() {
            return Err(SchemaBuildError::EmptyFieldName {
                schema: schema.to_string(),
            });
        }
        validate_type(&self.name, &self.field_type)
    }
}

fn validate_type(field: &str, field_type: &FieldType) -> Result<(), SchemaBuildError> {
    match field_type {
        FieldType::Literal(allowed) if allowed.is_empty() => {
            Err(SchemaBuildError::EmptyLiteralSet {
                name: field.to_string(),
            })
        }
        FieldType::Union(alternatives) => {
            if alternatives.is_empty() {
                return Err(SchemaBuildError::EmptyUnion {
                    name: field.to_string(),
                });
            }
            for alternative in alternatives {
                validate_type(field, alternative)?;
            }
            Ok(())
        }
        FieldType::List(inner) | FieldType::Map(inner) | FieldType::Optional(inner) => {
            validate_type(field, inner)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_spec_defaults_to_required() {
        let spec = FieldSpec::int("id");
        assert!(spec.required);
        assert!(spec.default.is_none());
        assert!(spec.validators.is_empty());
    }

    #[test]
    fn test_with_default_makes_optional() {
        let spec = FieldSpec::boolean("is_active").with_default(true);
        assert!(!spec.required);
        assert_eq!(spec.default, Some(serde_json::json!(true)));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(FieldType::Int.type_name(), "int");
        assert_eq!(
            FieldType::List(Box::new(FieldType::String)).type_name(),
            "list[string]"
        );
        assert_eq!(
            FieldType::Union(vec![FieldType::Int, FieldType::String]).type_name(),
            "union[int, string]"
        );
        assert_eq!(
            FieldType::Optional(Box::new(FieldType::Date)).type_name(),
            "optional[date]"
        );
        assert_eq!(
            FieldType::Literal(vec!["free".to_string(), "premium".to_string()]).type_name(),
            "literal[free, premium]"
        );
    }

    #[test]
    fn test_validator_apply_transforms() {
        let capitalize = FieldValidator::new("capitalize", |value| {
            let text = value.as_str().ok_or_else(|| "expected a string".to_string())?;
            let mut chars = text.chars();
            let capitalized = match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            };
            Ok(Value::String(capitalized))
        });

        let result = capitalize.apply(serde_json::json!("laptop")).unwrap();
        assert_eq!(result, serde_json::json!("Laptop"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let spec = FieldSpec::int("   ");
        assert!(spec.validate("user").is_err());
    }

    #[test]
    fn test_empty_literal_set_rejected() {
        let spec = FieldSpec::literal("role", Vec::<String>::new());
        assert!(matches!(
            spec.validate("user"),
            Err(SchemaBuildError::EmptyLiteralSet { .. })
        ));
    }

    #[test]
    fn test_empty_union_rejected() {
        let spec = FieldSpec::union("value", vec![]);
        assert!(matches!(
            spec.validate("item"),
            Err(SchemaBuildError::EmptyUnion { .. })
        ));
    }

    #[test]
    fn test_nested_union_inside_list_checked() {
        let spec = FieldSpec::list("values", FieldType::Union(vec![]));
        assert!(spec.validate("item").is_err());
    }
}
