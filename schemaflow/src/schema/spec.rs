//! Schema specifications and the schema builder.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::errors::SchemaBuildError;
use crate::report::FieldPath;
use crate::schema::FieldSpec;

/// Function signature for root (cross-field) validators.
///
/// A root validator receives the full candidate record after every field
/// individually passed. It may mutate the record to derive computed values,
/// or reject it with a message.
pub type RootValidatorFn = dyn Fn(&mut Map<String, Value>) -> Result<(), String> + Send + Sync;

/// A named cross-field validator.
#[derive(Clone)]
pub struct RootValidator {
    name: String,
    path: FieldPath,
    requires: Vec<String>,
    func: Arc<RootValidatorFn>,
}

impl RootValidator {
    /// Creates a new named root validator.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&mut Map<String, Value>) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            path: FieldPath::root(),
            requires: Vec::new(),
            func: Arc::new(func),
        }
    }

    /// Attributes this validator's failures to a specific path instead of
    /// the record root.
    #[must_use]
    pub fn with_path(mut self, path: FieldPath) -> Self {
        self.path = path;
        self
    }

    /// Declares fields this validator reads. References to fields the
    /// schema does not declare are rejected when the schema is built.
    #[must_use]
    pub fn requires(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.requires = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the declared field dependencies.
    #[must_use]
    pub fn required_fields(&self) -> &[String] {
        &self.requires
    }

    /// Returns the validator's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the path its failures are attributed to.
    #[must_use]
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Runs the validator against the candidate record.
    pub fn apply(&self, record: &mut Map<String, Value>) -> Result<(), String> {
        (self.func)(record)
    }
}

impl fmt::Debug for RootValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootValidator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// An immutable schema: an ordered sequence of fields plus cross-field
/// validators.
///
/// Constructed once per distinct data shape via [`SchemaSpec::builder`] and
/// shared freely across threads afterwards; validation never mutates it.
#[derive(Debug, Clone)]
pub struct SchemaSpec {
    name: String,
    fields: Vec<FieldSpec>,
    index: HashMap<String, usize>,
    root_validators: Vec<RootValidator>,
}

impl SchemaSpec {
    /// Starts building a schema with the given name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    /// Returns the schema name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Returns true if the key matches a declared field name or alias.
    #[must_use]
    pub fn accepts_key(&self, key: &str) -> bool {
        self.fields
            .iter()
            .any(|f| f.name == key || f.alias.as_deref() == Some(key))
    }

    /// Returns the root validators in registration order.
    #[must_use]
    pub fn root_validators(&self) -> &[RootValidator] {
        &self.root_validators
    }

    /// Returns the number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema declares no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builder for [`SchemaSpec`].
///
/// Fields keep the order they are added in; duplicate names (including
/// collisions with aliases) are rejected when [`SchemaBuilder::build`] runs.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldSpec>,
    root_validators: Vec<RootValidator>,
}

impl SchemaBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            root_validators: Vec::new(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Appends a root validator.
    #[must_use]
    pub fn root_validator(mut self, validator: RootValidator) -> Self {
        self.root_validators.push(validator);
        self
    }

    /// Copies another schema's fields and root validators into this one.
    ///
    /// This is how derived schemas compose from a base: call `extend` before
    /// adding the derived fields so the base fields come first.
    #[must_use]
    pub fn extend(mut self, base: &SchemaSpec) -> Self {
        self.fields.extend(base.fields.iter().cloned());
        self.root_validators
            .extend(base.root_validators.iter().cloned());
        self
    }

    /// Finalizes the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema name is empty, any field fails its own
    /// validation, or two fields share a name or alias.
    pub fn build(self) -> Result<SchemaSpec, SchemaBuildError> {
        if self.name.trim().is_empty() {
            return Err(SchemaBuildError::EmptySchemaName);
        }

        let mut index = HashMap::new();
        let mut seen_keys = std::collections::HashSet::new();

        for (position, field) in self.fields.iter().enumerate() {
            field.validate(&self.name)?;

            if !seen_keys.insert(field.name.clone()) {
                return Err(SchemaBuildError::DuplicateField {
                    schema: self.name.clone(),
                    name: field.name.clone(),
                });
            }
            if let Some(alias) = &field.alias {
                if !seen_keys.insert(alias.clone()) {
                    return Err(SchemaBuildError::DuplicateField {
                        schema: self.name.clone(),
                        name: alias.clone(),
                    });
                }
            }
            index.insert(field.name.clone(), position);
        }

        for validator in &self.root_validators {
            for required in validator.required_fields() {
                if !index.contains_key(required) {
                    return Err(SchemaBuildError::UnknownRootField {
                        schema: self.name.clone(),
                        validator: validator.name().to_string(),
                        field: required.clone(),
                    });
                }
            }
        }

        Ok(SchemaSpec {
            name: self.name,
            fields: self.fields,
            index,
            root_validators: self.root_validators,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;

    fn user_base() -> SchemaSpec {
        SchemaSpec::builder("user_base")
            .field(FieldSpec::int("id"))
            .field(FieldSpec::string("name"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_preserves_declaration_order() {
        let schema = SchemaSpec::builder("user")
            .field(FieldSpec::int("id"))
            .field(FieldSpec::string("name"))
            .field(FieldSpec::boolean("is_active"))
            .build()
            .unwrap();

        let names: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "is_active"]);
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let result = SchemaSpec::builder("user")
            .field(FieldSpec::int("id"))
            .field(FieldSpec::string("id"))
            .build();

        assert!(matches!(
            result,
            Err(SchemaBuildError::DuplicateField { .. })
        ));
    }

    #[test]
    fn test_alias_collision_rejected() {
        let result = SchemaSpec::builder("user")
            .field(FieldSpec::string("full_name").with_alias("name"))
            .field(FieldSpec::string("name"))
            .build();

        assert!(matches!(
            result,
            Err(SchemaBuildError::DuplicateField { .. })
        ));
    }

    #[test]
    fn test_empty_schema_name_rejected() {
        assert!(matches!(
            SchemaSpec::builder("  ").build(),
            Err(SchemaBuildError::EmptySchemaName)
        ));
    }

    #[test]
    fn test_field_lookup() {
        let schema = user_base();
        assert!(schema.field("id").is_some());
        assert!(schema.field("missing").is_none());
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn test_accepts_key_includes_aliases() {
        let schema = SchemaSpec::builder("user")
            .field(FieldSpec::string("full_name").with_alias("name"))
            .build()
            .unwrap();

        assert!(schema.accepts_key("full_name"));
        assert!(schema.accepts_key("name"));
        assert!(!schema.accepts_key("nickname"));
    }

    #[test]
    fn test_extend_composes_base_fields_first() {
        let derived = SchemaSpec::builder("user_create")
            .extend(&user_base())
            .field(FieldSpec::string("password"))
            .build()
            .unwrap();

        let names: Vec<&str> = derived.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "password"]);
    }

    #[test]
    fn test_extend_duplicate_across_base_rejected() {
        let result = SchemaSpec::builder("user_create")
            .extend(&user_base())
            .field(FieldSpec::string("name"))
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_extend_carries_root_validators() {
        let base = SchemaSpec::builder("base")
            .field(FieldSpec::int("id"))
            .root_validator(RootValidator::new("noop", |_| Ok(())))
            .build()
            .unwrap();

        let derived = SchemaSpec::builder("derived")
            .extend(&base)
            .field(FieldSpec::string("extra"))
            .build()
            .unwrap();

        assert_eq!(derived.root_validators().len(), 1);
        assert_eq!(derived.root_validators()[0].name(), "noop");
    }

    #[test]
    fn test_root_validator_unknown_reference_rejected() {
        let result = SchemaSpec::builder("project")
            .field(FieldSpec::string("name"))
            .root_validator(
                RootValidator::new("date_order", |_| Ok(())).requires(["start_date"]),
            )
            .build();

        assert!(matches!(
            result,
            Err(SchemaBuildError::UnknownRootField { .. })
        ));
    }

    #[test]
    fn test_root_validator_known_references_accepted() {
        let schema = SchemaSpec::builder("project")
            .field(FieldSpec::string("name"))
            .root_validator(RootValidator::new("named", |_| Ok(())).requires(["name"]))
            .build();

        assert!(schema.is_ok());
    }

    #[test]
    fn test_root_validator_mutates_record() {
        let fill = RootValidator::new("fill_flag", |record| {
            record.insert("flag".to_string(), Value::Bool(true));
            Ok(())
        });

        let mut record = Map::new();
        fill.apply(&mut record).unwrap();
        assert_eq!(record.get("flag"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_nested_field_type_uses_schema_name() {
        let address = Arc::new(
            SchemaSpec::builder("address")
                .field(FieldSpec::string("city"))
                .build()
                .unwrap(),
        );
        let field = FieldSpec::nested("address", address);
        assert_eq!(field.field_type.type_name(), "address");
        assert!(matches!(field.field_type, FieldType::Nested(_)));
    }
}
