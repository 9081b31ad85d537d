//! Error types for the schemaflow framework.
//!
//! Schema construction errors are programmer errors and surface as hard
//! `Result` failures at build time. Expected validation failures are never
//! errors in this sense: `validate` returns them as a
//! [`ValidationReport`](crate::report::ValidationReport) value.

use thiserror::Error;

use crate::report::ValidationReport;

/// The main error type for schemaflow operations.
#[derive(Debug, Error)]
pub enum SchemaflowError {
    /// A schema could not be constructed.
    #[error("{0}")]
    Build(#[from] SchemaBuildError),

    /// A validation pass rejected the input.
    #[error("{0}")]
    Validation(#[from] ValidationReport),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Error raised when a schema definition is malformed.
///
/// These indicate bugs in the calling code, not bad input data, so they are
/// reported when the schema is built rather than during validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaBuildError {
    /// The schema name is empty or whitespace-only.
    #[error("Schema name cannot be empty or whitespace-only")]
    EmptySchemaName,

    /// A field name is empty or whitespace-only.
    #[error("Field name cannot be empty or whitespace-only in schema '{schema}'")]
    EmptyFieldName {
        /// The schema being built.
        schema: String,
    },

    /// Two fields (or a field and an alias) share a name.
    #[error("Duplicate field name '{name}' in schema '{schema}'")]
    DuplicateField {
        /// The schema being built.
        schema: String,
        /// The repeated name.
        name: String,
    },

    /// A literal field declares no allowed values.
    #[error("Literal field '{name}' must declare at least one allowed value")]
    EmptyLiteralSet {
        /// The offending field.
        name: String,
    },

    /// A union field declares no alternatives.
    #[error("Union field '{name}' must declare at least one alternative")]
    EmptyUnion {
        /// The offending field.
        name: String,
    },

    /// A constrained field declares an impossible bound combination.
    #[error("Field '{name}': lower bound {lower} exceeds upper bound {upper}")]
    InvalidBounds {
        /// The offending field.
        name: String,
        /// The declared lower bound.
        lower: String,
        /// The declared upper bound.
        upper: String,
    },

    /// A pattern-constrained field carries an invalid regular expression.
    #[error("Field '{name}': invalid pattern: {reason}")]
    InvalidPattern {
        /// The offending field.
        name: String,
        /// Why the pattern failed to compile.
        reason: String,
    },

    /// A root validator declares a dependency on an undeclared field.
    #[error("Root validator '{validator}' references undeclared field '{field}' in schema '{schema}'")]
    UnknownRootField {
        /// The schema being built.
        schema: String,
        /// The root validator with the bad reference.
        validator: String,
        /// The missing field name.
        field: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_display() {
        let err = SchemaBuildError::DuplicateField {
            schema: "user".to_string(),
            name: "id".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate field name 'id' in schema 'user'");
    }

    #[test]
    fn test_build_error_wraps_into_main_error() {
        let err: SchemaflowError = SchemaBuildError::EmptySchemaName.into();
        assert!(matches!(err, SchemaflowError::Build(_)));
    }

    #[test]
    fn test_invalid_bounds_display() {
        let err = SchemaBuildError::InvalidBounds {
            name: "age".to_string(),
            lower: "21".to_string(),
            upper: "18".to_string(),
        };
        assert!(err.to_string().contains("lower bound 21"));
    }
}
