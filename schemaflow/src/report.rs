//! Validation failure taxonomy and the aggregated failure report.
//!
//! A validation pass never stops at the first field failure: every failure
//! it finds is collected into a [`ValidationReport`] with a path locating it
//! inside nested structures.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One step in the path locating a failure inside a nested value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A named field of a record.
    Field(String),
    /// An index into a list.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => write!(f, "{name}"),
            Self::Index(idx) => write!(f, "[{idx}]"),
        }
    }
}

/// The location of a failure as a sequence of field names and list indices.
///
/// An empty path refers to the record as a whole (cross-field failures and
/// malformed input).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// Creates an empty path referring to the whole record.
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Creates a path with a single field segment.
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self(vec![PathSegment::Field(name.into())])
    }

    /// Returns a new path with a field segment appended.
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Field(name.into()));
        Self(segments)
    }

    /// Returns a new path with an index segment appended.
    #[must_use]
    pub fn index(&self, idx: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(idx));
        Self(segments)
    }

    /// Prepends a field segment, used when splicing child failures into a
    /// parent report.
    pub fn prepend(&mut self, name: impl Into<String>) {
        self.0.insert(0, PathSegment::Field(name.into()));
    }

    /// Returns this path followed by all of `suffix`'s segments.
    #[must_use]
    pub fn join(&self, suffix: &Self) -> Self {
        let mut segments = self.0.clone();
        segments.extend(suffix.0.iter().cloned());
        Self(segments)
    }

    /// Returns the path segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the path refers to the whole record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "__root__");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{name}")?;
                }
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

impl From<Vec<PathSegment>> for FieldPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

/// The kind of validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A required field was absent from the input.
    MissingField,
    /// A value was present but could not be coerced to the declared type.
    TypeMismatch,
    /// A field-level validator rejected a coerced value.
    ConstraintViolation,
    /// A root validator rejected the assembled record.
    CrossFieldViolation,
    /// The input contained a key not declared in the schema (strict mode).
    UnknownField,
    /// The input could not be parsed into a mapping at all.
    MalformedInput,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField => write!(f, "missing_field"),
            Self::TypeMismatch => write!(f, "type_mismatch"),
            Self::ConstraintViolation => write!(f, "constraint_violation"),
            Self::CrossFieldViolation => write!(f, "cross_field_violation"),
            Self::UnknownField => write!(f, "unknown_field"),
            Self::MalformedInput => write!(f, "malformed_input"),
        }
    }
}

impl FailureKind {
    /// Returns true if the kind terminates validation before any field
    /// processing happens.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::MalformedInput)
    }
}

/// A single validation failure with its location and message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Where the failure occurred.
    pub path: FieldPath,
    /// What kind of failure it is.
    pub kind: FailureKind,
    /// Human-readable message.
    pub message: String,
    /// The expected type description, for type mismatches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// The actual type description, for type mismatches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl ValidationFailure {
    /// Creates a failure of the given kind.
    #[must_use]
    pub fn new(path: FieldPath, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// Creates a missing-field failure.
    #[must_use]
    pub fn missing(path: FieldPath) -> Self {
        Self::new(path, FailureKind::MissingField, "Field is required")
    }

    /// Creates a type-mismatch failure recording expected and actual types.
    #[must_use]
    pub fn type_mismatch(
        path: FieldPath,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        let expected = expected.into();
        let actual = actual.into();
        Self {
            path,
            kind: FailureKind::TypeMismatch,
            message: format!("Expected {expected}, got {actual}"),
            expected: Some(expected),
            actual: Some(actual),
        }
    }

    /// Creates a constraint-violation failure with the validator's message.
    #[must_use]
    pub fn constraint(path: FieldPath, message: impl Into<String>) -> Self {
        Self::new(path, FailureKind::ConstraintViolation, message)
    }

    /// Creates a cross-field failure with the root validator's message.
    #[must_use]
    pub fn cross_field(path: FieldPath, message: impl Into<String>) -> Self {
        Self::new(path, FailureKind::CrossFieldViolation, message)
    }

    /// Creates an unknown-field failure (strict mode only).
    #[must_use]
    pub fn unknown(path: FieldPath) -> Self {
        Self::new(
            path,
            FailureKind::UnknownField,
            "Field is not declared in the schema",
        )
    }

    /// Creates a malformed-input failure.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(FieldPath::root(), FailureKind::MalformedInput, message)
    }

    /// Prepends a parent field name to the failure's path.
    #[must_use]
    pub fn nested_under(mut self, parent: impl Into<String>) -> Self {
        self.path.prepend(parent);
        self
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert(
            "loc".to_string(),
            serde_json::Value::Array(
                self.path
                    .segments()
                    .iter()
                    .map(|s| match s {
                        PathSegment::Field(name) => serde_json::Value::String(name.clone()),
                        PathSegment::Index(idx) => serde_json::json!(idx),
                    })
                    .collect(),
            ),
        );
        map.insert("kind".to_string(), serde_json::json!(self.kind.to_string()));
        map.insert("msg".to_string(), serde_json::json!(self.message));
        if let Some(ref expected) = self.expected {
            map.insert("expected".to_string(), serde_json::json!(expected));
        }
        if let Some(ref actual) = self.actual {
            map.insert("actual".to_string(), serde_json::json!(actual));
        }
        map
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.path, self.message, self.kind)
    }
}

/// An ordered, non-empty collection of validation failures.
///
/// Field-level failures appear in field declaration order, followed by
/// unknown-key failures, followed by cross-field failures in root-validator
/// registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    failures: Vec<ValidationFailure>,
}

impl ValidationReport {
    /// Creates a report from collected failures.
    #[must_use]
    pub fn from_failures(failures: Vec<ValidationFailure>) -> Self {
        Self { failures }
    }

    /// Returns the failures in order.
    #[must_use]
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// Returns the number of failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Returns true if the report holds no failures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Iterates over the failures.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationFailure> {
        self.failures.iter()
    }

    /// Returns true if any failure has the given kind.
    #[must_use]
    pub fn has_kind(&self, kind: FailureKind) -> bool {
        self.failures.iter().any(|f| f.kind == kind)
    }

    /// Returns the failures located at the given path (dotted display form).
    #[must_use]
    pub fn at(&self, path: &str) -> Vec<&ValidationFailure> {
        self.failures
            .iter()
            .filter(|f| f.path.to_string() == path)
            .collect()
    }

    /// Converts to a list of dictionary representations.
    #[must_use]
    pub fn to_dicts(&self) -> Vec<HashMap<String, serde_json::Value>> {
        self.failures.iter().map(ValidationFailure::to_dict).collect()
    }

    /// Renders the report as a JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.failures)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} validation failure{}",
            self.failures.len(),
            if self.failures.len() == 1 { "" } else { "s" }
        )?;
        for failure in &self.failures {
            writeln!(f, "{}", failure.path)?;
            writeln!(f, "  {} ({})", failure.message, failure.kind)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

impl IntoIterator for ValidationReport {
    type Item = ValidationFailure;
    type IntoIter = std::vec::IntoIter<ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        let path = FieldPath::field("address").child("postal_code");
        assert_eq!(path.to_string(), "address.postal_code");

        let path = FieldPath::field("tags").index(1);
        assert_eq!(path.to_string(), "tags[1]");

        assert_eq!(FieldPath::root().to_string(), "__root__");
    }

    #[test]
    fn test_path_prepend() {
        let mut path = FieldPath::field("postal_code");
        path.prepend("address");
        assert_eq!(path.to_string(), "address.postal_code");
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_failure_kind_display() {
        assert_eq!(FailureKind::MissingField.to_string(), "missing_field");
        assert_eq!(FailureKind::TypeMismatch.to_string(), "type_mismatch");
        assert_eq!(
            FailureKind::CrossFieldViolation.to_string(),
            "cross_field_violation"
        );
    }

    #[test]
    fn test_failure_kind_terminal() {
        assert!(FailureKind::MalformedInput.is_terminal());
        assert!(!FailureKind::MissingField.is_terminal());
        assert!(!FailureKind::CrossFieldViolation.is_terminal());
    }

    #[test]
    fn test_type_mismatch_records_types() {
        let failure = ValidationFailure::type_mismatch(FieldPath::field("id"), "int", "string");
        assert_eq!(failure.expected.as_deref(), Some("int"));
        assert_eq!(failure.actual.as_deref(), Some("string"));
        assert!(failure.message.contains("int"));
    }

    #[test]
    fn test_failure_to_dict() {
        let failure =
            ValidationFailure::missing(FieldPath::field("address").child("postal_code"));
        let dict = failure.to_dict();

        assert_eq!(
            dict.get("loc").unwrap(),
            &serde_json::json!(["address", "postal_code"])
        );
        assert_eq!(dict.get("kind").unwrap(), "missing_field");
    }

    #[test]
    fn test_nested_under() {
        let failure = ValidationFailure::missing(FieldPath::field("postal_code"));
        let nested = failure.nested_under("address");
        assert_eq!(nested.path.to_string(), "address.postal_code");
    }

    #[test]
    fn test_report_display() {
        let report = ValidationReport::from_failures(vec![
            ValidationFailure::missing(FieldPath::field("name")),
            ValidationFailure::constraint(FieldPath::field("age"), "must be at least 18"),
        ]);

        let rendered = report.to_string();
        assert!(rendered.starts_with("2 validation failures"));
        assert!(rendered.contains("name"));
        assert!(rendered.contains("must be at least 18"));
    }

    #[test]
    fn test_report_at() {
        let report = ValidationReport::from_failures(vec![
            ValidationFailure::missing(FieldPath::field("name")),
            ValidationFailure::constraint(FieldPath::field("age"), "too young"),
        ]);

        assert_eq!(report.at("age").len(), 1);
        assert_eq!(report.at("missing").len(), 0);
    }

    #[test]
    fn test_report_json_round_trip() {
        let report = ValidationReport::from_failures(vec![ValidationFailure::type_mismatch(
            FieldPath::field("id"),
            "int",
            "string",
        )]);

        let json = report.to_json().unwrap();
        assert!(json.contains("type_mismatch"));

        let failures: Vec<ValidationFailure> = serde_json::from_str(&json).unwrap();
        assert_eq!(failures, report.failures);
    }
}
