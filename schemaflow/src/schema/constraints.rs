//! Constrained-field factories.
//!
//! These produce ordinary [`FieldSpec`]s with a built-in field-level
//! validator attached; constrained fields are not a separate mechanism from
//! user-supplied validators.

use regex::Regex;

use crate::errors::SchemaBuildError;
use crate::schema::{FieldSpec, FieldType, FieldValidator};

/// Builder for an integer field with bound constraints.
#[derive(Debug, Clone, Default)]
pub struct IntField {
    name: String,
    gt: Option<i64>,
    ge: Option<i64>,
    lt: Option<i64>,
    le: Option<i64>,
}

impl IntField {
    /// Creates a new integer-field builder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Requires the value to be strictly greater than `bound`.
    #[must_use]
    pub fn gt(mut self, bound: i64) -> Self {
        self.gt = Some(bound);
        self
    }

    /// Requires the value to be greater than or equal to `bound`.
    #[must_use]
    pub fn ge(mut self, bound: i64) -> Self {
        self.ge = Some(bound);
        self
    }

    /// Requires the value to be strictly less than `bound`.
    #[must_use]
    pub fn lt(mut self, bound: i64) -> Self {
        self.lt = Some(bound);
        self
    }

    /// Requires the value to be less than or equal to `bound`.
    #[must_use]
    pub fn le(mut self, bound: i64) -> Self {
        self.le = Some(bound);
        self
    }

    /// Builds the field spec.
    ///
    /// # Errors
    ///
    /// Returns an error if a lower bound exceeds an upper bound.
    pub fn build(self) -> Result<FieldSpec, SchemaBuildError> {
        let lower = match (self.gt, self.ge) {
            (Some(g), Some(e)) => Some(g.saturating_add(1).max(e)),
            (Some(g), None) => Some(g.saturating_add(1)),
            (None, e) => e,
        };
        let upper = match (self.lt, self.le) {
            (Some(l), Some(e)) => Some(l.saturating_sub(1).min(e)),
            (Some(l), None) => Some(l.saturating_sub(1)),
            (None, e) => e,
        };
        if let (Some(lo), Some(hi)) = (lower, upper) {
            if lo > hi {
                return Err(SchemaBuildError::InvalidBounds {
                    name: self.name,
                    lower: lo.to_string(),
                    upper: hi.to_string(),
                });
            }
        }

        let (gt, ge, lt, le) = (self.gt, self.ge, self.lt, self.le);
        let validator = FieldValidator::new("int_bounds", move |value| {
            let n = value
                .as_i64()
                .ok_or_else(|| "expected an integer".to_string())?;
            if let Some(bound) = gt {
                if n <= bound {
                    return Err(format!("must be greater than {bound}"));
                }
            }
            if let Some(bound) = ge {
                if n < bound {
                    return Err(format!("must be at least {bound}"));
                }
            }
            if let Some(bound) = lt {
                if n >= bound {
                    return Err(format!("must be less than {bound}"));
                }
            }
            if let Some(bound) = le {
                if n > bound {
                    return Err(format!("must be at most {bound}"));
                }
            }
            Ok(value)
        });

        Ok(FieldSpec::int(self.name).with_validator(validator))
    }
}

/// Builder for a float field with bound constraints.
#[derive(Debug, Clone, Default)]
pub struct FloatField {
    name: String,
    gt: Option<f64>,
    ge: Option<f64>,
    lt: Option<f64>,
    le: Option<f64>,
}

impl FloatField {
    /// Creates a new float-field builder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Requires the value to be strictly greater than `bound`.
    #[must_use]
    pub fn gt(mut self, bound: f64) -> Self {
        self.gt = Some(bound);
        self
    }

    /// Requires the value to be greater than or equal to `bound`.
    #[must_use]
    pub fn ge(mut self, bound: f64) -> Self {
        self.ge = Some(bound);
        self
    }

    /// Requires the value to be strictly less than `bound`.
    #[must_use]
    pub fn lt(mut self, bound: f64) -> Self {
        self.lt = Some(bound);
        self
    }

    /// Requires the value to be less than or equal to `bound`.
    #[must_use]
    pub fn le(mut self, bound: f64) -> Self {
        self.le = Some(bound);
        self
    }

    /// Builds the field spec.
    ///
    /// # Errors
    ///
    /// Returns an error if a lower bound exceeds an upper bound.
    pub fn build(self) -> Result<FieldSpec, SchemaBuildError> {
        let lower = self.gt.or(self.ge);
        let upper = self.lt.or(self.le);
        if let (Some(lo), Some(hi)) = (lower, upper) {
            if lo > hi {
                return Err(SchemaBuildError::InvalidBounds {
                    name: self.name,
                    lower: lo.to_string(),
                    upper: hi.to_string(),
                });
            }
        }

        let (gt, ge, lt, le) = (self.gt, self.ge, self.lt, self.le);
        let validator = FieldValidator::new("float_bounds", move |value| {
            let n = value
                .as_f64()
                .ok_or_else(|| "expected a number".to_string())?;
            if let Some(bound) = gt {
                if n <= bound {
                    return Err(format!("must be greater than {bound}"));
                }
            }
            if let Some(bound) = ge {
                if n < bound {
                    return Err(format!("must be at least {bound}"));
                }
            }
            if let Some(bound) = lt {
                if n >= bound {
                    return Err(format!("must be less than {bound}"));
                }
            }
            if let Some(bound) = le {
                if n > bound {
                    return Err(format!("must be at most {bound}"));
                }
            }
            Ok(value)
        });

        Ok(FieldSpec::float(self.name).with_validator(validator))
    }
}

/// Builder for a string field with length and pattern constraints.
#[derive(Debug, Clone, Default)]
pub struct StringField {
    name: String,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<String>,
}

impl StringField {
    /// Creates a new string-field builder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Requires at least `length` characters.
    #[must_use]
    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    /// Requires at most `length` characters.
    #[must_use]
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    /// Requires the value to match the regular expression.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Builds the field spec, compiling the pattern if one was given.
    ///
    /// # Errors
    ///
    /// Returns an error if min exceeds max length or the pattern does not
    /// compile.
    pub fn build(self) -> Result<FieldSpec, SchemaBuildError> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(SchemaBuildError::InvalidBounds {
                    name: self.name,
                    lower: min.to_string(),
                    upper: max.to_string(),
                });
            }
        }

        let mut spec = FieldSpec::string(&self.name);

        if self.min_length.is_some() || self.max_length.is_some() {
            let (min, max) = (self.min_length, self.max_length);
            spec = spec.with_validator(FieldValidator::new("string_length", move |value| {
                let text = value
                    .as_str()
                    .ok_or_else(|| "expected a string".to_string())?;
                let length = text.chars().count();
                if let Some(bound) = min {
                    if length < bound {
                        return Err(format!(
                            "length {length} is below the minimum of {bound}"
                        ));
                    }
                }
                if let Some(bound) = max {
                    if length > bound {
                        return Err(format!(
                            "length {length} exceeds the maximum of {bound}"
                        ));
                    }
                }
                Ok(value)
            }));
        }

        if let Some(pattern) = self.pattern {
            let regex = Regex::new(&pattern).map_err(|e| SchemaBuildError::InvalidPattern {
                name: self.name.clone(),
                reason: e.to_string(),
            })?;
            spec = spec.with_validator(FieldValidator::new("string_pattern", move |value| {
                let text = value
                    .as_str()
                    .ok_or_else(|| "expected a string".to_string())?;
                if regex.is_match(text) {
                    Ok(value)
                } else {
                    Err(format!("does not match pattern {}", regex.as_str()))
                }
            }));
        }

        Ok(spec)
    }
}

/// Creates a string field that must look like an email address.
#[must_use]
pub fn email_field(name: impl Into<String>) -> FieldSpec {
    FieldSpec::string(name).with_validator(FieldValidator::new("email", |value| {
        let text = value
            .as_str()
            .ok_or_else(|| "expected a string".to_string())?;
        match text.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(value),
            _ => Err("Invalid email".to_string()),
        }
    }))
}

/// Creates a string field that rejects empty or whitespace-only values.
#[must_use]
pub fn non_empty_string(name: impl Into<String>) -> FieldSpec {
    FieldSpec::string(name).with_validator(FieldValidator::new("non_empty", |value| {
        let text = value
            .as_str()
            .ok_or_else(|| "expected a string".to_string())?;
        if text.trim().is_empty() {
            Err("must not be empty".to_string())
        } else {
            Ok(value)
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn first_validator(spec: &FieldSpec) -> &FieldValidator {
        spec.validators.first().expect("validator attached")
    }

    #[test]
    fn test_int_bounds_pass_and_fail() {
        let spec = IntField::new("id").gt(0).build().unwrap();
        let validator = first_validator(&spec);

        assert_eq!(validator.apply(json!(1)).unwrap(), json!(1));
        assert!(validator.apply(json!(0)).is_err());
        assert!(validator.apply(json!(-5)).is_err());
    }

    #[test]
    fn test_int_range() {
        let spec = IntField::new("age").ge(18).le(120).build().unwrap();
        let validator = first_validator(&spec);

        assert!(validator.apply(json!(18)).is_ok());
        assert!(validator.apply(json!(120)).is_ok());
        assert!(validator.apply(json!(17)).is_err());
        assert!(validator.apply(json!(121)).is_err());
    }

    #[test]
    fn test_int_invalid_bounds_rejected_at_build() {
        assert!(matches!(
            IntField::new("age").ge(21).le(18).build(),
            Err(SchemaBuildError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_float_bounds() {
        let spec = FloatField::new("price").gt(0.0).build().unwrap();
        let validator = first_validator(&spec);

        assert!(validator.apply(json!(999.99)).is_ok());
        assert!(validator.apply(json!(0.0)).is_err());
    }

    #[test]
    fn test_string_length_bounds() {
        let spec = StringField::new("name")
            .min_length(3)
            .max_length(50)
            .build()
            .unwrap();
        let validator = first_validator(&spec);

        assert!(validator.apply(json!("Jo")).is_err());
        assert!(validator.apply(json!("John")).is_ok());
        assert!(validator.apply(json!("x".repeat(51))).is_err());
    }

    #[test]
    fn test_string_length_counts_chars_not_bytes() {
        let spec = StringField::new("name").max_length(3).build().unwrap();
        let validator = first_validator(&spec);

        assert!(validator.apply(json!("åäö")).is_ok());
    }

    #[test]
    fn test_string_pattern() {
        let spec = StringField::new("username")
            .pattern(r"^[a-z0-9]+$")
            .build()
            .unwrap();
        let validator = first_validator(&spec);

        assert!(validator.apply(json!("john42")).is_ok());
        assert!(validator.apply(json!("John Doe")).is_err());
    }

    #[test]
    fn test_bad_pattern_rejected_at_build() {
        assert!(matches!(
            StringField::new("username").pattern("[unclosed").build(),
            Err(SchemaBuildError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_string_min_over_max_rejected() {
        assert!(StringField::new("name")
            .min_length(10)
            .max_length(3)
            .build()
            .is_err());
    }

    #[test]
    fn test_email_field() {
        let spec = email_field("email");
        let validator = first_validator(&spec);

        assert!(validator.apply(json!("john@example.com")).is_ok());
        assert!(validator.apply(json!("johndoe.com")).is_err());
        assert!(validator.apply(json!("@example.com")).is_err());
        assert!(validator.apply(json!("john@")).is_err());
    }

    #[test]
    fn test_non_empty_string() {
        let spec = non_empty_string("department");
        let validator = first_validator(&spec);

        assert!(validator.apply(json!("Engineering")).is_ok());
        assert!(validator.apply(json!("   ")).is_err());
    }
}
