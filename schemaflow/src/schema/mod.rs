//! Schema definitions.
//!
//! This module provides:
//! - Field specifications with types, defaults, aliases, and validators
//! - The schema builder, including composition of base schemas
//! - Constrained-field factories for common bound/length/pattern checks

mod constraints;
mod field;
mod spec;

pub use constraints::{email_field, non_empty_string, FloatField, IntField, StringField};
pub use field::{FieldSpec, FieldType, FieldValidator, ValidatorFn};
pub use spec::{RootValidator, RootValidatorFn, SchemaBuilder, SchemaSpec};
