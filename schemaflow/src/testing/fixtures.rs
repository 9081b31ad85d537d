//! Reusable schema fixtures for tests and examples.

use serde_json::Value;
use std::sync::Arc;

use crate::schema::{
    email_field, non_empty_string, FieldSpec, IntField, RootValidator, SchemaSpec, StringField,
};

/// A postal address: street, city, country, postal code.
#[must_use]
pub fn address_schema() -> SchemaSpec {
    SchemaSpec::builder("address")
        .field(FieldSpec::string("street"))
        .field(FieldSpec::string("city"))
        .field(FieldSpec::string("country"))
        .field(FieldSpec::string("postal_code"))
        .build()
        .expect("address fixture is well-formed")
}

/// A user: positive id, bounded name, email shape, active flag defaulting
/// to true.
#[must_use]
pub fn user_schema() -> SchemaSpec {
    SchemaSpec::builder("user")
        .field(IntField::new("id").gt(0).build().expect("valid bounds"))
        .field(
            StringField::new("name")
                .min_length(3)
                .max_length(50)
                .build()
                .expect("valid bounds"),
        )
        .field(email_field("email"))
        .field(FieldSpec::boolean("is_active").with_default(true))
        .build()
        .expect("user fixture is well-formed")
}

/// The user schema plus a cross-field rule: the email domain must be
/// `company.com`.
#[must_use]
pub fn company_user_schema() -> SchemaSpec {
    SchemaSpec::builder("company_user")
        .extend(&user_schema())
        .root_validator(RootValidator::new("company_email", |record| {
            let email = record.get("email").and_then(Value::as_str).unwrap_or("");
            if email.ends_with("@company.com") {
                Ok(())
            } else {
                Err("Email must be a company email".to_string())
            }
        }))
        .build()
        .expect("company user fixture is well-formed")
}

/// An employee: nested user, department, nested address, hire date.
#[must_use]
pub fn employee_schema() -> SchemaSpec {
    SchemaSpec::builder("employee")
        .field(FieldSpec::nested("user", Arc::new(user_schema())))
        .field(non_empty_string("department"))
        .field(FieldSpec::nested("address", Arc::new(address_schema())))
        .field(FieldSpec::date("hire_date"))
        .build()
        .expect("employee fixture is well-formed")
}

/// A project with a date-ordering cross-field rule: start must not be
/// after end.
#[must_use]
pub fn project_schema() -> SchemaSpec {
    SchemaSpec::builder("project")
        .field(non_empty_string("name"))
        .field(FieldSpec::date("start_date"))
        .field(FieldSpec::date("end_date"))
        .root_validator(
            RootValidator::new("date_order", |record| {
                let start = record.get("start_date").and_then(Value::as_str);
                let end = record.get("end_date").and_then(Value::as_str);
                match (start, end) {
                    // Normalized dates compare correctly as strings.
                    (Some(start), Some(end)) if start > end => {
                        Err("Start date must be before end date".to_string())
                    }
                    _ => Ok(()),
                }
            })
            .requires(["start_date", "end_date"]),
        )
        .build()
        .expect("project fixture is well-formed")
}
