//! Test support: assertions over validation results and reusable schema
//! fixtures.

pub mod assertions;
pub mod fixtures;

pub use assertions::{
    assert_failure_count, assert_failure_kinds, assert_has_failure, assert_invalid, assert_valid,
};
pub use fixtures::{
    address_schema, company_user_schema, employee_schema, project_schema, user_schema,
};
