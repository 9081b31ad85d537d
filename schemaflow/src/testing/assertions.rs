//! Test assertions for validation results.

use crate::record::Record;
use crate::report::{FailureKind, ValidationReport};

/// Asserts that validation succeeded, returning the record.
pub fn assert_valid(result: Result<Record, ValidationReport>) -> Record {
    match result {
        Ok(record) => record,
        Err(report) => panic!("Expected a valid record, got failures:\n{report}"),
    }
}

/// Asserts that validation failed, returning the report.
pub fn assert_invalid(result: Result<Record, ValidationReport>) -> ValidationReport {
    match result {
        Ok(record) => panic!(
            "Expected validation failures, got a valid record with keys {:?}",
            record.keys()
        ),
        Err(report) => report,
    }
}

/// Asserts the report holds exactly `expected` failures.
pub fn assert_failure_count(report: &ValidationReport, expected: usize) {
    assert_eq!(
        report.len(),
        expected,
        "Expected {expected} failure(s), got {}:\n{report}",
        report.len()
    );
}

/// Asserts the report holds a failure of the given kind at the given path
/// (dotted display form).
pub fn assert_has_failure(report: &ValidationReport, path: &str, kind: FailureKind) {
    assert!(
        report.iter().any(|f| f.kind == kind && f.path.to_string() == path),
        "Expected a {kind} failure at '{path}', got:\n{report}"
    );
}

/// Asserts the report's failure kinds appear in exactly this order.
pub fn assert_failure_kinds(report: &ValidationReport, expected: &[FailureKind]) {
    let kinds: Vec<FailureKind> = report.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds, expected,
        "Failure kinds out of order:\n{report}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{FieldPath, ValidationFailure};

    fn sample_report() -> ValidationReport {
        ValidationReport::from_failures(vec![
            ValidationFailure::missing(FieldPath::field("name")),
            ValidationFailure::cross_field(FieldPath::root(), "dates out of order"),
        ])
    }

    #[test]
    fn test_assert_invalid_returns_report() {
        let report = assert_invalid(Err(sample_report()));
        assert_failure_count(&report, 2);
    }

    #[test]
    fn test_assert_has_failure() {
        let report = sample_report();
        assert_has_failure(&report, "name", FailureKind::MissingField);
        assert_has_failure(&report, "__root__", FailureKind::CrossFieldViolation);
    }

    #[test]
    #[should_panic(expected = "Expected a missing_field failure")]
    fn test_assert_has_failure_panics_on_miss() {
        assert_has_failure(&sample_report(), "other", FailureKind::MissingField);
    }

    #[test]
    fn test_assert_failure_kinds() {
        assert_failure_kinds(
            &sample_report(),
            &[FailureKind::MissingField, FailureKind::CrossFieldViolation],
        );
    }
}
