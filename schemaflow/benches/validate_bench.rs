//! Benchmarks for schema validation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use schemaflow::testing::{employee_schema, user_schema};
use schemaflow::validate::validate_value;
use serde_json::json;

fn validate_benchmark(c: &mut Criterion) {
    let user = user_schema();
    let flat_input = json!({"id": "1", "name": "John Doe", "email": "john@example.com"});

    c.bench_function("validate_flat_record", |b| {
        b.iter(|| validate_value(black_box(&user), black_box(&flat_input)))
    });

    let employee = employee_schema();
    let nested_input = json!({
        "user": {"id": 7, "name": "Jane Doe", "email": "jane@example.com"},
        "department": "Research",
        "address": {
            "street": "123 Main St",
            "city": "Anytown",
            "country": "USA",
            "postal_code": "12345"
        },
        "hire_date": "2023-06-01"
    });

    c.bench_function("validate_nested_record", |b| {
        b.iter(|| validate_value(black_box(&employee), black_box(&nested_input)))
    });
}

criterion_group!(benches, validate_benchmark);
criterion_main!(benches);
