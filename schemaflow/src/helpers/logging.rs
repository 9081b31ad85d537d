//! Logging composition helpers.
//!
//! Validators are wrapped explicitly, one at a time, with ordinary
//! higher-order functions; there is no implicit interception of every
//! validator in a schema.

use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::schema::FieldValidator;

/// Installs a global tracing subscriber reading `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Wraps a validator so each run is logged at debug level, with rejections
/// logged as warnings.
#[must_use]
pub fn logged(inner: FieldValidator) -> FieldValidator {
    let name = inner.name().to_string();
    FieldValidator::new(format!("logged({name})"), move |value| {
        debug!(validator = %name, "running validator");
        match inner.apply(value) {
            Ok(value) => {
                debug!(validator = %name, "validator passed");
                Ok(value)
            }
            Err(message) => {
                warn!(validator = %name, message = %message, "validator rejected value");
                Err(message)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_logged_passes_values_through() {
        let inner = FieldValidator::new("double", |value| {
            let n = value.as_i64().ok_or_else(|| "expected an integer".to_string())?;
            Ok(json!(n * 2))
        });
        let wrapped = logged(inner);

        assert_eq!(wrapped.name(), "logged(double)");
        assert_eq!(wrapped.apply(json!(21)).unwrap(), json!(42));
    }

    #[test]
    fn test_logged_passes_errors_through() {
        let inner = FieldValidator::new("reject", |_| Err("nope".to_string()));
        let wrapped = logged(inner);

        assert_eq!(wrapped.apply(json!(1)).unwrap_err(), "nope");
    }
}
