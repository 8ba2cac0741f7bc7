//! Parameter Validation
//!
//! Checks submitted parameter values against a job type's declared fields:
//! required fields must be present and non-blank, present values must match
//! their declared kind. Names the descriptor does not declare pass through
//! unchecked (the engine may carry extra bookkeeping values).

use rudder_core::domain::registry::{JobTypeDescriptor, ParameterKind};
use std::collections::HashMap;

/// Validate parameters against a descriptor, returning every violation
///
/// An empty result means the parameters are acceptable.
pub fn validate_parameters(
    descriptor: &JobTypeDescriptor,
    parameters: &HashMap<String, serde_json::Value>,
) -> Vec<String> {
    let mut errors = Vec::new();

    for field in &descriptor.parameters {
        let value = parameters.get(&field.name);

        if field.required && is_missing(value) {
            errors.push(format!("Parameter '{}' is required", field.name));
            continue;
        }

        let Some(value) = value else {
            continue;
        };
        if value.is_null() {
            continue;
        }

        if let Some(error) = check_kind(&field.name, field.kind, value) {
            errors.push(error);
        }
    }

    errors
}

fn is_missing(value: Option<&serde_json::Value>) -> bool {
    match value {
        None => true,
        Some(serde_json::Value::Null) => true,
        Some(serde_json::Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn check_kind(name: &str, kind: ParameterKind, value: &serde_json::Value) -> Option<String> {
    let ok = match kind {
        ParameterKind::String => value.is_string(),
        ParameterKind::Integer => value.is_i64() || value.is_u64(),
        ParameterKind::Boolean => value.is_boolean(),
        ParameterKind::Date => value
            .as_str()
            .is_some_and(|s| s.parse::<chrono::NaiveDate>().is_ok()),
        ParameterKind::DateTime => value.as_str().is_some_and(|s| {
            chrono::DateTime::parse_from_rfc3339(s).is_ok()
                || s.parse::<chrono::NaiveDateTime>().is_ok()
        }),
    };

    if ok {
        None
    } else {
        Some(match kind {
            ParameterKind::String => format!("Parameter '{}' must be a string", name),
            ParameterKind::Integer => format!("Parameter '{}' must be an integer", name),
            ParameterKind::Boolean => format!("Parameter '{}' must be a boolean", name),
            ParameterKind::Date => {
                format!("Parameter '{}' must be a date (YYYY-MM-DD)", name)
            }
            ParameterKind::DateTime => {
                format!("Parameter '{}' must be a date-time (ISO 8601)", name)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rudder_core::domain::registry::ParameterField;
    use serde_json::json;

    fn descriptor() -> JobTypeDescriptor {
        JobTypeDescriptor {
            name: "notification".to_string(),
            display_name: "Notification".to_string(),
            is_batch: false,
            parameters: vec![
                ParameterField::new("recipient_email", ParameterKind::String, true),
                ParameterField::new("retries", ParameterKind::Integer, false),
                ParameterField::new("send_immediately", ParameterKind::Boolean, false),
                ParameterField::new("run_date", ParameterKind::Date, false),
                ParameterField::new("scheduled_for", ParameterKind::DateTime, false),
            ],
        }
    }

    fn params(pairs: &[(&str, serde_json::Value)]) -> HashMap<String, serde_json::Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_valid_parameters_pass() {
        let errors = validate_parameters(
            &descriptor(),
            &params(&[
                ("recipient_email", json!("ops@example.com")),
                ("retries", json!(3)),
                ("send_immediately", json!(true)),
                ("run_date", json!("2025-06-01")),
                ("scheduled_for", json!("2025-06-01T12:00:00Z")),
            ]),
        );
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    }

    #[test]
    fn test_missing_required_field() {
        let errors = validate_parameters(&descriptor(), &params(&[("retries", json!(1))]));
        assert_eq!(errors, vec!["Parameter 'recipient_email' is required"]);
    }

    #[test]
    fn test_blank_required_field_counts_as_missing() {
        let errors =
            validate_parameters(&descriptor(), &params(&[("recipient_email", json!("  "))]));
        assert_eq!(errors, vec!["Parameter 'recipient_email' is required"]);
    }

    #[test]
    fn test_kind_mismatches_are_reported() {
        let errors = validate_parameters(
            &descriptor(),
            &params(&[
                ("recipient_email", json!("ops@example.com")),
                ("retries", json!("three")),
                ("send_immediately", json!("yes")),
                ("run_date", json!("01.06.2025")),
            ]),
        );
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("'retries'")));
        assert!(errors.iter().any(|e| e.contains("'send_immediately'")));
        assert!(errors.iter().any(|e| e.contains("'run_date'")));
    }

    #[test]
    fn test_optional_fields_may_be_absent_or_null() {
        let errors = validate_parameters(
            &descriptor(),
            &params(&[
                ("recipient_email", json!("ops@example.com")),
                ("retries", json!(null)),
            ]),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_undeclared_names_pass_through() {
        let errors = validate_parameters(
            &descriptor(),
            &params(&[
                ("recipient_email", json!("ops@example.com")),
                ("engine_internal", json!({"attempt": 2})),
            ]),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_naive_datetime_accepted() {
        let errors = validate_parameters(
            &descriptor(),
            &params(&[
                ("recipient_email", json!("ops@example.com")),
                ("scheduled_for", json!("2025-06-01T12:00:00")),
            ]),
        );
        assert!(errors.is_empty());
    }
}
