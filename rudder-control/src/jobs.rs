//! Built-in Job Types
//!
//! Each job type this deployment can run supplies its own descriptor here;
//! the registry is assembled once at startup and never changes afterwards.

use rudder_core::domain::registry::{
    JobTypeDescriptor, JobTypeRegistry, ParameterField, ParameterKind,
};

/// Job types known to this deployment
pub fn builtin_job_types() -> JobTypeRegistry {
    JobTypeRegistry::from_descriptors(vec![
        simple_report(),
        notification(),
        system_maintenance(),
        calculation_batch(),
    ])
}

fn simple_report() -> JobTypeDescriptor {
    JobTypeDescriptor {
        name: "simple-report".to_string(),
        display_name: "Simple Report".to_string(),
        is_batch: false,
        parameters: vec![],
    }
}

fn notification() -> JobTypeDescriptor {
    JobTypeDescriptor {
        name: "notification".to_string(),
        display_name: "Notification".to_string(),
        is_batch: false,
        parameters: vec![
            ParameterField::new("recipient_email", ParameterKind::String, true),
            ParameterField::new("subject", ParameterKind::String, true),
            ParameterField::new("send_immediately", ParameterKind::Boolean, false)
                .with_default(serde_json::json!(false)),
            ParameterField::new("scheduled_for", ParameterKind::DateTime, false),
        ],
    }
}

fn system_maintenance() -> JobTypeDescriptor {
    JobTypeDescriptor {
        name: "system-maintenance".to_string(),
        display_name: "System Maintenance".to_string(),
        is_batch: false,
        parameters: vec![
            ParameterField::new("clear_cache", ParameterKind::Boolean, false)
                .with_default(serde_json::json!(true)),
            ParameterField::new("compact_database", ParameterKind::Boolean, false)
                .with_default(serde_json::json!(false)),
            ParameterField::new("run_date", ParameterKind::Date, false),
        ],
    }
}

fn calculation_batch() -> JobTypeDescriptor {
    JobTypeDescriptor {
        name: "calculation-batch".to_string(),
        display_name: "Calculation Batch".to_string(),
        is_batch: true,
        parameters: vec![
            ParameterField::new("total_items", ParameterKind::Integer, true),
            ParameterField::new("batch_size", ParameterKind::Integer, false)
                .with_default(serde_json::json!(100)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtin_types_registered() {
        let registry = builtin_job_types();
        assert_eq!(registry.len(), 4);
        for name in [
            "simple-report",
            "notification",
            "system-maintenance",
            "calculation-batch",
        ] {
            assert!(registry.contains(name), "missing job type {}", name);
        }
    }

    #[test]
    fn test_batch_flag() {
        let registry = builtin_job_types();
        assert!(registry.get("calculation-batch").unwrap().is_batch);
        assert!(!registry.get("notification").unwrap().is_batch);
    }
}
