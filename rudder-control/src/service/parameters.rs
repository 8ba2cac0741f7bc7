//! Parameter Service
//!
//! Resolves the external-parameter indirection for display and carries the
//! write path for externally stored parameter sets.
//!
//! Resolution is deliberately lenient: a malformed or dangling reference must
//! never abort a status query, so it resolves to an empty mapping and leaves
//! a warning in the log.

use rudder_core::domain::parameter::{PARAMETER_SET_KEY, ParameterSet};
use rudder_core::dto::parameter::{CreateParameterSet, UpdateParameterSet};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::repository::parameter_set_repository;

/// Service error type (write path only; resolution never fails)
#[derive(Debug)]
pub enum ParameterError {
    NotFound(Uuid),
    VersionConflict(Uuid),
    DatabaseError(sqlx::Error),
}

impl From<sqlx::Error> for ParameterError {
    fn from(err: sqlx::Error) -> Self {
        ParameterError::DatabaseError(err)
    }
}

/// How a raw parameter mapping references its values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterReference {
    /// No indirection key; the mapping is the data.
    Inline,
    /// Indirection key holding a well-formed parameter set id.
    External(Uuid),
    /// Indirection key present but not a parseable id.
    Malformed,
}

/// Classify a raw parameter mapping
pub fn classify(raw: &HashMap<String, serde_json::Value>) -> ParameterReference {
    let Some(value) = raw.get(PARAMETER_SET_KEY) else {
        return ParameterReference::Inline;
    };

    match value.as_str().and_then(|s| Uuid::parse_str(s).ok()) {
        Some(id) => ParameterReference::External(id),
        None => ParameterReference::Malformed,
    }
}

/// Whether the mapping stores its values externally
pub fn uses_external_storage(raw: &HashMap<String, serde_json::Value>) -> bool {
    raw.contains_key(PARAMETER_SET_KEY)
}

/// Extract the referenced parameter set id, if well-formed
pub fn extract_reference_id(raw: &HashMap<String, serde_json::Value>) -> Option<Uuid> {
    match classify(raw) {
        ParameterReference::External(id) => Some(id),
        _ => None,
    }
}

/// Resolve a raw parameter mapping into concrete values
///
/// Total function: every anomaly (malformed reference, missing set, store
/// failure) resolves to an empty mapping after a warning.
pub async fn resolve(
    pool: &PgPool,
    raw: &HashMap<String, serde_json::Value>,
) -> HashMap<String, serde_json::Value> {
    match classify(raw) {
        ParameterReference::Inline => raw.clone(),
        ParameterReference::Malformed => {
            tracing::warn!(
                "Parameter reference {:?} is not a valid parameter set id",
                raw.get(PARAMETER_SET_KEY)
            );
            HashMap::new()
        }
        ParameterReference::External(id) => {
            match parameter_set_repository::find_by_id(pool, id).await {
                Ok(Some(set)) => set.parameters,
                Ok(None) => {
                    tracing::warn!("Parameter set {} not found", id);
                    HashMap::new()
                }
                Err(err) => {
                    tracing::warn!("Failed to load parameter set {}: {:?}", id, err);
                    HashMap::new()
                }
            }
        }
    }
}

// =============================================================================
// Write Path
// =============================================================================

/// Store a new parameter set
pub async fn store(
    pool: &PgPool,
    req: CreateParameterSet,
) -> Result<ParameterSet, ParameterError> {
    let set = parameter_set_repository::create(pool, req.job_type, req.parameters).await?;

    tracing::info!("Parameter set {} created for job type {}", set.id, set.job_type);

    Ok(set)
}

/// Get a parameter set by ID
pub async fn get(pool: &PgPool, id: Uuid) -> Result<ParameterSet, ParameterError> {
    let set = parameter_set_repository::find_by_id(pool, id)
        .await?
        .ok_or(ParameterError::NotFound(id))?;

    Ok(set)
}

/// List parameter sets for a job type
pub async fn list_by_job_type(
    pool: &PgPool,
    job_type: &str,
) -> Result<Vec<ParameterSet>, ParameterError> {
    let sets = parameter_set_repository::find_by_job_type(pool, job_type).await?;
    Ok(sets)
}

/// Update a parameter set under optimistic locking
///
/// The caller supplies the version it read; a mismatch is rejected, never
/// silently overwritten.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    req: UpdateParameterSet,
) -> Result<ParameterSet, ParameterError> {
    let updated =
        parameter_set_repository::update_with_version(pool, id, &req.parameters, req.version)
            .await?;

    if !updated {
        // Either the row is gone or the version was stale.
        return match parameter_set_repository::find_by_id(pool, id).await? {
            Some(current) => {
                tracing::warn!(
                    "Rejected stale update of parameter set {} (expected version {}, stored {})",
                    id,
                    req.version,
                    current.version
                );
                Err(ParameterError::VersionConflict(id))
            }
            None => Err(ParameterError::NotFound(id)),
        };
    }

    let set = parameter_set_repository::find_by_id(pool, id)
        .await?
        .ok_or(ParameterError::NotFound(id))?;

    tracing::info!("Parameter set {} updated to version {}", id, set.version);

    Ok(set)
}

/// Delete a parameter set
pub async fn remove(pool: &PgPool, id: Uuid) -> Result<(), ParameterError> {
    let deleted = parameter_set_repository::delete(pool, id).await?;

    if !deleted {
        return Err(ParameterError::NotFound(id));
    }

    tracing::info!("Parameter set {} deleted", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(pairs: &[(&str, serde_json::Value)]) -> HashMap<String, serde_json::Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_classify_empty_mapping_is_inline() {
        assert_eq!(classify(&raw(&[])), ParameterReference::Inline);
    }

    #[test]
    fn test_classify_plain_values_are_inline() {
        let params = raw(&[("a", json!(1)), ("b", json!("two"))]);
        assert_eq!(classify(&params), ParameterReference::Inline);
        assert!(!uses_external_storage(&params));
        assert_eq!(extract_reference_id(&params), None);
    }

    #[test]
    fn test_classify_valid_reference() {
        let id = Uuid::new_v4();
        let params = raw(&[(PARAMETER_SET_KEY, json!(id.to_string()))]);
        assert_eq!(classify(&params), ParameterReference::External(id));
        assert!(uses_external_storage(&params));
        assert_eq!(extract_reference_id(&params), Some(id));
    }

    #[test]
    fn test_classify_malformed_reference() {
        let params = raw(&[(PARAMETER_SET_KEY, json!("not-a-uuid"))]);
        assert_eq!(classify(&params), ParameterReference::Malformed);
        assert!(uses_external_storage(&params));
        assert_eq!(extract_reference_id(&params), None);
    }

    #[test]
    fn test_classify_non_string_reference_is_malformed() {
        let params = raw(&[(PARAMETER_SET_KEY, json!(42))]);
        assert_eq!(classify(&params), ParameterReference::Malformed);
    }
}
