//! Parameter set domain types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Reserved parameter name whose value is not job data but a reference to an
/// externally stored parameter set.
pub const PARAMETER_SET_KEY: &str = "__parameterSetId";

/// A set of job parameters stored outside the job record
///
/// Created on first external save of a job's parameters. The `version` field
/// backs optimistic locking on the write path: an update must present the
/// version it read, and mismatches are rejected rather than overwritten.
/// The read path never checks it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSet {
    pub id: Uuid,
    pub job_type: String,
    pub parameters: HashMap<String, serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub version: i64,
}
