//! Parameter set DTOs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request to store a new external parameter set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateParameterSet {
    pub job_type: String,
    pub parameters: HashMap<String, serde_json::Value>,
}

/// Request to update an existing parameter set
///
/// `version` must be the version the caller last read; the update is
/// rejected when it no longer matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateParameterSet {
    pub parameters: HashMap<String, serde_json::Value>,
    pub version: i64,
}
