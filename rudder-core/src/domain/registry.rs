//! Job type registry
//!
//! Statically built catalog of the job types a deployment knows about.
//! Each job-type definition supplies its own descriptor at startup; there is
//! no runtime discovery, and the registry never changes after construction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declared data type of a job parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterKind {
    String,
    Integer,
    Boolean,
    Date,
    DateTime,
}

/// Metadata for one parameter of a job type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterField {
    pub name: String,
    pub kind: ParameterKind,
    pub required: bool,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

impl ParameterField {
    pub fn new(name: impl Into<String>, kind: ParameterKind, required: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            required,
            default: None,
        }
    }

    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Descriptor for one job type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobTypeDescriptor {
    /// Job type name as it appears on execution records.
    pub name: String,
    pub display_name: String,
    pub is_batch: bool,
    pub parameters: Vec<ParameterField>,
}

/// Immutable job-type catalog, keyed by job type name
#[derive(Debug, Clone, Default)]
pub struct JobTypeRegistry {
    types: HashMap<String, JobTypeDescriptor>,
}

impl JobTypeRegistry {
    /// Build a registry from descriptors. A duplicate name keeps the last
    /// descriptor registered for it.
    pub fn from_descriptors(descriptors: Vec<JobTypeDescriptor>) -> Self {
        let types = descriptors
            .into_iter()
            .map(|d| (d.name.clone(), d))
            .collect();
        Self { types }
    }

    pub fn get(&self, name: &str) -> Option<&JobTypeDescriptor> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// All descriptors, sorted by name for stable listings.
    pub fn all(&self) -> Vec<&JobTypeDescriptor> {
        let mut all: Vec<_> = self.types.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
