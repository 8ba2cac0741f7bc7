//! Execution domain types
//!
//! Execution records are owned and mutated by the external job engine;
//! Rudder only reads them and derives aggregate views.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::batch::BatchProgress;

/// Lifecycle state of a single execution record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    Scheduled,
    Processing,
    Succeeded,
    Failed,
    Cancelled,
}

impl ExecutionStatus {
    /// Terminal states will not change anymore.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ExecutionStatus::Succeeded | ExecutionStatus::Failed | ExecutionStatus::Cancelled
        )
    }
}

/// One node of a continuation tree as recorded by the job engine
///
/// `on_success` runs only if this node succeeds, `on_failure` only if it
/// fails. A node with neither link is a leaf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionNode {
    pub job_id: Uuid,
    pub job_type: String,
    pub display_name: String,
    pub status: ExecutionStatus,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub finished_at: Option<chrono::DateTime<chrono::Utc>>,
    pub parameters: HashMap<String, serde_json::Value>,
    pub metadata: HashMap<String, serde_json::Value>,
    /// Declared item count for batch-style jobs; `None` for regular jobs.
    pub batch_total: Option<i64>,
    pub on_success: Option<Box<ExecutionNode>>,
    pub on_failure: Option<Box<ExecutionNode>>,
}

impl ExecutionNode {
    pub fn is_leaf(&self) -> bool {
        self.on_success.is_none() && self.on_failure.is_none()
    }
}

/// Aggregate view of one execution (root job plus its continuation chain)
///
/// Built fresh per query; carries no identity beyond the job id it describes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionInfo {
    pub job_id: Uuid,
    pub display_name: String,
    pub job_type: String,
    /// Status of the whole chain, not just the root node.
    pub status: ExecutionStatus,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Set only once the chain is terminal.
    pub finished_at: Option<chrono::DateTime<chrono::Utc>>,
    pub batch_progress: Option<BatchProgress>,
    pub parameters: HashMap<String, serde_json::Value>,
    pub metadata: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(ExecutionStatus::Succeeded.is_terminal());
        assert!(ExecutionStatus::Failed.is_terminal());
        assert!(ExecutionStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_non_terminal_statuses() {
        assert!(!ExecutionStatus::Scheduled.is_terminal());
        assert!(!ExecutionStatus::Processing.is_terminal());
    }
}
