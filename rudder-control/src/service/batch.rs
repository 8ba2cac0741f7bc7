//! Batch Progress Aggregation
//!
//! Computes batch progress from the states of the item-level child jobs.
//! Total function: inconsistent inputs are logged and clamped, never an error.

use rudder_core::domain::batch::BatchProgress;
use rudder_core::domain::execution::ExecutionStatus;

/// Aggregate item states into a batch progress
///
/// `child_states` holds every item child known so far and may be shorter than
/// `total` while items are still being enqueued. Cancelled items count as
/// failed: they are non-recoverable for progress purposes.
pub fn aggregate(total: i64, child_states: &[ExecutionStatus]) -> BatchProgress {
    let succeeded = child_states
        .iter()
        .filter(|s| **s == ExecutionStatus::Succeeded)
        .count() as i64;
    let failed = child_states
        .iter()
        .filter(|s| matches!(s, ExecutionStatus::Failed | ExecutionStatus::Cancelled))
        .count() as i64;

    if succeeded + failed > total {
        tracing::warn!(
            "Batch reports {} completed items but declares a total of {}; clamping pending to 0",
            succeeded + failed,
            total
        );
    }

    BatchProgress::new(total, succeeded, failed)
}
