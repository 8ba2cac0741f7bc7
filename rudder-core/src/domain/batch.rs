//! Batch progress domain type

use serde::{Deserialize, Serialize};

/// Progress of a batch job
///
/// `total` is fixed when the batch is created; `succeeded` and `failed` are
/// counted from the item-level child jobs. Pending and the percentage are
/// derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProgress {
    pub total: i64,
    pub succeeded: i64,
    pub failed: i64,
}

impl BatchProgress {
    pub fn new(total: i64, succeeded: i64, failed: i64) -> Self {
        Self {
            total,
            succeeded,
            failed,
        }
    }

    /// Number of items not yet accounted for. Never negative, even if the
    /// counted children temporarily exceed the declared total.
    pub fn pending(&self) -> i64 {
        (self.total - self.succeeded - self.failed).max(0)
    }

    /// Number of items that reached a terminal state.
    pub fn processed(&self) -> i64 {
        self.succeeded + self.failed
    }

    /// Completion percentage, rounded half-up to one decimal place.
    ///
    /// An empty batch has nothing left to do, so it reports 100.0.
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        let percentage = self.processed() as f64 / self.total as f64 * 100.0;
        (percentage.min(100.0) * 10.0).round() / 10.0
    }
}
