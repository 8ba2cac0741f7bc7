//! Chain Evaluation
//!
//! Derives one aggregate status for a root job and its continuation tree.
//!
//! Continuation rules (as recorded by the job engine):
//! - The success link runs only if its parent succeeds.
//! - The failure link runs only if its parent fails.
//!
//! Only leaves reachable by following the link matching each ancestor's
//! actual outcome count ("relevant leaves"). While any node on such a path
//! is still non-terminal the relevant-leaf set is provisional, so the chain
//! reports Processing rather than a premature verdict.

use rudder_core::domain::execution::{ExecutionNode, ExecutionStatus};

/// Aggregate outcome of a chain walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainEvaluation {
    pub status: ExecutionStatus,
    /// Maximum finished-at among relevant leaves; set only once the chain
    /// is terminal.
    pub finished_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Evaluate the aggregate status of the chain rooted at `root`
pub fn evaluate(root: &ExecutionNode) -> ChainEvaluation {
    // Common non-chained case: the chain status is the root's own state.
    if root.is_leaf() {
        return ChainEvaluation {
            status: root.status,
            finished_at: root.finished_at,
        };
    }

    let mut leaves = Vec::new();
    if !collect_relevant_leaves(root, &mut leaves) {
        return ChainEvaluation {
            status: ExecutionStatus::Processing,
            finished_at: None,
        };
    }

    // Pessimistic aggregation: Failed dominates Cancelled dominates Succeeded.
    let status = if leaves.iter().any(|l| l.status == ExecutionStatus::Failed) {
        ExecutionStatus::Failed
    } else if leaves.iter().any(|l| l.status == ExecutionStatus::Cancelled) {
        ExecutionStatus::Cancelled
    } else {
        ExecutionStatus::Succeeded
    };

    let finished_at = leaves.iter().filter_map(|l| l.finished_at).max();

    ChainEvaluation {
        status,
        finished_at,
    }
}

/// Walk the outcome-matched path from `node`, pushing every relevant leaf.
///
/// Returns `false` as soon as a node on a followed path is not yet terminal;
/// the leaf set is then incomplete and must not be used for a verdict.
fn collect_relevant_leaves<'a>(
    node: &'a ExecutionNode,
    leaves: &mut Vec<&'a ExecutionNode>,
) -> bool {
    if !node.status.is_terminal() {
        return false;
    }

    // A cancelled node triggers neither continuation.
    let next = match node.status {
        ExecutionStatus::Succeeded => node.on_success.as_deref(),
        ExecutionStatus::Failed => node.on_failure.as_deref(),
        _ => None,
    };

    match next {
        Some(child) => collect_relevant_leaves(child, leaves),
        None => {
            leaves.push(node);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn at(minute: u32) -> chrono::DateTime<chrono::Utc> {
        use chrono::TimeZone;
        chrono::Utc
            .with_ymd_and_hms(2025, 6, 1, 12, minute, 0)
            .unwrap()
    }

    fn node(status: ExecutionStatus, finished_minute: Option<u32>) -> ExecutionNode {
        ExecutionNode {
            job_id: Uuid::new_v4(),
            job_type: "report".to_string(),
            display_name: "Report".to_string(),
            status,
            started_at: Some(at(0)),
            finished_at: finished_minute.map(at),
            parameters: Default::default(),
            metadata: Default::default(),
            batch_total: None,
            on_success: None,
            on_failure: None,
        }
    }

    #[test]
    fn test_root_without_continuations_keeps_own_status() {
        for status in [
            ExecutionStatus::Scheduled,
            ExecutionStatus::Processing,
            ExecutionStatus::Succeeded,
            ExecutionStatus::Failed,
            ExecutionStatus::Cancelled,
        ] {
            let root = node(status, Some(5));
            let result = evaluate(&root);
            assert_eq!(result.status, status);
            assert_eq!(result.finished_at, root.finished_at);
        }
    }

    #[test]
    fn test_running_continuation_keeps_chain_processing() {
        let mut root = node(ExecutionStatus::Succeeded, Some(1));
        root.on_success = Some(Box::new(node(ExecutionStatus::Processing, None)));

        let result = evaluate(&root);
        assert_eq!(result.status, ExecutionStatus::Processing);
        assert_eq!(result.finished_at, None);
    }

    #[test]
    fn test_scheduled_continuation_keeps_chain_processing() {
        let mut root = node(ExecutionStatus::Succeeded, Some(1));
        root.on_success = Some(Box::new(node(ExecutionStatus::Scheduled, None)));

        assert_eq!(evaluate(&root).status, ExecutionStatus::Processing);
    }

    #[test]
    fn test_non_terminal_root_with_links_is_processing() {
        let mut root = node(ExecutionStatus::Processing, None);
        root.on_success = Some(Box::new(node(ExecutionStatus::Scheduled, None)));
        root.on_failure = Some(Box::new(node(ExecutionStatus::Scheduled, None)));

        assert_eq!(evaluate(&root).status, ExecutionStatus::Processing);
    }

    #[test]
    fn test_untaken_failure_branch_is_ignored() {
        // Root succeeded, so the failure continuation never runs; only the
        // success-path leaf decides the verdict.
        let mut root = node(ExecutionStatus::Succeeded, Some(1));
        root.on_success = Some(Box::new(node(ExecutionStatus::Succeeded, Some(3))));
        root.on_failure = Some(Box::new(node(ExecutionStatus::Scheduled, None)));

        let result = evaluate(&root);
        assert_eq!(result.status, ExecutionStatus::Succeeded);
        assert_eq!(result.finished_at, Some(at(3)));
    }

    #[test]
    fn test_failed_leaf_marks_chain_failed() {
        let mut root = node(ExecutionStatus::Failed, Some(2));
        root.on_failure = Some(Box::new(node(ExecutionStatus::Failed, Some(4))));
        root.on_success = Some(Box::new(node(ExecutionStatus::Succeeded, Some(3))));

        assert_eq!(evaluate(&root).status, ExecutionStatus::Failed);
    }

    #[test]
    fn test_successful_cleanup_after_failure_is_succeeded() {
        // Root failed, but the failure continuation (cleanup) succeeded;
        // the relevant leaf is the cleanup job.
        let mut root = node(ExecutionStatus::Failed, Some(2));
        root.on_failure = Some(Box::new(node(ExecutionStatus::Succeeded, Some(6))));

        let result = evaluate(&root);
        assert_eq!(result.status, ExecutionStatus::Succeeded);
        assert_eq!(result.finished_at, Some(at(6)));
    }

    #[test]
    fn test_terminal_node_without_matching_link_is_the_leaf() {
        // Root failed and only a success continuation exists: nothing runs
        // after the root, so the root itself is the relevant leaf.
        let mut root = node(ExecutionStatus::Failed, Some(2));
        root.on_success = Some(Box::new(node(ExecutionStatus::Scheduled, None)));

        let result = evaluate(&root);
        assert_eq!(result.status, ExecutionStatus::Failed);
        assert_eq!(result.finished_at, Some(at(2)));
    }

    #[test]
    fn test_cancelled_node_follows_no_link() {
        let mut root = node(ExecutionStatus::Cancelled, Some(2));
        root.on_success = Some(Box::new(node(ExecutionStatus::Scheduled, None)));
        root.on_failure = Some(Box::new(node(ExecutionStatus::Scheduled, None)));

        assert_eq!(evaluate(&root).status, ExecutionStatus::Cancelled);
    }

    #[test]
    fn test_failed_dominates_cancelled() {
        // Two-level chain whose relevant leaves disagree: a failed leaf wins.
        let mut middle = node(ExecutionStatus::Succeeded, Some(3));
        middle.on_success = Some(Box::new(node(ExecutionStatus::Failed, Some(5))));

        let mut root = node(ExecutionStatus::Succeeded, Some(1));
        root.on_success = Some(Box::new(middle));
        root.on_failure = Some(Box::new(node(ExecutionStatus::Cancelled, Some(2))));

        assert_eq!(evaluate(&root).status, ExecutionStatus::Failed);
    }

    #[test]
    fn test_deep_chain_finished_at_is_latest_leaf() {
        let third = node(ExecutionStatus::Succeeded, Some(9));
        let mut second = node(ExecutionStatus::Succeeded, Some(4));
        second.on_success = Some(Box::new(third));

        let mut root = node(ExecutionStatus::Succeeded, Some(1));
        root.on_success = Some(Box::new(second));

        let result = evaluate(&root);
        assert_eq!(result.status, ExecutionStatus::Succeeded);
        assert_eq!(result.finished_at, Some(at(9)));
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let mut root = node(ExecutionStatus::Succeeded, Some(1));
        root.on_success = Some(Box::new(node(ExecutionStatus::Succeeded, Some(3))));

        assert_eq!(evaluate(&root), evaluate(&root));
    }
}
