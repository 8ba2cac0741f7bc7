//! Execution Repository
//!
//! Read-only access to the execution records persisted by the job engine.
//! Continuation links are stored as parent_id + link_kind ('success',
//! 'failure'); batch item children use link_kind 'item' and are not part of
//! the continuation tree.

use rudder_core::domain::execution::{ExecutionNode, ExecutionStatus};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

/// Fetch the full continuation tree reachable from a root job id
///
/// Returns `None` when the engine has no record for the id. Batch item
/// children are excluded; they are counted separately.
pub async fn chain_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ExecutionNode>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ExecutionRow>(
        r#"
        WITH RECURSIVE chain AS (
            SELECT id, job_type, display_name, status, started_at, finished_at,
                   parameters, metadata, batch_total, parent_id, link_kind, 0 AS depth
            FROM executions
            WHERE id = $1
            UNION ALL
            SELECT e.id, e.job_type, e.display_name, e.status, e.started_at, e.finished_at,
                   e.parameters, e.metadata, e.batch_total, e.parent_id, e.link_kind,
                   c.depth + 1
            FROM executions e
            JOIN chain c ON e.parent_id = c.id
            WHERE e.link_kind IN ('success', 'failure') AND c.depth < 64
        )
        SELECT DISTINCT ON (id)
               id, job_type, display_name, status, started_at, finished_at,
               parameters, metadata, batch_total, parent_id, link_kind
        FROM chain
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(assemble_tree(id, rows))
}

/// Ids of root executions (no parent link), newest first
///
/// Roots with no started-at yet (still scheduled) sort last; ties break on
/// id so pages stay stable.
pub async fn list_root_ids(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<Uuid>, sqlx::Error> {
    let rows: Vec<(Uuid,)> = sqlx::query_as(
        r#"
        SELECT id
        FROM executions
        WHERE parent_id IS NULL
        ORDER BY started_at DESC NULLS LAST, id
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// States of the item-level children of a batch job
pub async fn batch_item_states(
    pool: &PgPool,
    root_id: Uuid,
) -> Result<Vec<ExecutionStatus>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT status
        FROM executions
        WHERE parent_id = $1 AND link_kind = 'item'
        "#,
    )
    .bind(root_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(|(s,)| string_to_status(s)).collect())
}

// =============================================================================
// Tree Assembly
// =============================================================================

/// Rebuild the continuation tree from the flat row set of the recursive query
fn assemble_tree(root_id: Uuid, rows: Vec<ExecutionRow>) -> Option<ExecutionNode> {
    let mut children: HashMap<Uuid, Vec<(String, Uuid)>> = HashMap::new();
    let mut by_id: HashMap<Uuid, ExecutionRow> = HashMap::new();

    for row in rows {
        if let (Some(parent), Some(kind)) = (row.parent_id, row.link_kind.clone()) {
            children.entry(parent).or_default().push((kind, row.id));
        }
        by_id.insert(row.id, row);
    }

    let mut visited = std::collections::HashSet::new();
    build_node(root_id, &by_id, &children, &mut visited)
}

fn build_node(
    id: Uuid,
    by_id: &HashMap<Uuid, ExecutionRow>,
    children: &HashMap<Uuid, Vec<(String, Uuid)>>,
    visited: &mut std::collections::HashSet<Uuid>,
) -> Option<ExecutionNode> {
    // Parent links are engine-owned and expected to form a tree; a repeated
    // id means the row set is corrupted, so the link is dropped instead of
    // recursing forever.
    if !visited.insert(id) {
        tracing::warn!("Execution {} appears twice in its own continuation tree", id);
        return None;
    }

    let row = by_id.get(&id)?;

    let mut on_success = None;
    let mut on_failure = None;
    if let Some(links) = children.get(&id) {
        for (kind, child_id) in links {
            match kind.as_str() {
                "success" => {
                    on_success = build_node(*child_id, by_id, children, visited).map(Box::new)
                }
                "failure" => {
                    on_failure = build_node(*child_id, by_id, children, visited).map(Box::new)
                }
                _ => {}
            }
        }
    }

    Some(ExecutionNode {
        job_id: row.id,
        job_type: row.job_type.clone(),
        display_name: row.display_name.clone(),
        status: string_to_status(&row.status),
        started_at: row.started_at,
        finished_at: row.finished_at,
        parameters: serde_json::from_value(row.parameters.clone()).unwrap_or_default(),
        metadata: serde_json::from_value(row.metadata.clone()).unwrap_or_default(),
        batch_total: row.batch_total,
        on_success,
        on_failure,
    })
}

// =============================================================================
// Helper Functions
// =============================================================================

fn string_to_status(s: &str) -> ExecutionStatus {
    match s {
        "Scheduled" => ExecutionStatus::Scheduled,
        "Processing" => ExecutionStatus::Processing,
        "Succeeded" => ExecutionStatus::Succeeded,
        "Failed" => ExecutionStatus::Failed,
        "Cancelled" => ExecutionStatus::Cancelled,
        _ => ExecutionStatus::Scheduled,
    }
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(Debug, Clone, sqlx::FromRow)]
struct ExecutionRow {
    id: Uuid,
    job_type: String,
    display_name: String,
    status: String,
    started_at: Option<chrono::DateTime<chrono::Utc>>,
    finished_at: Option<chrono::DateTime<chrono::Utc>>,
    parameters: serde_json::Value,
    metadata: serde_json::Value,
    batch_total: Option<i64>,
    parent_id: Option<Uuid>,
    link_kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: Uuid, status: &str, parent: Option<(Uuid, &str)>) -> ExecutionRow {
        ExecutionRow {
            id,
            job_type: "report".to_string(),
            display_name: "Report".to_string(),
            status: status.to_string(),
            started_at: None,
            finished_at: None,
            parameters: serde_json::json!({}),
            metadata: serde_json::json!({}),
            batch_total: None,
            parent_id: parent.map(|(p, _)| p),
            link_kind: parent.map(|(_, k)| k.to_string()),
        }
    }

    #[test]
    fn test_assemble_single_node() {
        let root_id = Uuid::new_v4();
        let tree = assemble_tree(root_id, vec![row(root_id, "Succeeded", None)]).unwrap();
        assert_eq!(tree.job_id, root_id);
        assert!(tree.is_leaf());
    }

    #[test]
    fn test_assemble_links_continuations() {
        let root_id = Uuid::new_v4();
        let ok_id = Uuid::new_v4();
        let fail_id = Uuid::new_v4();
        let rows = vec![
            row(root_id, "Succeeded", None),
            row(ok_id, "Processing", Some((root_id, "success"))),
            row(fail_id, "Scheduled", Some((root_id, "failure"))),
        ];

        let tree = assemble_tree(root_id, rows).unwrap();
        assert_eq!(tree.on_success.as_ref().unwrap().job_id, ok_id);
        assert_eq!(tree.on_failure.as_ref().unwrap().job_id, fail_id);
    }

    #[test]
    fn test_assemble_unknown_root() {
        assert!(assemble_tree(Uuid::new_v4(), vec![]).is_none());
    }

    #[test]
    fn test_assemble_tolerates_cyclic_parent_links() {
        // Corrupted row set: a and b claim each other as parent. Assembly
        // must terminate and drop the repeated link.
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let rows = vec![
            row(a, "Succeeded", Some((b, "success"))),
            row(b, "Succeeded", Some((a, "success"))),
        ];

        let tree = assemble_tree(a, rows).unwrap();
        assert_eq!(tree.job_id, a);
        let child = tree.on_success.as_ref().unwrap();
        assert_eq!(child.job_id, b);
        assert!(child.on_success.is_none());
    }

    #[test]
    fn test_unknown_status_defaults_to_scheduled() {
        assert_eq!(string_to_status("Exploded"), ExecutionStatus::Scheduled);
    }
}
