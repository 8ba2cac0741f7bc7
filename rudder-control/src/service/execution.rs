//! Execution Service
//!
//! Query facade over the chain evaluator, batch aggregator and parameter
//! resolver. One entry point per job id; fails only when the execution tree
//! cannot be fetched.

use rudder_core::domain::batch::BatchProgress;
use rudder_core::domain::execution::ExecutionInfo;
use sqlx::PgPool;
use uuid::Uuid;

use crate::repository::execution_repository;
use crate::service::{batch, chain, parameters};

/// Service error type
#[derive(Debug)]
pub enum ExecutionError {
    NotFound(Uuid),
    DatabaseError(sqlx::Error),
}

impl From<sqlx::Error> for ExecutionError {
    fn from(err: sqlx::Error) -> Self {
        ExecutionError::DatabaseError(err)
    }
}

/// Build the aggregate execution view for a root job id
pub async fn get_execution_info(pool: &PgPool, id: Uuid) -> Result<ExecutionInfo, ExecutionError> {
    let root = execution_repository::chain_by_id(pool, id)
        .await?
        .ok_or(ExecutionError::NotFound(id))?;

    let evaluation = chain::evaluate(&root);

    let batch_progress = match root.batch_total {
        Some(total) => {
            let states = execution_repository::batch_item_states(pool, id).await?;
            Some(batch::aggregate(total, &states))
        }
        None => None,
    };

    let resolved = parameters::resolve(pool, &root.parameters).await;

    Ok(ExecutionInfo {
        job_id: root.job_id,
        display_name: root.display_name,
        job_type: root.job_type,
        status: evaluation.status,
        started_at: root.started_at,
        finished_at: evaluation.finished_at,
        batch_progress,
        parameters: resolved,
        metadata: root.metadata,
    })
}

/// Default page size for history listings
pub const DEFAULT_PAGE_SIZE: i64 = 20;
/// Upper bound on caller-supplied page sizes
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp caller-supplied paging values into a sane window
pub fn page_window(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}

/// List recent root executions, newest first, as aggregate views
pub async fn list_executions(
    pool: &PgPool,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<ExecutionInfo>, ExecutionError> {
    let (limit, offset) = page_window(limit, offset);

    let ids = execution_repository::list_root_ids(pool, limit, offset).await?;

    let mut infos = Vec::with_capacity(ids.len());
    for id in ids {
        match get_execution_info(pool, id).await {
            Ok(info) => infos.push(info),
            // Row deleted between the listing and the per-root fetch.
            Err(ExecutionError::NotFound(id)) => {
                tracing::debug!("Execution {} disappeared while listing history", id);
            }
            Err(err) => return Err(err),
        }
    }

    Ok(infos)
}

/// Batch progress for one job id
///
/// `Ok(None)` means the job exists but is not a batch job.
pub async fn get_batch_progress(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<BatchProgress>, ExecutionError> {
    let root = execution_repository::chain_by_id(pool, id)
        .await?
        .ok_or(ExecutionError::NotFound(id))?;

    match root.batch_total {
        Some(total) => {
            let states = execution_repository::batch_item_states(pool, id).await?;
            Ok(Some(batch::aggregate(total, &states)))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window_defaults() {
        assert_eq!(page_window(None, None), (DEFAULT_PAGE_SIZE, 0));
    }

    #[test]
    fn test_page_window_passes_sane_values() {
        assert_eq!(page_window(Some(50), Some(100)), (50, 100));
    }

    #[test]
    fn test_page_window_clamps_limit() {
        assert_eq!(page_window(Some(0), None).0, 1);
        assert_eq!(page_window(Some(-5), None).0, 1);
        assert_eq!(page_window(Some(10_000), None).0, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_page_window_clamps_negative_offset() {
        assert_eq!(page_window(None, Some(-1)).1, 0);
    }
}
