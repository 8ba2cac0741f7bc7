//! Execution API Handlers
//!
//! HTTP endpoints for the execution read model.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rudder_core::domain::batch::BatchProgress;
use rudder_core::domain::execution::ExecutionInfo;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::service::execution_service;

/// GET /executions
/// Paginated execution history, newest first
///
/// Query parameters:
/// - `limit` (optional): page size, capped server-side
/// - `offset` (optional): number of executions to skip
pub async fn list_executions(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<ExecutionInfo>>> {
    tracing::debug!(
        "Listing execution history (limit: {:?}, offset: {:?})",
        params.limit,
        params.offset
    );

    let infos = execution_service::list_executions(&state.pool, params.limit, params.offset)
        .await
        .map_err(|e| match e {
            execution_service::ExecutionError::NotFound(id) => {
                ApiError::NotFound(format!("Execution {} not found", id))
            }
            execution_service::ExecutionError::DatabaseError(err) => ApiError::DatabaseError(err),
        })?;

    Ok(Json(infos))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /execution/{id}
/// Aggregate execution info (chain status, batch progress, resolved parameters)
pub async fn get_execution(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ExecutionInfo>> {
    tracing::debug!("Getting execution info: {}", id);

    let info = execution_service::get_execution_info(&state.pool, id)
        .await
        .map_err(|e| match e {
            execution_service::ExecutionError::NotFound(id) => {
                ApiError::NotFound(format!("Execution {} not found", id))
            }
            execution_service::ExecutionError::DatabaseError(err) => ApiError::DatabaseError(err),
        })?;

    Ok(Json(info))
}

/// GET /execution/{id}/progress
/// Batch progress for a job; `null` when the job is not a batch job
pub async fn get_progress(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Option<BatchProgress>>> {
    tracing::debug!("Getting batch progress: {}", id);

    let progress = execution_service::get_batch_progress(&state.pool, id)
        .await
        .map_err(|e| match e {
            execution_service::ExecutionError::NotFound(id) => {
                ApiError::NotFound(format!("Execution {} not found", id))
            }
            execution_service::ExecutionError::DatabaseError(err) => ApiError::DatabaseError(err),
        })?;

    Ok(Json(progress))
}
