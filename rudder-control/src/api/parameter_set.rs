//! Parameter Set API Handlers
//!
//! HTTP endpoints for externally stored parameter sets. Updates carry the
//! version the caller read; stale versions come back as 409.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rudder_core::domain::parameter::ParameterSet;
use rudder_core::dto::parameter::{CreateParameterSet, UpdateParameterSet};
use uuid::Uuid;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::service::{parameter_service, validation};

fn map_error(e: parameter_service::ParameterError) -> ApiError {
    match e {
        parameter_service::ParameterError::NotFound(id) => {
            ApiError::NotFound(format!("Parameter set {} not found", id))
        }
        parameter_service::ParameterError::VersionConflict(id) => ApiError::Conflict(format!(
            "Parameter set {} was modified concurrently; reload and retry",
            id
        )),
        parameter_service::ParameterError::DatabaseError(err) => ApiError::DatabaseError(err),
    }
}

/// POST /parameter-set
/// Store a new parameter set
pub async fn create_parameter_set(
    State(state): State<AppState>,
    Json(req): Json<CreateParameterSet>,
) -> ApiResult<(StatusCode, Json<ParameterSet>)> {
    tracing::info!("Creating parameter set for job type: {}", req.job_type);

    let Some(descriptor) = state.registry.get(&req.job_type) else {
        return Err(ApiError::BadRequest(format!(
            "Unknown job type: {}",
            req.job_type
        )));
    };

    let errors = validation::validate_parameters(descriptor, &req.parameters);
    if !errors.is_empty() {
        return Err(ApiError::BadRequest(errors.join("; ")));
    }

    let set = parameter_service::store(&state.pool, req)
        .await
        .map_err(map_error)?;

    Ok((StatusCode::CREATED, Json(set)))
}

/// GET /parameter-set/{id}
/// Get a parameter set by ID
pub async fn get_parameter_set(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ParameterSet>> {
    tracing::debug!("Getting parameter set: {}", id);

    let set = parameter_service::get(&state.pool, id)
        .await
        .map_err(map_error)?;

    Ok(Json(set))
}

/// GET /parameter-set/job-type/{job_type}
/// List parameter sets for a job type
pub async fn list_parameter_sets(
    State(state): State<AppState>,
    Path(job_type): Path<String>,
) -> ApiResult<Json<Vec<ParameterSet>>> {
    tracing::debug!("Listing parameter sets for job type: {}", job_type);

    let sets = parameter_service::list_by_job_type(&state.pool, &job_type)
        .await
        .map_err(map_error)?;

    Ok(Json(sets))
}

/// PUT /parameter-set/{id}
/// Update a parameter set under optimistic locking
pub async fn update_parameter_set(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateParameterSet>,
) -> ApiResult<Json<ParameterSet>> {
    tracing::info!("Updating parameter set: {} (version {})", id, req.version);

    // The stored set names the job type the new values must validate against.
    let current = parameter_service::get(&state.pool, id)
        .await
        .map_err(map_error)?;

    if let Some(descriptor) = state.registry.get(&current.job_type) {
        let errors = validation::validate_parameters(descriptor, &req.parameters);
        if !errors.is_empty() {
            return Err(ApiError::BadRequest(errors.join("; ")));
        }
    } else {
        // Job type retired from the registry; accept the update as-is.
        tracing::warn!(
            "Parameter set {} references unregistered job type {}",
            id,
            current.job_type
        );
    }

    let set = parameter_service::update(&state.pool, id, req)
        .await
        .map_err(map_error)?;

    Ok(Json(set))
}

/// DELETE /parameter-set/{id}
/// Delete a parameter set
pub async fn delete_parameter_set(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    tracing::info!("Deleting parameter set: {}", id);

    parameter_service::remove(&state.pool, id)
        .await
        .map_err(map_error)?;

    Ok(StatusCode::NO_CONTENT)
}
