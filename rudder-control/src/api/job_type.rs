//! Job Type API Handlers
//!
//! Read-only discovery endpoints over the static job-type registry.

use axum::{
    Json,
    extract::{Path, State},
};
use rudder_core::domain::registry::JobTypeDescriptor;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};

/// GET /job-types
/// List all registered job types
pub async fn list_job_types(State(state): State<AppState>) -> Json<Vec<JobTypeDescriptor>> {
    let types = state.registry.all().into_iter().cloned().collect();
    Json(types)
}

/// GET /job-types/{name}
/// Get one job type descriptor by name
pub async fn get_job_type(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<JobTypeDescriptor>> {
    state
        .registry
        .get(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Job type {} not found", name)))
}
