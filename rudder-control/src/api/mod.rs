//! API Module
//!
//! HTTP API layer for the control plane.
//! Each submodule handles endpoints for a specific resource.

pub mod error;
pub mod execution;
pub mod health;
pub mod job_type;
pub mod parameter_set;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use rudder_core::domain::registry::JobTypeRegistry;
use sqlx::PgPool;
use std::sync::{Arc, Once};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub registry: Arc<JobTypeRegistry>,
}

static UNSECURED_WARNING: Once = Once::new();

/// Warn exactly once per process when the API runs without authentication.
fn warn_if_unsecured() {
    let auth_configured = std::env::var("RUDDER_AUTH_TOKEN").is_ok();
    if !auth_configured {
        UNSECURED_WARNING.call_once(|| {
            tracing::warn!(
                "RUDDER_AUTH_TOKEN is not set; the control API accepts unauthenticated requests"
            );
        });
    }
}

/// Create the main API router with all endpoints
pub fn create_router(pool: PgPool, registry: JobTypeRegistry) -> Router {
    warn_if_unsecured();

    let state = AppState {
        pool,
        registry: Arc::new(registry),
    };

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Execution endpoints
        .route("/executions", get(execution::list_executions))
        .route("/execution/{id}", get(execution::get_execution))
        .route("/execution/{id}/progress", get(execution::get_progress))
        // Job type endpoints
        .route("/job-types", get(job_type::list_job_types))
        .route("/job-types/{name}", get(job_type::get_job_type))
        // Parameter set endpoints
        .route("/parameter-set", post(parameter_set::create_parameter_set))
        .route("/parameter-set/{id}", get(parameter_set::get_parameter_set))
        .route("/parameter-set/{id}", put(parameter_set::update_parameter_set))
        .route(
            "/parameter-set/{id}",
            delete(parameter_set::delete_parameter_set),
        )
        .route(
            "/parameter-set/job-type/{job_type}",
            get(parameter_set::list_parameter_sets),
        )
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
