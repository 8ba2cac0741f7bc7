//! Parameter set management endpoints

use crate::ControlClient;
use crate::error::Result;
use rudder_core::domain::parameter::ParameterSet;
use rudder_core::dto::parameter::{CreateParameterSet, UpdateParameterSet};
use uuid::Uuid;

impl ControlClient {
    // =============================================================================
    // Parameter Set Management
    // =============================================================================

    /// Store a new parameter set
    pub async fn create_parameter_set(&self, req: CreateParameterSet) -> Result<ParameterSet> {
        let url = format!("{}/parameter-set", self.base_url);
        tracing::debug!("POST {}", url);
        let response = self.client.post(&url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Get a parameter set by ID
    pub async fn get_parameter_set(&self, id: Uuid) -> Result<ParameterSet> {
        let url = format!("{}/parameter-set/{}", self.base_url, id);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// List parameter sets for a job type
    pub async fn list_parameter_sets(&self, job_type: &str) -> Result<Vec<ParameterSet>> {
        let url = format!("{}/parameter-set/job-type/{}", self.base_url, job_type);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Update a parameter set under optimistic locking
    ///
    /// `req.version` must be the version last read; a concurrent modification
    /// surfaces as a 409 (`ClientError::is_conflict`).
    pub async fn update_parameter_set(
        &self,
        id: Uuid,
        req: UpdateParameterSet,
    ) -> Result<ParameterSet> {
        let url = format!("{}/parameter-set/{}", self.base_url, id);
        tracing::debug!("PUT {}", url);
        let response = self.client.put(&url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Delete a parameter set
    pub async fn delete_parameter_set(&self, id: Uuid) -> Result<()> {
        let url = format!("{}/parameter-set/{}", self.base_url, id);
        tracing::debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;

        self.handle_empty_response(response).await
    }
}
