//! Job type discovery endpoints

use crate::ControlClient;
use crate::error::Result;
use rudder_core::domain::registry::JobTypeDescriptor;

impl ControlClient {
    // =============================================================================
    // Job Type Discovery
    // =============================================================================

    /// List all job types registered with the control service
    pub async fn list_job_types(&self) -> Result<Vec<JobTypeDescriptor>> {
        let url = format!("{}/job-types", self.base_url);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Get one job type descriptor by name
    pub async fn get_job_type(&self, name: &str) -> Result<JobTypeDescriptor> {
        let url = format!("{}/job-types/{}", self.base_url, name);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
