//! Execution-related API endpoints

use crate::ControlClient;
use crate::error::Result;
use rudder_core::domain::batch::BatchProgress;
use rudder_core::domain::execution::ExecutionInfo;
use uuid::Uuid;

impl ControlClient {
    // =============================================================================
    // Execution Read Model
    // =============================================================================

    /// List recent executions, newest first
    ///
    /// `limit` and `offset` page through the history; the server applies its
    /// own defaults and caps when they are omitted.
    pub async fn list_executions(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ExecutionInfo>> {
        let url = format!("{}/executions", self.base_url);
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }

        let response = request.send().await?;

        self.handle_response(response).await
    }

    /// Get aggregate execution info for a root job id
    ///
    /// The returned info carries the status of the whole continuation chain,
    /// batch progress for batch jobs, and the resolved parameter mapping.
    pub async fn get_execution(&self, job_id: Uuid) -> Result<ExecutionInfo> {
        let url = format!("{}/execution/{}", self.base_url, job_id);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Get batch progress for a job
    ///
    /// Returns `None` when the job exists but is not a batch job.
    pub async fn get_batch_progress(&self, job_id: Uuid) -> Result<Option<BatchProgress>> {
        let url = format!("{}/execution/{}/progress", self.base_url, job_id);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
