//! Rudder HTTP Client
//!
//! A simple, type-safe HTTP client for the Rudder control API.
//!
//! This crate provides the interface operator tooling uses to query
//! execution status and manage externally stored parameter sets.
//!
//! # Example
//!
//! ```no_run
//! use rudder_client::ControlClient;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), rudder_client::ClientError> {
//!     let client = ControlClient::new("http://localhost:8080");
//!
//!     let info = client.get_execution(Uuid::new_v4()).await?;
//!     println!("Chain status: {:?}", info.status);
//!     Ok(())
//! }
//! ```

pub mod error;
mod executions;
mod job_types;
mod parameter_sets;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use rudder_core::domain::execution::ExecutionInfo;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Rudder control API
///
/// Methods are organized into logical groups:
/// - Execution read model (aggregate info, batch progress)
/// - Job type discovery
/// - Parameter set management (create, get, list, update, delete)
#[derive(Debug, Clone)]
pub struct ControlClient {
    /// Base URL of the control service (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ControlClient {
    /// Create a new control client
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new control client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the control service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ControlClient::new("http://localhost:8080");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ControlClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = ControlClient::with_client("http://localhost:8080", http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
