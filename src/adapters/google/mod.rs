//! Google Cloud Secret Manager integration
//!
//! No first-party async Secret Manager crate is carried; the `:access`
//! endpoint is a single REST call driven through reqwest.

pub mod client;

use async_trait::async_trait;
use thiserror::Error;

/// Secret Manager access errors
///
/// These errors don't expose the underlying HTTP client types.
#[derive(Debug, Error)]
pub enum SecretManagerError {
    /// No usable credentials were found
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The request could not be sent
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The API answered with a non-success status
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// The response body was not in the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Client for accessing secret versions
#[async_trait]
pub trait SecretManagerClient: Send + Sync {
    /// Fetches the payload of a secret version
    ///
    /// # Arguments
    ///
    /// * `name` - Full resource name:
    ///   `projects/<project_id>/secrets/<id>/versions/<n|latest>`
    async fn access_secret_version(&self, name: &str) -> Result<String, SecretManagerError>;
}
