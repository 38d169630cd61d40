//! REST client for the Secret Manager `:access` endpoint

use super::{SecretManagerClient, SecretManagerError};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;

const DEFAULT_ENDPOINT: &str = "https://secretmanager.googleapis.com";
const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// Environment variable supplying an OAuth2 access token directly
pub const GOOGLE_OAUTH_ACCESS_TOKEN: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

#[derive(Debug, Deserialize)]
struct AccessSecretVersionResponse {
    payload: SecretPayload,
}

#[derive(Debug, Deserialize)]
struct SecretPayload {
    data: String,
}

#[derive(Debug, Deserialize)]
struct MetadataTokenResponse {
    access_token: String,
}

/// Secret Manager client backed by the REST API
pub struct SecretManagerRestClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl SecretManagerRestClient {
    /// Creates a client with an explicit access token
    pub fn new(access_token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_token,
        }
    }

    /// Overrides the API endpoint (used by tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Creates a client from ambient credentials
    ///
    /// Tries `GOOGLE_OAUTH_ACCESS_TOKEN` first, then the GCE metadata server.
    pub async fn from_env() -> Result<Self, SecretManagerError> {
        if let Ok(token) = std::env::var(GOOGLE_OAUTH_ACCESS_TOKEN) {
            return Ok(Self::new(token));
        }

        let http = reqwest::Client::new();
        let response = http
            .get(METADATA_TOKEN_URL)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| {
                SecretManagerError::AuthenticationFailed(format!(
                    "No access token in {GOOGLE_OAUTH_ACCESS_TOKEN} and metadata server unreachable: {e}"
                ))
            })?;

        if !response.status().is_success() {
            return Err(SecretManagerError::AuthenticationFailed(format!(
                "Metadata server returned status {}",
                response.status()
            )));
        }

        let token: MetadataTokenResponse = response
            .json()
            .await
            .map_err(|e| SecretManagerError::AuthenticationFailed(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_token: token.access_token,
        })
    }
}

#[async_trait]
impl SecretManagerClient for SecretManagerRestClient {
    async fn access_secret_version(&self, name: &str) -> Result<String, SecretManagerError> {
        let url = format!("{}/v1/{}:access", self.endpoint, name);

        tracing::debug!(secret = %name, "Accessing secret version");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| SecretManagerError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SecretManagerError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: AccessSecretVersionResponse = response
            .json()
            .await
            .map_err(|e| SecretManagerError::InvalidResponse(e.to_string()))?;

        let decoded = BASE64
            .decode(body.payload.data.as_bytes())
            .map_err(|e| SecretManagerError::InvalidResponse(format!("Invalid base64: {e}")))?;

        String::from_utf8(decoded)
            .map_err(|e| SecretManagerError::InvalidResponse(format!("Invalid UTF-8: {e}")))
    }
}
