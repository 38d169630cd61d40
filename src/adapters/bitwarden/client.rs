//! REST client for the `bw serve` vault API

use super::{VaultClient, VaultError};
use async_trait::async_trait;
use serde::Deserialize;

const DEFAULT_SERVE_URL: &str = "http://localhost:8087";

/// Environment variable overriding the `bw serve` base URL
pub const BW_SERVE_URL: &str = "BW_SERVE_URL";

#[derive(Debug, Deserialize)]
struct StatusResponse {
    data: StatusData,
}

#[derive(Debug, Deserialize)]
struct StatusData {
    template: StatusTemplate,
}

#[derive(Debug, Deserialize)]
struct StatusTemplate {
    status: String,
}

#[derive(Debug, Deserialize)]
struct ItemResponse {
    data: ItemData,
}

#[derive(Debug, Deserialize)]
struct ItemData {
    #[serde(default)]
    fields: Vec<ItemField>,
}

#[derive(Debug, Deserialize)]
struct ItemField {
    name: String,
    value: Option<String>,
}

/// Vault client backed by a running `bw serve` instance
#[derive(Debug)]
pub struct BitwardenRestClient {
    http: reqwest::Client,
    base_url: String,
}

impl BitwardenRestClient {
    /// Connects to the vault API and verifies the vault is unlocked
    pub async fn connect() -> Result<Self, VaultError> {
        let base_url =
            std::env::var(BW_SERVE_URL).unwrap_or_else(|_| DEFAULT_SERVE_URL.to_string());
        Self::connect_to(base_url).await
    }

    /// Connects to an explicit base URL (used by tests)
    pub async fn connect_to(base_url: impl Into<String>) -> Result<Self, VaultError> {
        let base_url = base_url.into();
        let http = reqwest::Client::new();

        let response = http
            .get(format!("{base_url}/status"))
            .send()
            .await
            .map_err(|e| VaultError::SessionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(VaultError::SessionFailed(format!(
                "Vault API returned status {}",
                response.status()
            )));
        }

        let status: StatusResponse = response
            .json()
            .await
            .map_err(|e| VaultError::SessionFailed(e.to_string()))?;

        if status.data.template.status != "unlocked" {
            return Err(VaultError::SessionFailed(format!(
                "Vault is {}",
                status.data.template.status
            )));
        }

        Ok(Self { http, base_url })
    }
}

#[async_trait]
impl VaultClient for BitwardenRestClient {
    async fn get_field(&self, item_id: &str, field_id: &str) -> Result<String, VaultError> {
        tracing::debug!(item_id = %item_id, "Fetching Bitwarden item");

        let response = self
            .http
            .get(format!("{}/object/item/{item_id}", self.base_url))
            .send()
            .await
            .map_err(|e| VaultError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(VaultError::ItemFailed {
                item_id: item_id.to_string(),
                message: format!("status {status}: {message}"),
            });
        }

        let item: ItemResponse = response.json().await.map_err(|e| VaultError::ItemFailed {
            item_id: item_id.to_string(),
            message: e.to_string(),
        })?;

        item.data
            .fields
            .into_iter()
            .find(|field| field.name == field_id)
            .and_then(|field| field.value)
            .ok_or_else(|| VaultError::FieldNotFound(field_id.to_string()))
    }

    async fn close(&self) {
        // Locking on exit is best effort; the session owner is the bw serve
        // process, not this client.
        if let Err(e) = self
            .http
            .post(format!("{}/lock", self.base_url))
            .send()
            .await
        {
            tracing::debug!(error = %e, "Failed to lock vault on close");
        }
    }
}
