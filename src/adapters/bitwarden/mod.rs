//! Bitwarden vault integration
//!
//! Items are fetched through the local `bw serve` REST API. A session is
//! acquired once per source load and released on every exit path.

pub mod client;

use async_trait::async_trait;
use thiserror::Error;

/// Bitwarden access errors
#[derive(Debug, Error)]
pub enum VaultError {
    /// The vault session could not be established
    #[error("Failed to initialize Bitwarden client: {0}")]
    SessionFailed(String),

    /// The request could not be sent
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The item does not exist or was not readable
    #[error("Failed to get Bitwarden item {item_id}: {message}")]
    ItemFailed { item_id: String, message: String },

    /// The item exists but has no field with the requested id
    #[error("Field not found: {0}")]
    FieldNotFound(String),
}

/// Session-scoped vault client
#[async_trait]
pub trait VaultClient: Send + Sync {
    /// Reads one field value from a vault item
    async fn get_field(&self, item_id: &str, field_id: &str) -> Result<String, VaultError>;

    /// Releases the session
    ///
    /// Must be called on every exit path of a source load.
    async fn close(&self);
}
