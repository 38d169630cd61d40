//! Env-source loaders, one per config variant
//!
//! Every loader shares the same contract: resolve each item into a name/value
//! pair, honoring the source's overwrite flag against the already-applied
//! environment, and isolate per-item failures so one failing key never
//! suppresses its siblings. Loaders write each resolved value into the
//! environment context as soon as it resolves, so later sources in the same
//! run observe earlier sources' variables.

pub mod bitwarden;
pub mod file;
pub mod google;
pub mod local;
pub mod raw;

use crate::adapters::bitwarden::client::BitwardenRestClient;
use crate::adapters::google::client::SecretManagerRestClient;
use crate::config::EnvSource;
use crate::core::environment::Environment;
use crate::domain::{LoadError, Secrets};

pub use bitwarden::load_bitwarden_envs;
pub use file::load_file_envs;
pub use google::{load_google_cloud_envs, pending_secret_items};
pub use local::load_local_envs;
pub use raw::load_raw_envs;

/// Resolves one env source into secrets and per-item errors
///
/// Remote backends get their clients created here, one per source load; the
/// per-variant functions take the client as a trait object so tests can
/// substitute fakes.
pub async fn load_env_source(
    source: &EnvSource,
    env: &dyn Environment,
) -> (Secrets, Vec<LoadError>) {
    match source {
        EnvSource::Raw(envs) => load_raw_envs(envs, env),
        EnvSource::File(envs) => load_file_envs(envs, env),
        EnvSource::Local(envs) => load_local_envs(envs, env),
        EnvSource::GoogleCloudSecretManager(envs) => {
            // Overwrite-skipped items never resolve, so a fully-skipped source
            // must not require credentials.
            let pending = pending_secret_items(envs, env);
            if pending.is_empty() {
                (Secrets::new(), Vec::new())
            } else {
                match SecretManagerRestClient::from_env().await {
                    Ok(client) => load_google_cloud_envs(pending, env, &client).await,
                    Err(e) => {
                        // Without credentials no pending item can resolve.
                        let errors = pending
                            .into_iter()
                            .map(|(name, _)| LoadError::SecretManager {
                                name,
                                message: e.to_string(),
                            })
                            .collect();
                        (Secrets::new(), errors)
                    }
                }
            }
        }
        EnvSource::Bitwarden(envs) => match BitwardenRestClient::connect().await {
            Ok(client) => {
                use crate::adapters::bitwarden::VaultClient;
                let result = load_bitwarden_envs(envs, env, &client).await;
                client.close().await;
                result
            }
            Err(e) => (Secrets::new(), vec![LoadError::Bitwarden(e.to_string())]),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::environment::MemoryEnvironment;

    #[tokio::test]
    async fn test_secret_manager_source_fully_skipped_needs_no_credentials() {
        let env = MemoryEnvironment::with_vars([("KEY", "existing")]);
        let source: EnvSource = serde_json::from_value(serde_json::json!({
            "type": "GoogleCloudSecretManager",
            "project_id": "p",
            "items": {"KEY": "secrets/key/versions/latest"},
            "overwrite": false
        }))
        .unwrap();

        // Every item is skipped by the overwrite policy; no client is created,
        // so the absence of credentials must not surface as an error.
        let (secrets, errors) = load_env_source(&source, &env).await;
        assert!(secrets.is_empty());
        assert!(errors.is_empty());
        assert_eq!(env.get("KEY"), Some("existing".to_string()));
    }
}
