//! Google Cloud Secret Manager source loader

use crate::adapters::google::SecretManagerClient;
use crate::config::secret::secret_string;
use crate::config::GoogleCloudSecretManagerEnvs;
use crate::core::environment::Environment;
use crate::domain::{EnvName, LoadError, Secrets};
use futures::future::join_all;

/// Items still needing resolution under the source's overwrite policy
///
/// The filter runs before any client exists, so a source whose keys are all
/// present with overwrite disabled never requires credentials.
pub fn pending_secret_items(
    envs: &GoogleCloudSecretManagerEnvs,
    env: &dyn Environment,
) -> Vec<(EnvName, String)> {
    envs.secret_items()
        .into_iter()
        .filter(|(name, _)| envs.overwrite || !env.contains(name.as_str()))
        .collect()
}

/// Fetches the given items concurrently, isolating per-item failures
///
/// All fetches run as one fan-out; each resolved value is written into the
/// environment immediately, not batched at the end. A failed fetch yields one
/// error for that key and never cancels its siblings.
pub async fn load_google_cloud_envs(
    items: Vec<(EnvName, String)>,
    env: &dyn Environment,
    client: &dyn SecretManagerClient,
) -> (Secrets, Vec<LoadError>) {
    let fetches = items
        .into_iter()
        .map(|(name, resource_name)| access_secret_version(env, client, name, resource_name));

    let mut secrets = Secrets::new();
    let mut errors = Vec::new();

    for result in join_all(fetches).await {
        match result {
            Ok((name, value)) => secrets.insert(name, secret_string(value)),
            Err(error) => errors.push(error),
        }
    }

    (secrets, errors)
}

async fn access_secret_version(
    env: &dyn Environment,
    client: &dyn SecretManagerClient,
    name: EnvName,
    resource_name: String,
) -> Result<(EnvName, String), LoadError> {
    match client.access_secret_version(&resource_name).await {
        Ok(value) => {
            env.set(name.as_str(), &value);
            Ok((name, value))
        }
        Err(e) => Err(LoadError::SecretManager {
            name,
            message: e.to_string(),
        }),
    }
}
