//! Bitwarden source loader

use crate::adapters::bitwarden::VaultClient;
use crate::config::secret::secret_string;
use crate::config::BitwardenEnvs;
use crate::core::environment::Environment;
use crate::domain::{LoadError, Secrets};

/// Fetches vault item fields, isolating per-item failures
///
/// The caller owns the client session: it is acquired once per source load and
/// closed on every exit path (see [`crate::core::loaders::load_env_source`]).
pub async fn load_bitwarden_envs(
    envs: &BitwardenEnvs,
    env: &dyn Environment,
    client: &dyn VaultClient,
) -> (Secrets, Vec<LoadError>) {
    let mut secrets = Secrets::new();
    let mut errors = Vec::new();

    for (name, reference) in envs.items.iter() {
        if !envs.overwrite && env.contains(name.as_str()) {
            continue;
        }

        match client
            .get_field(reference.item_id(), reference.field_id())
            .await
        {
            Ok(value) => {
                env.set(name.as_str(), &value);
                secrets.insert(name.clone(), secret_string(value));
            }
            Err(e) => errors.push(LoadError::Bitwarden(e.to_string())),
        }
    }

    (secrets, errors)
}
