//! Local source loader: passthrough from the existing environment

use crate::config::secret::secret_string;
use crate::config::LocalEnvs;
use crate::core::environment::Environment;
use crate::domain::{LoadError, Secrets};

/// Copies values from already-set environment variables
///
/// An unset source variable yields one `EnvironmentNotSet` error for that key;
/// other keys still resolve. Because loaders apply values immediately, a Local
/// source can read variables set by earlier sources in the same run.
pub fn load_local_envs(envs: &LocalEnvs, env: &dyn Environment) -> (Secrets, Vec<LoadError>) {
    let mut secrets = Secrets::new();
    let mut errors = Vec::new();

    for (name, envvar) in envs.items.pairs() {
        let Some(value) = env.get(&envvar) else {
            errors.push(LoadError::EnvironmentNotSet(envvar));
            continue;
        };

        if envs.overwrite || !env.contains(name.as_str()) {
            env.set(name.as_str(), &value);
            secrets.insert(name.clone(), secret_string(value));
        }
    }

    (secrets, errors)
}
