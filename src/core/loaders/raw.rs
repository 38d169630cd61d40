//! Raw source loader: literal values from the config

use crate::config::secret::secret_string;
use crate::config::RawEnvs;
use crate::core::environment::Environment;
use crate::domain::{LoadError, Secrets};

/// Applies literal values; total, never produces an error
pub fn load_raw_envs(envs: &RawEnvs, env: &dyn Environment) -> (Secrets, Vec<LoadError>) {
    let mut secrets = Secrets::new();

    for (name, value) in envs.items.iter() {
        if envs.overwrite || !env.contains(name.as_str()) {
            env.set(name.as_str(), value);
            secrets.insert(name.clone(), secret_string(value.clone()));
        }
    }

    (secrets, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::environment::MemoryEnvironment;

    fn raw_envs(items: &[(&str, &str)], overwrite: bool) -> RawEnvs {
        let mut map = serde_json::Map::new();
        for (name, value) in items {
            map.insert((*name).to_string(), serde_json::Value::from(*value));
        }
        let json = serde_json::json!({"items": map, "overwrite": overwrite});
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_raw_never_errors() {
        let env = MemoryEnvironment::new();
        let envs = raw_envs(&[("FOO", "1"), ("BAR", "2")], true);

        let (secrets, errors) = load_raw_envs(&envs, &env);
        assert!(errors.is_empty());
        assert_eq!(secrets.len(), 2);
        assert_eq!(env.get("FOO"), Some("1".to_string()));
        assert_eq!(env.get("BAR"), Some("2".to_string()));
    }

    #[test]
    fn test_raw_overwrite_false_skips_existing() {
        let env = MemoryEnvironment::with_vars([("KEY", "old")]);
        let envs = raw_envs(&[("KEY", "new")], false);

        let (secrets, errors) = load_raw_envs(&envs, &env);
        assert!(errors.is_empty());
        assert!(secrets.is_empty());
        assert_eq!(env.get("KEY"), Some("old".to_string()));
    }

    #[test]
    fn test_raw_overwrite_true_replaces_existing() {
        let env = MemoryEnvironment::with_vars([("KEY", "old")]);
        let envs = raw_envs(&[("KEY", "new")], true);

        let (_, errors) = load_raw_envs(&envs, &env);
        assert!(errors.is_empty());
        assert_eq!(env.get("KEY"), Some("new".to_string()));
    }
}
