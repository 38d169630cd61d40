//! File source loader: values read from local files

use crate::config::secret::secret_string;
use crate::config::FileEnvs;
use crate::core::environment::Environment;
use crate::domain::{LoadError, Secrets};

/// Reads each item's file, trimming the contents
///
/// An unreadable file yields one error for that key; other keys in the same
/// source are still processed.
pub fn load_file_envs(envs: &FileEnvs, env: &dyn Environment) -> (Secrets, Vec<LoadError>) {
    let mut secrets = Secrets::new();
    let mut errors = Vec::new();

    for (name, path) in envs.items.iter() {
        if !envs.overwrite && env.contains(name.as_str()) {
            continue;
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let value = contents.trim();
                env.set(name.as_str(), value);
                secrets.insert(name.clone(), secret_string(value.to_string()));
            }
            Err(e) => errors.push(LoadError::FileLoad {
                name: name.clone(),
                path: path.clone(),
                message: e.to_string(),
            }),
        }
    }

    (secrets, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::environment::MemoryEnvironment;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_envs(items: &[(&str, &str)], overwrite: bool) -> FileEnvs {
        let mut map = serde_json::Map::new();
        for (name, path) in items {
            map.insert((*name).to_string(), serde_json::Value::from(*path));
        }
        let json = serde_json::json!({"items": map, "overwrite": overwrite});
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_file_value_trimmed() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "  secret-contents  ").unwrap();
        file.flush().unwrap();

        let env = MemoryEnvironment::new();
        let envs = file_envs(&[("TOKEN", file.path().to_str().unwrap())], true);

        let (secrets, errors) = load_file_envs(&envs, &env);
        assert!(errors.is_empty());
        assert_eq!(
            secrets.get("TOKEN").unwrap().expose_secret().as_ref(),
            "secret-contents"
        );
        assert_eq!(env.get("TOKEN"), Some("secret-contents".to_string()));
    }

    #[test]
    fn test_file_missing_isolates_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "ok").unwrap();
        file.flush().unwrap();

        let env = MemoryEnvironment::new();
        let envs = file_envs(
            &[
                ("GOOD", file.path().to_str().unwrap()),
                ("BAD", "/nonexistent/file"),
            ],
            true,
        );

        let (secrets, errors) = load_file_envs(&envs, &env);
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], LoadError::FileLoad { name, .. } if name.as_str() == "BAD"));
        assert!(secrets.contains("GOOD"));
        assert!(!secrets.contains("BAD"));
    }

    #[test]
    fn test_file_overwrite_false_skips_existing() {
        let env = MemoryEnvironment::with_vars([("TOKEN", "old")]);
        let envs = file_envs(&[("TOKEN", "/nonexistent/file")], false);

        // Skipped before the read, so no error either.
        let (secrets, errors) = load_file_envs(&envs, &env);
        assert!(errors.is_empty());
        assert!(secrets.is_empty());
        assert_eq!(env.get("TOKEN"), Some("old".to_string()));
    }
}
