//! Recursive include resolution and source aggregation
//!
//! A multi-file config is a forest merged in include-then-self order,
//! depth-first, left-to-right. Missing includes are recorded as non-fatal
//! errors so sibling includes and the including file's own sources still
//! process; any other failure loading an include aborts the run. Include
//! cycles are detected against the current include chain and skipped with a
//! non-fatal error, so diamond-shaped include graphs still merge every path.

use crate::config::loader::load_config;
use crate::config::schema::EnvixConfig;
use crate::core::environment::Environment;
use crate::core::loaders::load_env_source;
use crate::domain::errors::LoadError;
use crate::domain::result::Result;
use crate::domain::Secrets;
use futures::future::{BoxFuture, FutureExt};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Loads and resolves an ordered list of config files
///
/// Paths process sequentially in collector order; a later file's sources
/// observe the environment writes of earlier files.
pub async fn load_secrets(
    paths: &[PathBuf],
    env: &dyn Environment,
) -> Result<(Secrets, Vec<LoadError>)> {
    let mut secrets = Secrets::new();
    let mut errors = Vec::new();

    for path in paths {
        tracing::debug!(path = %path.display(), "Loading config file");
        let config = load_config(path)?;
        let base_dir = parent_dir(path);

        let mut chain = HashSet::new();
        chain.insert(canonical(path));
        resolve_into(&config, &base_dir, env, &mut chain, &mut secrets, &mut errors).await?;
    }

    Ok((secrets, errors))
}

/// Resolves one parsed config document against a base directory
pub async fn resolve_config(
    config: &EnvixConfig,
    base_dir: &Path,
    env: &dyn Environment,
) -> Result<(Secrets, Vec<LoadError>)> {
    let mut secrets = Secrets::new();
    let mut errors = Vec::new();
    let mut chain = HashSet::new();
    resolve_into(config, base_dir, env, &mut chain, &mut secrets, &mut errors).await?;
    Ok((secrets, errors))
}

fn resolve_into<'a>(
    config: &'a EnvixConfig,
    base_dir: &'a Path,
    env: &'a dyn Environment,
    chain: &'a mut HashSet<PathBuf>,
    secrets: &'a mut Secrets,
    errors: &'a mut Vec<LoadError>,
) -> BoxFuture<'a, Result<()>> {
    async move {
        for include in &config.includes {
            let include_path = if include.is_absolute() {
                include.clone()
            } else {
                base_dir.join(include)
            };

            if !include_path.exists() {
                tracing::warn!(path = %include_path.display(), "Included config not found");
                errors.push(LoadError::IncludeNotFound(include_path));
                continue;
            }

            let canonical_path = canonical(&include_path);
            if chain.contains(&canonical_path) {
                tracing::warn!(path = %include_path.display(), "Include cycle detected");
                errors.push(LoadError::IncludeCycle(include_path));
                continue;
            }

            let child = load_config(&include_path)?;
            let child_dir = parent_dir(&include_path);

            chain.insert(canonical_path.clone());
            resolve_into(&child, &child_dir, env, chain, secrets, errors).await?;
            chain.remove(&canonical_path);
        }

        for source in &config.envs {
            let (source_secrets, source_errors) = load_env_source(source, env).await;
            secrets.extend(source_secrets);
            errors.extend(source_errors);
        }

        Ok(())
    }
    .boxed()
}

pub(crate) fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

pub(crate) fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::environment::MemoryEnvironment;
    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    fn write_yaml(dir: &Path, filename: &str, contents: &str) -> PathBuf {
        let path = dir.join(filename);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_includes_merge_before_own_sources() {
        let dir = TempDir::new().unwrap();
        write_yaml(
            dir.path(),
            "shared.yml",
            r#"
envix:
  version: 1
envs:
  - type: Raw
    items:
      SHARED: from-include
      KEY: include-value
"#,
        );
        let main = write_yaml(
            dir.path(),
            "envix.yml",
            r#"
envix:
  version: 1
includes:
  - shared.yml
envs:
  - type: Raw
    items:
      KEY: own-value
"#,
        );

        let env = MemoryEnvironment::new();
        let (secrets, errors) = load_secrets(&[main], &env).await.unwrap();

        assert!(errors.is_empty());
        assert_eq!(
            secrets.get("SHARED").unwrap().expose_secret().as_ref(),
            "from-include"
        );
        // Own sources come after includes, so they win.
        assert_eq!(
            secrets.get("KEY").unwrap().expose_secret().as_ref(),
            "own-value"
        );
    }

    #[tokio::test]
    async fn test_missing_include_is_non_fatal() {
        let dir = TempDir::new().unwrap();
        let main = write_yaml(
            dir.path(),
            "envix.yml",
            r#"
envix:
  version: 1
includes:
  - not_exists.yml
envs:
  - type: Raw
    items:
      OWN: value
"#,
        );

        let env = MemoryEnvironment::new();
        let (secrets, errors) = load_secrets(&[main], &env).await.unwrap();

        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], LoadError::IncludeNotFound(_)));
        assert_eq!(secrets.get("OWN").unwrap().expose_secret().as_ref(), "value");
    }

    #[tokio::test]
    async fn test_self_include_cycle_detected() {
        let dir = TempDir::new().unwrap();
        let main = write_yaml(
            dir.path(),
            "envix.yml",
            r#"
envix:
  version: 1
includes:
  - envix.yml
envs:
  - type: Raw
    items:
      OWN: value
"#,
        );

        let env = MemoryEnvironment::new();
        let (secrets, errors) = load_secrets(&[main], &env).await.unwrap();

        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], LoadError::IncludeCycle(_)));
        assert!(secrets.contains("OWN"));
    }

    #[tokio::test]
    async fn test_mutual_include_cycle_detected() {
        let dir = TempDir::new().unwrap();
        write_yaml(
            dir.path(),
            "a.yml",
            r#"
envix:
  version: 1
includes:
  - b.yml
envs:
  - type: Raw
    items:
      FROM_A: a
"#,
        );
        let b = write_yaml(
            dir.path(),
            "b.yml",
            r#"
envix:
  version: 1
includes:
  - a.yml
envs:
  - type: Raw
    items:
      FROM_B: b
"#,
        );

        let env = MemoryEnvironment::new();
        let (secrets, errors) = load_secrets(&[b], &env).await.unwrap();

        assert!(secrets.contains("FROM_A"));
        assert!(secrets.contains("FROM_B"));
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], LoadError::IncludeCycle(_)));
    }

    #[tokio::test]
    async fn test_include_parse_error_aborts() {
        let dir = TempDir::new().unwrap();
        write_yaml(dir.path(), "broken.yml", "envix:\n  version: 2\n");
        let main = write_yaml(
            dir.path(),
            "envix.yml",
            r#"
envix:
  version: 1
includes:
  - broken.yml
"#,
        );

        let env = MemoryEnvironment::new();
        let result = load_secrets(&[main], &env).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_merge_order_across_sources_with_overwrite_flags() {
        let dir = TempDir::new().unwrap();
        let main = write_yaml(
            dir.path(),
            "envix.yml",
            r#"
envix:
  version: 1
envs:
  - type: Raw
    items:
      KEY: first
  - type: Raw
    overwrite: false
    items:
      KEY: second
  - type: Raw
    items:
      KEY: third
"#,
        );

        let env = MemoryEnvironment::new();
        let (secrets, errors) = load_secrets(&[main], &env).await.unwrap();

        assert!(errors.is_empty());
        // overwrite=false skips the set key; the final overwriting source wins
        // in both the environment and the returned snapshot.
        assert_eq!(secrets.get("KEY").unwrap().expose_secret().as_ref(), "third");
        assert_eq!(env.get("KEY"), Some("third".to_string()));
    }

    #[tokio::test]
    async fn test_local_source_observes_earlier_raw_source() {
        let dir = TempDir::new().unwrap();
        let main = write_yaml(
            dir.path(),
            "envix.yml",
            r#"
envix:
  version: 1
envs:
  - type: Raw
    items:
      BASE: seeded
  - type: Local
    items:
      COPIED: $BASE
"#,
        );

        let env = MemoryEnvironment::new();
        let (secrets, errors) = load_secrets(&[main], &env).await.unwrap();

        assert!(errors.is_empty());
        assert_eq!(
            secrets.get("COPIED").unwrap().expose_secret().as_ref(),
            "seeded"
        );
    }

    #[tokio::test]
    async fn test_two_config_paths_merge_in_order() {
        let dir = TempDir::new().unwrap();
        let first = write_yaml(
            dir.path(),
            "first.yml",
            r#"
envix:
  version: 1
envs:
  - type: Raw
    items:
      A: "1"
"#,
        );
        let second = write_yaml(
            dir.path(),
            "second.yml",
            r#"
envix:
  version: 1
envs:
  - type: Raw
    items:
      B: "2"
"#,
        );

        let env = MemoryEnvironment::new();
        let (secrets, errors) = load_secrets(&[first, second], &env).await.unwrap();

        assert!(errors.is_empty());
        let names: Vec<&str> = secrets.names().map(|n| n.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }
}
