//! Config file loading with per-extension parsing
//!
//! A config file is parsed according to its suffix (`.toml`, `.yaml`/`.yml`,
//! `.json`) into the same logical schema, then validated. When no explicit
//! path is given, the current directory and its ancestors are searched for a
//! default config filename.

use super::schema::EnvixConfig;
use crate::domain::errors::EnvixError;
use crate::domain::result::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Default filenames searched during discovery, in priority order
pub const DEFAULT_CONFIG_FILENAMES: [&str; 4] =
    ["envix.toml", "envix.yml", "envix.yaml", "envix.json"];

/// Loads and validates a config file
///
/// # Errors
///
/// Returns `ConfigNotFound` if the path does not exist, `UnsupportedExtension`
/// if the suffix is not one of `.toml`/`.yaml`/`.yml`/`.json`, and `Parse` if
/// the content fails to parse or validate.
pub fn load_config(path: impl AsRef<Path>) -> Result<EnvixConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(EnvixError::ConfigNotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path).map_err(|e| EnvixError::Parse {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {e}"),
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    let config: EnvixConfig = match extension {
        "toml" => toml::from_str(&contents).map_err(|e| EnvixError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?,
        "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| EnvixError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?,
        "json" => serde_json::from_str(&contents).map_err(|e| EnvixError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?,
        _ => return Err(EnvixError::UnsupportedExtension(path.to_path_buf())),
    };

    config.validate().map_err(|message| EnvixError::Parse {
        path: path.to_path_buf(),
        message,
    })?;

    Ok(config)
}

/// Searches the given directory and each ancestor for a default config file
///
/// Returns the first match, trying filenames in [`DEFAULT_CONFIG_FILENAMES`]
/// order within each directory, or `None` when no ancestor holds one.
pub fn discover_config_file(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    let mut dir = Some(start_dir.as_ref());

    while let Some(current) = dir {
        for filename in DEFAULT_CONFIG_FILENAMES {
            let candidate = current.join(filename);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        dir = current.parent();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_config(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(EnvixError::ConfigNotFound(_))));
    }

    #[test]
    fn test_load_config_unsupported_extension() {
        let file = write_config(".ini", "[envix]\nversion = 1\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(EnvixError::UnsupportedExtension(_))));
    }

    #[test]
    fn test_load_config_toml() {
        let file = write_config(
            ".toml",
            r#"
[envix]
version = 1

[[envs]]
type = "Raw"
[envs.items]
FOO = "bar"
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.envs.len(), 1);
    }

    #[test]
    fn test_load_config_yaml() {
        let file = write_config(
            ".yml",
            r#"
envix:
  version: 1
envs:
  - type: Raw
    items:
      FOO: bar
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.envs.len(), 1);
    }

    #[test]
    fn test_load_config_json() {
        let file = write_config(
            ".json",
            r#"{"envix": {"version": 1}, "envs": [{"type": "Raw", "items": {"FOO": "bar"}}]}"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.envs.len(), 1);
    }

    #[test]
    fn test_load_config_wrong_version_is_parse_error() {
        let file = write_config(".toml", "[envix]\nversion = 2\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(EnvixError::Parse { .. })));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let file = write_config(".toml", "not valid toml [");
        let result = load_config(file.path());
        assert!(matches!(result, Err(EnvixError::Parse { .. })));
    }

    #[test]
    fn test_discover_config_file_in_ancestor() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.path().join("envix.toml"), "[envix]\nversion = 1\n").unwrap();

        let found = discover_config_file(&nested).unwrap();
        assert_eq!(found, root.path().join("envix.toml"));
    }

    #[test]
    fn test_discover_config_file_prefers_toml() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("envix.yml"), "envix:\n  version: 1\n").unwrap();
        fs::write(root.path().join("envix.toml"), "[envix]\nversion = 1\n").unwrap();

        let found = discover_config_file(root.path()).unwrap();
        assert_eq!(found, root.path().join("envix.toml"));
    }

    #[test]
    fn test_discover_config_file_none() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("empty");
        fs::create_dir_all(&nested).unwrap();
        // An unrelated tempdir tree; no envix config anywhere up to /tmp's root
        // is a reasonable assumption, but keep the assertion scoped to the
        // filenames we create ourselves.
        fs::write(root.path().join("other.toml"), "").unwrap();
        let found = discover_config_file(&nested);
        if let Some(path) = found {
            assert!(!path.starts_with(root.path()));
        }
    }
}
