//! Validate command implementation
//!
//! Loads every selected config file and its include chain, printing a
//! per-source summary. Errors that would abort resolution fail validation;
//! missing includes and cycles are reported as warnings, matching their
//! non-fatal handling at load time.

use super::ConfigSelector;
use crate::config::load_config;
use crate::core::resolve::{canonical, parent_dir};
use clap::Args;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: ConfigSelector,
}

impl ValidateArgs {
    /// Execute the validate command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let paths = match self.config.collect() {
            Ok(paths) => paths,
            Err(e) => {
                println!("❌ {e}");
                return Ok(2);
            }
        };

        for path in &paths {
            let mut chain = HashSet::new();
            chain.insert(canonical(path));
            if validate_file(path, &mut chain) != 0 {
                return Ok(2);
            }
        }

        Ok(0)
    }
}

/// Validates one file and, recursively, its includes
fn validate_file(path: &Path, chain: &mut HashSet<PathBuf>) -> i32 {
    println!("🔍 Validating config file: {}", path.display());

    let config = match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            println!("❌ {e}");
            return 2;
        }
    };

    println!("✅ Config is valid");
    for source in &config.envs {
        println!("  {} source: {} item(s)", source.kind(), source.item_count());
    }

    let base_dir = parent_dir(path);
    for include in &config.includes {
        let include_path = if include.is_absolute() {
            include.clone()
        } else {
            base_dir.join(include)
        };

        if !include_path.exists() {
            println!("⚠️  Included config not found: {}", include_path.display());
            continue;
        }

        let canonical_path = canonical(&include_path);
        if chain.contains(&canonical_path) {
            println!("⚠️  Include cycle detected: {}", include_path.display());
            continue;
        }

        chain.insert(canonical_path.clone());
        let code = validate_file(&include_path, chain);
        chain.remove(&canonical_path);
        if code != 0 {
            return code;
        }
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn args_for(path: &Path) -> ValidateArgs {
        ValidateArgs {
            config: ConfigSelector {
                config_file: Some(path.to_path_buf()),
                names: Vec::new(),
            },
        }
    }

    #[tokio::test]
    async fn test_validate_ok() {
        let dir = TempDir::new().unwrap();
        let main = write_file(
            &dir,
            "envix.toml",
            "[envix]\nversion = 1\n\n[[envs]]\ntype = \"Raw\"\n[envs.items]\nFOO = \"bar\"\n",
        );

        let code = args_for(&main).execute().await.unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_validate_bad_version() {
        let dir = TempDir::new().unwrap();
        let main = write_file(&dir, "envix.toml", "[envix]\nversion = 9\n");

        let code = args_for(&main).execute().await.unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_follows_valid_includes() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "base.toml", "[envix]\nversion = 1\n");
        let main = write_file(
            &dir,
            "envix.toml",
            "includes = [\"base.toml\"]\n\n[envix]\nversion = 1\n",
        );

        let code = args_for(&main).execute().await.unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_validate_fails_on_broken_include() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "broken.toml", "[envix]\nversion = 9\n");
        let main = write_file(
            &dir,
            "envix.toml",
            "includes = [\"broken.toml\"]\n\n[envix]\nversion = 1\n",
        );

        let code = args_for(&main).execute().await.unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_tolerates_include_cycle() {
        let dir = TempDir::new().unwrap();
        let main = write_file(
            &dir,
            "envix.toml",
            "includes = [\"envix.toml\"]\n\n[envix]\nversion = 1\n",
        );

        let code = args_for(&main).execute().await.unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_validate_tolerates_missing_include() {
        let dir = TempDir::new().unwrap();
        let main = write_file(
            &dir,
            "envix.toml",
            "includes = [\"not_exists.toml\"]\n\n[envix]\nversion = 1\n",
        );

        let code = args_for(&main).execute().await.unwrap();
        assert_eq!(code, 0);
    }
}
