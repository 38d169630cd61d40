//! Registered config locations and path collection
//!
//! Registered configs live in a fixed per-user directory as one YAML file per
//! name (`config/envix_<name>.yml`). The directory is overridable through
//! `ENVIX_CONFIG_DIR`, falling back to `$XDG_CONFIG_HOME/envix` and then to
//! `~/.config/envix`.

use crate::config::loader::discover_config_file;
use crate::domain::errors::EnvixError;
use crate::domain::result::Result;
use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the user config directory
pub const ENVIX_CONFIG_DIR: &str = "ENVIX_CONFIG_DIR";

/// Environment variable naming the editor used by `config edit`
pub const ENVIX_EDITOR: &str = "ENVIX_EDITOR";

/// Resolves the per-user config directory
pub fn user_config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENVIX_CONFIG_DIR) {
        return Ok(PathBuf::from(dir));
    }

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("envix"));
    }

    let base = BaseDirs::new()
        .ok_or_else(|| EnvixError::Configuration("Could not determine home directory".into()))?;
    Ok(base.home_dir().join(".config").join("envix"))
}

/// Path of a registered config for the given name
///
/// Registered configs are YAML files named `envix_<name>.yml` under the
/// `config` subdirectory of the user config dir.
pub fn registered_config_path(name: &str) -> Result<PathBuf> {
    Ok(user_config_dir()?
        .join("config")
        .join(format!("envix_{name}.yml")))
}

/// Lists registered config names, sorted
pub fn list_registered_configs() -> Result<Vec<String>> {
    let dir = user_config_dir()?.join("config");
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(&dir).map_err(|e| EnvixError::Io(e.to_string()))?;
    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter_map(|filename| {
            filename
                .strip_prefix("envix_")
                .and_then(|rest| rest.strip_suffix(".yml"))
                .map(str::to_string)
        })
        .collect();
    names.sort();
    Ok(names)
}

/// Produces the ordered list of config paths to load
///
/// Registered names resolve through [`registered_config_path`], failing with
/// `ConfigNotFound` for an absent name. An explicit path is prepended. With
/// neither given, ancestor-directory discovery from `start_dir` applies.
/// Earlier paths' values are overwritten by later paths' values only where the
/// later source's overwrite flag permits.
pub fn collect_config_paths(
    primary: Option<&Path>,
    names: &[String],
    start_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    if let Some(path) = primary {
        paths.push(path.to_path_buf());
    }

    for name in names {
        let path = registered_config_path(name)?;
        if !path.exists() {
            return Err(EnvixError::ConfigNotFound(path));
        }
        paths.push(path);
    }

    if paths.is_empty() {
        let discovered = discover_config_file(start_dir)
            .ok_or_else(|| EnvixError::ConfigNotFound(start_dir.join("envix.toml")))?;
        paths.push(discovered);
    }

    Ok(paths)
}
