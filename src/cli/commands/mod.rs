//! CLI command implementations

pub mod config;
pub mod export;
pub mod inject;
pub mod validate;

use crate::config::collect_config_paths;
use crate::domain::result::Result;
use clap::Args;
use std::path::PathBuf;

/// Shared config-selection flags
#[derive(Args, Debug, Default)]
pub struct ConfigSelector {
    /// Config file path (discovered in ancestor directories when omitted)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "ENVIX_CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Registered config name (repeatable)
    #[arg(short, long = "name", value_name = "NAME")]
    pub names: Vec<String>,
}

impl ConfigSelector {
    /// Produces the ordered config paths to load
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        let cwd = std::env::current_dir()
            .map_err(|e| crate::domain::EnvixError::Io(e.to_string()))?;
        collect_config_paths(self.config_file.as_deref(), &self.names, &cwd)
    }
}
