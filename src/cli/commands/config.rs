//! Config command implementation
//!
//! Manages registered per-user configs under the envix config directory.

use crate::config::paths::{list_registered_configs, registered_config_path, ENVIX_EDITOR};
use clap::{Args, Subcommand};

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// List registered config names
    List,

    /// Open a registered config in an editor, creating it if absent
    Edit {
        /// Registered config name
        name: String,
    },
}

impl ConfigArgs {
    /// Execute the config command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        match &self.command {
            ConfigCommands::List => {
                let names = match list_registered_configs() {
                    Ok(names) => names,
                    Err(e) => {
                        eprintln!("Error: {e}");
                        return Ok(2);
                    }
                };
                for name in names {
                    println!("{name}");
                }
                Ok(0)
            }
            ConfigCommands::Edit { name } => {
                let path = match registered_config_path(name) {
                    Ok(path) => path,
                    Err(e) => {
                        eprintln!("Error: {e}");
                        return Ok(2);
                    }
                };

                if !path.exists() {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent).map_err(|e| {
                            anyhow::anyhow!(
                                "Failed to create config directory {}: {e}",
                                parent.display()
                            )
                        })?;
                    }
                    std::fs::write(&path, "envix:\n  version: 1\nenvs: []\n").map_err(|e| {
                        anyhow::anyhow!("Failed to create {}: {e}", path.display())
                    })?;
                    tracing::info!(path = %path.display(), "Created registered config");
                }

                let editor = std::env::var(ENVIX_EDITOR)
                    .or_else(|_| std::env::var("EDITOR"))
                    .unwrap_or_else(|_| "vim".to_string());

                let status = tokio::process::Command::new(&editor)
                    .arg(&path)
                    .status()
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to run editor {editor}: {e}"))?;

                Ok(status.code().unwrap_or(1))
            }
        }
    }
}
