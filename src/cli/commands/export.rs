//! Export command implementation
//!
//! Resolves the config chain and renders the aggregated values as dotenv
//! lines or JSON, to stdout or a file. Load errors abort before rendering.

use super::ConfigSelector;
use crate::core::environment::ProcessEnvironment;
use crate::core::render::{render_dotenv, render_json};
use crate::core::resolve::load_secrets;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Output shape for the export command
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    /// `NAME=value` lines, shell-quoted where needed
    #[default]
    Dotenv,

    /// Flat `{name: value}` JSON object
    Json,
}

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub config: ConfigSelector,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Dotenv)]
    pub format: OutputFormat,

    /// Output file path (stdout when omitted)
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let paths = match self.config.collect() {
            Ok(paths) => paths,
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(2);
            }
        };

        let env = ProcessEnvironment;
        let (secrets, errors) = match load_secrets(&paths, &env).await {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(2);
            }
        };

        if !errors.is_empty() {
            eprintln!("Error: {}", crate::domain::EnvixError::from(errors));
            return Ok(1);
        }

        let rendered = match self.format {
            OutputFormat::Dotenv => render_dotenv(&secrets),
            OutputFormat::Json => render_json(&secrets)?,
        };

        match &self.output_file {
            Some(path) => {
                std::fs::write(path, rendered).map_err(|e| {
                    anyhow::anyhow!("Failed to write output file {}: {e}", path.display())
                })?;
                tracing::info!(path = %path.display(), count = secrets.len(), "Exported");
            }
            None => print!("{rendered}"),
        }

        Ok(0)
    }
}
