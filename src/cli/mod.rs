//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for envix using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Envix - environment variable injection tool
#[derive(Parser, Debug)]
#[command(name = "envix")]
#[command(version, about, long_about = None)]
#[command(author = "Envix Contributors")]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "ENVIX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inject environment variables and execute a command
    Inject(commands::inject::InjectArgs),

    /// Render environment variables to stdout or a file
    Export(commands::export::ExportArgs),

    /// Validate config files
    Validate(commands::validate::ValidateArgs),

    /// Operate on registered user configs
    Config(commands::config::ConfigArgs),
}
