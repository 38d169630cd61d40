// Envix - Environment Variable Injection Tool
// Copyright (c) 2025 Envix Contributors
// Licensed under the MIT License

use clap::Parser;
use envix::cli::{Cli, Commands};
use envix::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    let log_level = cli.log_level.as_deref().unwrap_or("info");
    if let Err(e) = init_logging(log_level) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(5);
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "envix starting");

    // Execute command and get exit code
    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Inject(args) => args.execute().await,
        Commands::Export(args) => args.execute().await,
        Commands::Validate(args) => args.execute().await,
        Commands::Config(args) => args.execute().await,
    }
}
