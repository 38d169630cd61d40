// Envix - Environment Variable Injection Tool
// Copyright (c) 2025 Envix Contributors
// Licensed under the MIT License

//! # Envix - Declarative Environment Variable Injection
//!
//! Envix resolves environment variables from declarative config files and
//! either injects them into a spawned command or renders them as dotenv or
//! JSON output.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Loading** versioned config files in TOML, YAML or JSON
//! - **Resolving** values from literals, files, the local environment,
//!   Google Cloud Secret Manager and Bitwarden
//! - **Injecting** resolved values into a child process environment
//! - **Exporting** resolved values as dotenv lines or a JSON object
//!
//! ## Architecture
//!
//! Envix follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (resolution, loaders, rendering)
//! - [`adapters`] - External integrations (Secret Manager, Bitwarden)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration schema, parsing and discovery
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use envix::config::load_config;
//! use envix::core::{resolve_config, ProcessEnvironment};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("envix.toml")?;
//!
//!     let env = ProcessEnvironment;
//!     let (secrets, errors) = resolve_config(&config, ".".as_ref(), &env).await?;
//!
//!     for error in &errors {
//!         eprintln!("{error}");
//!     }
//!     println!("Resolved {} variables", secrets.len());
//!     Ok(())
//! }
//! ```
//!
//! Sources apply in declaration order and write into the environment as they
//! resolve, so later sources observe the values of earlier ones. A source
//! with `overwrite = false` leaves already-set variables untouched.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
