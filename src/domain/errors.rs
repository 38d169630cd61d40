//! Domain error types
//!
//! Two error families exist: configuration errors ([`EnvixError`]) abort the
//! whole command immediately, while per-item injection errors ([`LoadError`])
//! are collected during resolution and surfaced together once every source has
//! been attempted. None of the variants expose third-party types.

use crate::domain::EnvName;
use std::path::PathBuf;
use thiserror::Error;

/// Main envix error type
#[derive(Debug, Error)]
pub enum EnvixError {
    /// Config file does not exist (explicit path, registered name or discovery)
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Config file suffix is not one of .toml/.yaml/.yml/.json
    #[error("Unsupported config file format: {}", .0.display())]
    UnsupportedExtension(PathBuf),

    /// Config file failed to parse or validate
    #[error("Failed to parse config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Other configuration-level failures
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// One or more environment variables failed to load
    #[error("{0}")]
    Injection(InjectionErrors),

    /// Serialization/deserialization errors outside config parsing
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors outside config parsing
    #[error("I/O error: {0}")]
    Io(String),
}

/// Aggregate of every per-item error collected during one resolution pass
#[derive(Debug)]
pub struct InjectionErrors(pub Vec<LoadError>);

impl std::fmt::Display for InjectionErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl From<Vec<LoadError>> for EnvixError {
    fn from(errors: Vec<LoadError>) -> Self {
        EnvixError::Injection(InjectionErrors(errors))
    }
}

/// Per-item injection error
///
/// One failing key never suppresses sibling keys; these are collected and
/// reported together.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A Local source referenced an environment variable that is not set
    #[error("Environment variable not set: {0}")]
    EnvironmentNotSet(String),

    /// A File source item could not be read
    #[error("Failed to read {} for {name}: {message}", path.display())]
    FileLoad {
        name: EnvName,
        path: PathBuf,
        message: String,
    },

    /// A Google Cloud Secret Manager fetch failed for one item
    #[error("Google Cloud Secret Manager error: {name}, {message}")]
    SecretManager { name: EnvName, message: String },

    /// A Bitwarden fetch or session failure
    #[error("Bitwarden error: {0}")]
    Bitwarden(String),

    /// An include path did not exist (non-fatal, siblings still processed)
    #[error("Config file not found: {}", .0.display())]
    IncludeNotFound(PathBuf),

    /// An include chain revisited a file (non-fatal, include skipped)
    #[error("Include cycle detected: {}", .0.display())]
    IncludeCycle(PathBuf),
}
