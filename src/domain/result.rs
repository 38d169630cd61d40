//! Result type alias used throughout envix

use crate::domain::errors::EnvixError;

/// Convenience alias for `Result<T, EnvixError>`
pub type Result<T> = std::result::Result<T, EnvixError>;
