//! Core domain types for envix
//!
//! This module contains the error taxonomy, the validated environment-variable
//! name type and the ordered secrets mapping shared by the resolver, the
//! loaders and the CLI.

pub mod envname;
pub mod errors;
pub mod result;
pub mod secrets;

pub use envname::EnvName;
pub use errors::{EnvixError, LoadError};
pub use result::Result;
pub use secrets::Secrets;
