//! External service integrations
//!
//! Each secret backend sits behind an async trait so the env-source loaders
//! can be exercised against in-memory fakes.

pub mod bitwarden;
pub mod google;
