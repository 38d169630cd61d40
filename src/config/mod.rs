//! Configuration management for envix
//!
//! The same logical schema is accepted in TOML, YAML and JSON, selected by
//! file extension. A config document is versioned (pinned to 1), may include
//! other config files, and carries an ordered list of env sources.
//!
//! # Example Configuration
//!
//! ```toml
//! [envix]
//! version = 1
//!
//! includes = ["../shared/envix.toml"]
//!
//! [[envs]]
//! type = "Raw"
//! [envs.items]
//! APP_ENV = "production"
//!
//! [[envs]]
//! type = "GoogleCloudSecretManager"
//! project_id = "my-project"
//! [envs.items]
//! DB_PASSWORD = "secrets/db_password/versions/latest"
//! ```

pub mod loader;
pub mod paths;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{discover_config_file, load_config, DEFAULT_CONFIG_FILENAMES};
pub use paths::{collect_config_paths, list_registered_configs, registered_config_path};
pub use schema::{
    BitwardenEnvs, EnvSource, EnvixConfig, FileEnvs, GoogleCloudSecretManagerEnvs, Items,
    LocalEnvs, LocalItems, RawEnvs, SecretRef, SecretVersion, VaultRef,
};
pub use secret::{secret_string, SecretString, SecretValue};
