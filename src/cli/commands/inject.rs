//! Inject command implementation
//!
//! Resolves the config chain into the process environment, then spawns the
//! target command so it inherits the augmented environment. Any aggregated
//! load error aborts before spawning, listing every individual error.

use super::ConfigSelector;
use crate::core::environment::ProcessEnvironment;
use crate::core::resolve::load_secrets;
use clap::Args;

/// Arguments for the inject command
#[derive(Args, Debug)]
pub struct InjectArgs {
    #[command(flatten)]
    pub config: ConfigSelector,

    /// Command to execute
    #[arg(value_name = "COMMAND")]
    pub command: String,

    /// Arguments passed to the command
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl InjectArgs {
    /// Execute the inject command
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

        tracing::info!(
            count = secrets.len(),
            command = %self.command,
            "Spawning command with injected environment"
        );

        let status = tokio::process::Command::new(&self.command)
            .args(&self.args)
            .status()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to run command {}: {e}", self.command))?;

        Ok(status.code().unwrap_or(1))
    }
}
