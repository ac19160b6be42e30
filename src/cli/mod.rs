//! Command-line entry point: parse arguments, load configuration, start
//! logging, then dispatch to `serve` or `migrate`.

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use clap::Parser;

use crate::config::Settings;
use crate::logger::init_logger;

/// Loads the configuration selected by the CLI and applies its overrides.
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<Settings> {
    let merger = ConfigurationMerger::from_cli(cli)
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;
    merger
        .merge_cli_args(cli)
        .map_err(|e| anyhow::anyhow!("Configuration merge error: {}", e))
}

pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let logger_config = settings.logger.clone().into_logger_config()?;
    init_logger(logger_config)?;
    Ok(())
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_and_merge_config(&cli)?;
    init_logger_from_settings(&settings)?;

    execute_command(&cli, settings).await.inspect_err(|e| {
        tracing::error!(error = %e, "Command failed");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_logger_settings_surface_as_error() {
        let mut settings = Settings::default();
        settings.logger.level = "todo_rs=loud".to_string();

        let err = init_logger_from_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("logger"), "{err}");
    }
}
