pub mod config;
pub mod logging_system;

pub use config::{Cli, Config, ConfigError, LogLevel, ReportMode};
pub use logging_system::{LoggingError, LoggingSystem, setup_logging_safe};

use crate::sender::LogSubmitter;
use anyhow::Context;
use std::process;
use tracing::{debug, error, info};

pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Submits the entry described by `cli` and returns once it has settled.
///
/// A failed submission is reported through the configured sink and is not
/// an error here; only a submitter that cannot be built is.
pub async fn run(cli: Cli) -> anyhow::Result<bool> {
    let submitter = LogSubmitter::new(cli.config.to_submitter_config())
        .context("Failed to build log submitter")?
        .with_sink(cli.config.report.sink());

    info!(
        "Submitting {} entry from {}/{} to {}",
        cli.level,
        cli.stack,
        cli.package,
        submitter.endpoint()
    );

    let outcome = submitter
        .submit(&cli.stack, &cli.level, &cli.package, &cli.message)
        .await;

    debug!(
        sent = outcome.is_sent(),
        latency_ms = outcome.latency().as_millis() as u64,
        "Submission finished"
    );

    Ok(outcome.is_sent())
}

// Main entry point for the application
pub async fn main() -> anyhow::Result<()> {
    let cli = match Cli::from_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(ConfigError::Args(e)) => e.exit(),
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = setup_logging_safe(cli.config.log_level) {
        eprintln!("Warning: {e}, continuing without structured logging");
    }

    info!("Starting log-submitter v{}", get_version());

    if let Err(e) = run(cli).await {
        error!("Application error: {e:#}");
        return Err(e);
    }

    Ok(())
}
