use super::{ConfigError, LogLevel, ReportMode};
use crate::sender::{
    DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_MS, SubmitterConfig,
    default_user_agent,
};
use clap::parser::ValueSource;
use clap::{ArgMatches, Args, CommandFactory, FromArgMatches, Parser};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Args, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Logging endpoint URL
    #[arg(long, env = "LOG_SUBMITTER_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Request timeout in milliseconds
    #[arg(long, env = "LOG_SUBMITTER_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Connection timeout in milliseconds
    #[arg(
        long,
        env = "LOG_SUBMITTER_CONNECT_TIMEOUT_MS",
        default_value_t = DEFAULT_CONNECT_TIMEOUT_MS
    )]
    pub connection_timeout_ms: u64,

    /// User-Agent header sent with every request
    #[arg(long, env = "LOG_SUBMITTER_USER_AGENT", default_value_t = default_user_agent())]
    pub user_agent: String,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info", ignore_case = true)]
    pub log_level: LogLevel,

    /// How to report the submission outcome
    #[arg(long, env = "LOG_SUBMITTER_REPORT", default_value = "lines")]
    pub report: ReportMode,

    /// Configuration file path (optional)
    #[arg(long, env = "LOG_SUBMITTER_CONFIG")]
    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            connection_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            user_agent: default_user_agent(),
            log_level: LogLevel::Info,
            report: ReportMode::Lines,
            config_file: None,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Layers the config file (if any) under values given on the command line
    /// or in the environment, then validates the result.
    ///
    /// `is_unset` reports whether a field (by its argument id) was left at its
    /// built-in default; only those fields take the file's value.
    pub fn resolve(mut self, is_unset: impl Fn(&str) -> bool) -> Result<Self, ConfigError> {
        if let Some(path) = self.config_file.clone() {
            let file = Self::from_file(&path)?;

            if is_unset("endpoint") {
                self.endpoint = file.endpoint;
            }
            if is_unset("timeout_ms") {
                self.timeout_ms = file.timeout_ms;
            }
            if is_unset("connection_timeout_ms") {
                self.connection_timeout_ms = file.connection_timeout_ms;
            }
            if is_unset("user_agent") {
                self.user_agent = file.user_agent;
            }
            if is_unset("log_level") {
                self.log_level = file.log_level;
            }
            if is_unset("report") {
                self.report = file.report;
            }
        }

        self.validate()?;
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_millis(self.connection_timeout_ms)
    }

    pub fn to_submitter_config(&self) -> SubmitterConfig {
        SubmitterConfig {
            endpoint: self.endpoint.clone(),
            timeout: self.timeout(),
            connection_timeout: self.connection_timeout(),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Command line for the `log-submitter` binary: settings plus one entry.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "log-submitter",
    author,
    version,
    about = "Send one log entry to the logging endpoint",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    /// Stack the entry comes from (e.g. backend, frontend)
    pub stack: String,

    /// Severity level (e.g. debug, info, warn, error, fatal)
    pub level: String,

    /// Package or component that produced the entry
    pub package: String,

    /// Free-text message, sent unchanged
    pub message: String,
}

impl Cli {
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Cli::command().try_get_matches_from(args)?;
        let mut cli = Cli::from_arg_matches(&matches)?;
        cli.config = cli.config.resolve(|id| left_at_default(&matches, id))?;
        Ok(cli)
    }
}

/// True unless the value came from the command line or the environment.
fn left_at_default(matches: &ArgMatches, id: &str) -> bool {
    !matches!(
        matches.value_source(id),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}
