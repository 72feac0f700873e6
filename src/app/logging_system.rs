use super::config::LogLevel;
use thiserror::Error;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log directive '{directive}': {reason}")]
    InvalidDirective { directive: String, reason: String },
    #[error("Failed to create EnvFilter with '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },
    #[error("Failed to set global tracing subscriber: {0}")]
    AlreadyInitialized(String),
}

/// Builds the tracing filter for the binary and installs the subscriber.
pub struct LoggingSystem {
    directives: Vec<Directive>,
    default_level: LogLevel,
}

impl LoggingSystem {
    pub fn new(default_level: LogLevel) -> Self {
        Self {
            directives: Vec::new(),
            default_level,
        }
    }

    pub fn add_directive(&mut self, directive: &str) -> Result<(), LoggingError> {
        let parsed = directive
            .parse::<Directive>()
            .map_err(|e| LoggingError::InvalidDirective {
                directive: directive.to_string(),
                reason: e.to_string(),
            })?;
        self.directives.push(parsed);
        Ok(())
    }

    /// HTTP stack crates are chatty at debug level.
    pub fn add_default_directives(&mut self) -> Result<(), LoggingError> {
        for directive in ["hyper=warn", "hyper_util=warn", "reqwest=warn", "h2=warn"] {
            self.add_directive(directive)?;
        }
        Ok(())
    }

    pub fn build_filter_string(&self) -> String {
        let mut filter_parts = Vec::with_capacity(self.directives.len() + 1);

        // Default level first
        filter_parts.push(self.default_level.as_str().to_string());

        for directive in &self.directives {
            filter_parts.push(directive.to_string());
        }

        filter_parts.join(",")
    }

    /// `RUST_LOG` wins over the configured level when it is set.
    pub fn initialize_tracing(&self) -> Result<(), LoggingError> {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => {
                let filter_string = self.build_filter_string();
                EnvFilter::try_new(&filter_string).map_err(|e| LoggingError::InvalidFilter {
                    filter: filter_string.clone(),
                    reason: e.to_string(),
                })?
            }
        };

        let subscriber = tracing_subscriber::registry().with(env_filter).with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_ansi(true)
                .compact(),
        );

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
    }
}

pub fn setup_logging_safe(level: LogLevel) -> Result<(), LoggingError> {
    let mut system = LoggingSystem::new(level);
    system.add_default_directives()?;
    system.initialize_tracing()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_starts_with_default_level() {
        let system = LoggingSystem::new(LogLevel::Debug);
        assert_eq!(system.build_filter_string(), "debug");
    }

    #[test]
    fn default_directives_quiet_http_stack() {
        let mut system = LoggingSystem::new(LogLevel::Info);
        system.add_default_directives().unwrap();

        let filter = system.build_filter_string();
        assert!(filter.starts_with("info,"));
        assert!(filter.contains("reqwest=warn"));
        assert!(filter.contains("hyper=warn"));
    }

    #[test]
    fn rejects_malformed_directive() {
        let mut system = LoggingSystem::new(LogLevel::Info);
        let err = system.add_directive("reqwest=loud").unwrap_err();
        assert!(matches!(err, LoggingError::InvalidDirective { .. }));
        assert_eq!(system.build_filter_string(), "info");
    }
}
