use crate::domain::SubmitError;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Default logging endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost/evaluation-service/logs";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;

pub fn default_user_agent() -> String {
    format!("log-submitter/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone)]
pub struct SubmitterConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub connection_timeout: Duration,
    pub user_agent: String,
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            connection_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            user_agent: default_user_agent(),
        }
    }
}

impl SubmitterConfig {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}

pub(crate) fn build_client(config: &SubmitterConfig) -> Result<Client, SubmitError> {
    ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(config.connection_timeout)
        .user_agent(&config.user_agent)
        .build()
        .map_err(|e| SubmitError::Client(e.to_string()))
}
