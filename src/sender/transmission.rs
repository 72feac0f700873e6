use super::client::{SubmitterConfig, build_client};
use super::sink::{LineSink, OutcomeSink};
use super::stats::{StatsSnapshot, SubmissionStats};
use crate::domain::{LogEntry, SubmitError};
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// How a single submission settled.
#[derive(Debug)]
pub enum SubmitOutcome {
    Sent {
        status: u16,
        response: Value,
        latency: Duration,
    },
    Failed {
        error: SubmitError,
        latency: Duration,
    },
}

impl SubmitOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SubmitOutcome::Sent { .. })
    }

    pub fn response(&self) -> Option<&Value> {
        match self {
            SubmitOutcome::Sent { response, .. } => Some(response),
            SubmitOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&SubmitError> {
        match self {
            SubmitOutcome::Sent { .. } => None,
            SubmitOutcome::Failed { error, .. } => Some(error),
        }
    }

    pub fn latency(&self) -> Duration {
        match self {
            SubmitOutcome::Sent { latency, .. } | SubmitOutcome::Failed { latency, .. } => {
                *latency
            }
        }
    }
}

/// Posts log entries to the logging endpoint, one request per call.
///
/// Submissions never fail from the caller's point of view: every transport
/// or server problem comes back as `SubmitOutcome::Failed` and is handed to
/// the configured sink. There is no retry.
#[derive(Clone)]
pub struct LogSubmitter {
    client: Client,
    config: SubmitterConfig,
    sink: Arc<dyn OutcomeSink>,
    stats: Arc<SubmissionStats>,
}

impl LogSubmitter {
    pub fn new(config: SubmitterConfig) -> Result<Self, SubmitError> {
        let client = build_client(&config)?;

        Ok(Self {
            client,
            config,
            sink: Arc::new(LineSink::stderr()),
            stats: Arc::new(SubmissionStats::new()),
        })
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn OutcomeSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub async fn submit(
        &self,
        stack: &str,
        level: &str,
        package: &str,
        message: &str,
    ) -> SubmitOutcome {
        self.submit_entry(LogEntry::new(stack, level, package, message))
            .await
    }

    pub async fn submit_entry(&self, entry: LogEntry) -> SubmitOutcome {
        let start = Instant::now();

        debug!(
            endpoint = %self.config.endpoint,
            stack = %entry.stack,
            level = %entry.level,
            package = %entry.package,
            "Submitting log entry"
        );

        let outcome = match self.transmit(&entry).await {
            Ok((status, response)) => SubmitOutcome::Sent {
                status,
                response,
                latency: start.elapsed(),
            },
            Err(error) => SubmitOutcome::Failed {
                error,
                latency: start.elapsed(),
            },
        };

        debug!(
            endpoint = %self.config.endpoint,
            sent = outcome.is_sent(),
            latency_ms = outcome.latency().as_millis() as u64,
            "Log submission settled"
        );

        self.stats.record(outcome.is_sent(), outcome.latency());
        self.sink.observe(&entry, &outcome);

        outcome
    }

    async fn transmit(&self, entry: &LogEntry) -> Result<(u16, Value), SubmitError> {
        let url = self.endpoint_url()?;
        let body = entry.to_json()?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(SubmitError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        let payload = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)
                .map_err(|e| SubmitError::InvalidResponse(format!("Response is not JSON: {e}")))?
        };

        Ok((status.as_u16(), payload))
    }

    fn endpoint_url(&self) -> Result<Url, SubmitError> {
        let invalid = |reason: String| SubmitError::InvalidEndpoint {
            endpoint: self.config.endpoint.clone(),
            reason,
        };

        let url = Url::parse(&self.config.endpoint).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme '{other}'"))),
        }
    }
}

impl std::fmt::Debug for LogSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogSubmitter")
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
