use thiserror::Error;

/// Reason a log entry was not delivered.
///
/// Callers are expected to treat every variant the same way: the entry was
/// not accepted. The variants exist so the diagnostic line says something
/// useful.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Invalid endpoint URL '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Request timeout: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("HTTP error: {status} - {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        let message = describe_chain(&err);
        if err.is_timeout() {
            SubmitError::Timeout(message)
        } else if err.is_connect() {
            SubmitError::Connection(message)
        } else if err.is_builder() {
            SubmitError::Client(message)
        } else {
            SubmitError::Network(message)
        }
    }
}

/// Joins an error and all of its sources with `": "`.
///
/// reqwest's own message only names the URL; the cause (refused, DNS, TLS)
/// lives further down the chain.
pub(crate) fn describe_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
