pub mod client;
pub mod sink;
pub mod stats;
pub mod transmission;

pub use client::{
    DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_MS, SubmitterConfig,
    default_user_agent,
};
pub use sink::{FAILED_LABEL, LineSink, NoopSink, OutcomeSink, SENT_LABEL, TracingSink};
pub use stats::{StatsSnapshot, SubmissionStats};
pub use transmission::{LogSubmitter, SubmitOutcome};

/// Submit one entry to the default endpoint and report the outcome on stderr.
///
/// Always completes normally, whether or not the entry was delivered. A
/// submitter is built per call so its connection pool never outlives the
/// runtime that drives it; callers sending many entries should hold their
/// own `LogSubmitter` instead.
pub async fn submit(stack: &str, level: &str, package: &str, message: &str) {
    match LogSubmitter::new(SubmitterConfig::default()) {
        Ok(submitter) => submit_with(&submitter, stack, level, package, message).await,
        Err(e) => eprintln!("{FAILED_LABEL} {e}"),
    }
}

/// Fire-and-report over an existing submitter: the outcome only reaches its
/// sink.
pub(crate) async fn submit_with(
    submitter: &LogSubmitter,
    stack: &str,
    level: &str,
    package: &str,
    message: &str,
) {
    submitter.submit(stack, level, package, message).await;
}
