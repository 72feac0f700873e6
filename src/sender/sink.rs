//! Where submission outcomes get reported.
//!
//! The submitter never prints anything itself. It hands every settled
//! outcome to exactly one `OutcomeSink`, which decides whether that turns
//! into a diagnostic line, a tracing event or nothing at all.

use super::transmission::SubmitOutcome;
use crate::domain::LogEntry;
use parking_lot::Mutex;
use std::io::{self, Write};
use tracing::{info, warn};

#[cfg(test)]
use mockall::automock;

/// Label written in front of the echoed response on success.
pub const SENT_LABEL: &str = "Log sent:";
/// Label written in front of the error message on failure.
pub const FAILED_LABEL: &str = "Log submission failed:";

#[cfg_attr(test, automock)]
pub trait OutcomeSink: Send + Sync {
    fn observe(&self, entry: &LogEntry, outcome: &SubmitOutcome);
}

/// Writes one line per outcome to a writer (stderr by default).
pub struct LineSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl LineSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl Default for LineSink<io::Stderr> {
    fn default() -> Self {
        Self::stderr()
    }
}

impl<W: Write + Send> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn format_line(outcome: &SubmitOutcome) -> String {
        match outcome {
            SubmitOutcome::Sent { response, .. } => format!("{SENT_LABEL} {response}"),
            SubmitOutcome::Failed { error, .. } => format!("{FAILED_LABEL} {error}"),
        }
    }
}

impl LineSink<Vec<u8>> {
    /// Everything written so far, for in-memory sinks.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.writer.lock()).into_owned()
    }
}

impl<W: Write + Send> OutcomeSink for LineSink<W> {
    fn observe(&self, _entry: &LogEntry, outcome: &SubmitOutcome) {
        let line = Self::format_line(outcome);
        let mut writer = self.writer.lock();
        // Diagnostic output is best effort
        let _ = writeln!(writer, "{line}");
        let _ = writer.flush();
    }
}

/// Reports outcomes as tracing events instead of raw lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl OutcomeSink for TracingSink {
    fn observe(&self, entry: &LogEntry, outcome: &SubmitOutcome) {
        match outcome {
            SubmitOutcome::Sent {
                status,
                response,
                latency,
            } => info!(
                stack = %entry.stack,
                level = %entry.level,
                package = %entry.package,
                status = *status,
                latency_ms = latency.as_millis() as u64,
                response = %response,
                "Log sent"
            ),
            SubmitOutcome::Failed { error, latency } => warn!(
                stack = %entry.stack,
                level = %entry.level,
                package = %entry.package,
                latency_ms = latency.as_millis() as u64,
                error = %error,
                "Log submission failed"
            ),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl OutcomeSink for NoopSink {
    fn observe(&self, _entry: &LogEntry, _outcome: &SubmitOutcome) {}
}
