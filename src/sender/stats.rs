use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub total_submissions: u64,
    pub sent: u64,
    pub failed: u64,
    pub average_latency: Duration,
}

/// Running counters shared by every clone of a submitter.
#[derive(Debug, Default)]
pub struct SubmissionStats {
    total_submissions: AtomicU64,
    sent: AtomicU64,
    failed: AtomicU64,
    total_latency_ms: AtomicU64,
}

impl SubmissionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, sent: bool, latency: Duration) {
        self.total_submissions.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ms
            .fetch_add(latency.as_millis() as u64, Ordering::Relaxed);

        if sent {
            self.sent.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let total_submissions = self.total_submissions.load(Ordering::Relaxed);
        let total_latency_ms = self.total_latency_ms.load(Ordering::Relaxed);

        let average_latency = if total_submissions > 0 {
            Duration::from_millis(total_latency_ms / total_submissions)
        } else {
            Duration::ZERO
        };

        StatsSnapshot {
            total_submissions,
            sent: self.sent.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            average_latency,
        }
    }
}
