#![deny(warnings, rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::cast_possible_truncation, // Latencies in ms fit in u64
    clippy::missing_errors_doc,       // Internal API
    clippy::module_name_repetitions,  // e.g. SubmitError in submit paths
    clippy::must_use_candidate,       // Annotated selectively on critical APIs
    clippy::doc_markdown              // Internal API
)]

pub mod app;
pub mod domain;
pub mod sender;

// Re-export main types for easy access
pub use app::Config;
pub use domain::{LogEntry, SubmitError};
pub use sender::{
    LineSink, LogSubmitter, NoopSink, OutcomeSink, SubmitOutcome, SubmitterConfig, TracingSink,
    submit,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
