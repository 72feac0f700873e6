//! Domain layer for log-submitter.
//!
//! Contains the types shared by the sender and the binary:
//! - `LogEntry`: the four-field payload posted to the logging endpoint
//! - `SubmitError`: why a submission did not go through

pub mod error;
pub mod log_entry;

pub use error::SubmitError;
pub use log_entry::LogEntry;
