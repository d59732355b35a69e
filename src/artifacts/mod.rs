//! Artifact persistence for crawl results
//!
//! Writes each requested artifact kind of a crawl result to its layout
//! path, isolating failures per item: one failed write never prevents the
//! remaining artifacts for the same result, and never aborts the session.
//! Failures are collected as error-log records for the caller to append.

mod error_log;
mod writer;

pub use error_log::{ErrorRecord, ErrorSink, FileErrorLog, MemoryErrorLog};
pub use writer::{write_artifacts, WriteOutcome};
