//! Session error log
//!
//! An append-only store of per-item failures, injected into the session
//! runner so tests can substitute an in-memory sink. The file-backed sink
//! writes each record as one line in a single append call, so records never
//! interleave even with concurrent writers.

use chrono::Utc;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

/// One persisted failure: enough context to retry the item manually later
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    /// The sanitized filename of the item that failed
    pub item: String,
    /// The path the write or download was attempted at
    pub path: String,
    /// The underlying failure message
    pub message: String,
}

/// Append-only sink for error records
pub trait ErrorSink {
    /// Appends one record; the append must be individually atomic
    fn append(&mut self, record: &ErrorRecord) -> io::Result<()>;
}

/// File-backed error log, one record per line
pub struct FileErrorLog {
    path: PathBuf,
}

impl FileErrorLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ErrorSink for FileErrorLog {
    fn append(&mut self, record: &ErrorRecord) -> io::Result<()> {
        let line = format!(
            "[{}] item={} path={} error={}\n",
            Utc::now().to_rfc3339(),
            record.item,
            record.path,
            record.message
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        // One write call per record; O_APPEND keeps records whole
        file.write_all(line.as_bytes())
    }
}

/// In-memory error log for tests
#[derive(Debug, Default)]
pub struct MemoryErrorLog {
    pub records: Vec<ErrorRecord>,
}

impl MemoryErrorLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ErrorSink for MemoryErrorLog {
    fn append(&mut self, record: &ErrorRecord) -> io::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}
