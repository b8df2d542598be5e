//! Log file domain model
//!
//! Represents one server log file an RDS instance makes available for download.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Extension appended to every downloaded log file
pub const LOG_FILE_EXTENSION: &str = ".log";

/// A log file available on a database instance
///
/// Produced by a `DescribeDBLogFiles` listing. The name is the only identity a
/// log file has and may contain `/` separators (e.g. `error/postgresql.log.2018-01-12-12`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileDescriptor {
    /// Name of the log file on the instance
    pub name: String,

    /// Last time the instance wrote to this file
    pub last_written: DateTime<Utc>,

    /// Size of the file in bytes, as reported by the service
    pub size_bytes: i64,
}

impl LogFileDescriptor {
    /// Create a descriptor from the raw values of a listing entry
    ///
    /// `last_written_millis` is the number of milliseconds since the Unix epoch.
    /// Values chrono cannot represent fall back to the epoch itself.
    pub fn new(name: impl Into<String>, last_written_millis: i64, size_bytes: i64) -> Self {
        Self {
            name: name.into(),
            last_written: DateTime::from_timestamp_millis(last_written_millis).unwrap_or_default(),
            size_bytes,
        }
    }
}

/// Destination of the log file `name` under `folder`
///
/// Separators embedded in `name` become subdirectories of `folder`.
pub fn local_log_path(folder: &Path, name: &str) -> PathBuf {
    folder.join(format!("{name}{LOG_FILE_EXTENSION}"))
}
