//! Log file DTOs
//!
//! Data transfer objects for log file listings.

use crate::domain::log_file::LogFileDescriptor;

/// One page of a `DescribeDBLogFiles` response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilePage {
    /// Log files in the order the service returned them
    pub log_files: Vec<LogFileDescriptor>,

    /// Pagination token for the next page, absent on the last one
    pub marker: Option<String>,
}
