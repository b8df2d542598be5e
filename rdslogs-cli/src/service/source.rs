//! Log source
//!
//! Where log files are listed and downloaded from. [`RdsClient`] is the only
//! production implementation.

use async_trait::async_trait;
use rdslogs_client::{LogFileDescriptor, LogFileResponse, RdsClient, Result};

/// Service trait for listing and downloading the log files of an instance
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Lists the log files of an instance, in service order
    ///
    /// # Arguments
    /// * `instance_id` - The DB instance identifier
    async fn list_log_files(&self, instance_id: &str) -> Result<Vec<LogFileDescriptor>>;

    /// Downloads the complete content of one log file
    ///
    /// Errors only when no response was obtained.
    ///
    /// # Arguments
    /// * `instance_id` - The DB instance identifier
    /// * `log_file_name` - Name of the log file as listed
    async fn download_log_file(
        &self,
        instance_id: &str,
        log_file_name: &str,
    ) -> Result<LogFileResponse>;
}

#[async_trait]
impl LogSource for RdsClient {
    async fn list_log_files(&self, instance_id: &str) -> Result<Vec<LogFileDescriptor>> {
        self.describe_db_log_files(instance_id).await
    }

    async fn download_log_file(
        &self,
        instance_id: &str,
        log_file_name: &str,
    ) -> Result<LogFileResponse> {
        self.download_complete_log_file(instance_id, log_file_name)
            .await
    }
}
