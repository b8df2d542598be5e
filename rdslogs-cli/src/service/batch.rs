//! Batch orchestrator
//!
//! Retrieves every log file of an instance into a local folder.

use std::path::{Path, PathBuf};
use tokio::fs;

use super::error::{BatchError, FetchError, ValidationError};
use super::fetch::fetch_log_file;
use super::logger::{Logger, TracingLogger};
use super::source::LogSource;

/// Outcome of one log file of the batch
#[derive(Debug)]
pub struct DownloadResult {
    /// Name of the log file as listed by the service
    pub log_file: String,

    /// Absolute path of the written file, or why it was skipped
    pub outcome: Result<PathBuf, FetchError>,
}

impl DownloadResult {
    /// Path of the written file, if the download succeeded
    pub fn path(&self) -> Option<&Path> {
        self.outcome.as_deref().ok()
    }
}

/// Download all log files of `instance_id` into `folder_path`
///
/// Fails only if an input is missing, the folder cannot be created or the
/// listing fails; each of those is logged once at error level. Failures of
/// individual files are logged and returned in their [`DownloadResult`],
/// in listing order.
///
/// # Arguments
/// * `folder_path` - Destination folder, created if absent
/// * `instance_id` - The DB instance identifier
/// * `source` - Where log files are listed and downloaded from
/// * `logger` - Progress sink; `tracing` when `None`
pub async fn get_logs(
    folder_path: Option<&Path>,
    instance_id: Option<&str>,
    source: &dyn LogSource,
    logger: Option<&dyn Logger>,
) -> Result<Vec<DownloadResult>, BatchError> {
    let logger = logger.unwrap_or(&TracingLogger);

    let (folder_path, instance_id) = match validate(folder_path, instance_id) {
        Ok(inputs) => inputs,
        Err(err) => {
            logger.error(&format!("Failed to retrieve logs: {err}"));
            return Err(err.into());
        }
    };

    logger.debug(&format!(
        "Create <{}> if it does not exist",
        folder_path.display()
    ));
    if let Err(io_err) = fs::create_dir_all(folder_path).await {
        let err = BatchError::Filesystem {
            path: folder_path.to_path_buf(),
            source: io_err,
        };
        logger.error(&format!("Failed to retrieve logs: {err}"));
        return Err(err);
    }

    logger.debug(&format!("Get logs list on instance {instance_id}"));
    let log_files = match source.list_log_files(instance_id).await {
        Ok(log_files) => log_files,
        Err(client_err) => {
            let err = BatchError::Listing {
                instance_id: instance_id.to_string(),
                source: client_err,
            };
            logger.error(&err.to_string());
            return Err(err);
        }
    };

    // One download at a time, in listing order. Concurrent requests against
    // the log download API have returned incomplete file bodies; keep this
    // loop sequential unless that has been shown to be fixed.
    let mut results = Vec::with_capacity(log_files.len());
    for log_file in log_files {
        let outcome =
            fetch_log_file(source, logger, folder_path, instance_id, &log_file.name).await;
        if let Err(err) = &outcome {
            logger.error(&format!("Cannot retrieve file <{}>: {err}", log_file.name));
        }
        results.push(DownloadResult {
            log_file: log_file.name,
            outcome,
        });
    }

    Ok(results)
}

/// Check that both inputs are present, folder path first
fn validate<'a>(
    folder_path: Option<&'a Path>,
    instance_id: Option<&'a str>,
) -> Result<(&'a Path, &'a str), ValidationError> {
    let folder_path = folder_path
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or(ValidationError::MissingFolderPath)?;
    let instance_id = instance_id
        .filter(|id| !id.is_empty())
        .ok_or(ValidationError::MissingInstanceId)?;

    Ok((folder_path, instance_id))
}
