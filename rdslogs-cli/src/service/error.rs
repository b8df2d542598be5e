//! Service error types

use rdslogs_client::ClientError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A required input of the batch is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Folder path is not defined")]
    MissingFolderPath,

    #[error("Instance ID is not defined")]
    MissingInstanceId,
}

/// Errors that abort a whole batch
///
/// All of them happen before the first log file is downloaded.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The destination folder could not be created
    #[error("Cannot create folder <{}>: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The log files of the instance could not be listed
    #[error("Cannot retrieve logs on instance <{instance_id}>: {source}")]
    Listing {
        instance_id: String,
        #[source]
        source: ClientError,
    },
}

/// Errors of a single log file download
///
/// Never abort the batch; they end up in the file's [`DownloadResult`](super::DownloadResult).
#[derive(Debug, Error)]
pub enum FetchError {
    /// No response was obtained
    #[error("request failed: {0}")]
    Request(#[source] ClientError),

    /// The service answered with something other than `200 OK`
    #[error("status {status}: {body}")]
    Remote { status: u16, body: String },

    /// The log file could not be written
    #[error("cannot write <{}>: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
