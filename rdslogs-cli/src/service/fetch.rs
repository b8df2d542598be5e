//! Log fetcher
//!
//! Downloads one log file and writes it under the destination folder.

use rdslogs_core::domain::log_file::local_log_path;
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use super::error::FetchError;
use super::logger::Logger;
use super::source::LogSource;

/// Download `log_file_name` and store it as `<folder>/<log_file_name>.log`
///
/// The body is buffered completely before anything is written. Returns the
/// absolute path of the written file.
pub async fn fetch_log_file(
    source: &dyn LogSource,
    logger: &dyn Logger,
    folder: &Path,
    instance_id: &str,
    log_file_name: &str,
) -> Result<PathBuf, FetchError> {
    let response = source
        .download_log_file(instance_id, log_file_name)
        .await
        .map_err(FetchError::Request)?;
    logger.debug(&format!("Start to retrieve <{log_file_name}>"));

    if !response.is_ok() {
        return Err(FetchError::Remote {
            status: response.status,
            body: response.body_text(),
        });
    }
    logger.debug(&format!("<{log_file_name}> retrieved"));

    let path = write_log_file(folder, log_file_name, &response.body).await?;
    logger.info(&format!("File <{}> created", path.display()));

    Ok(path)
}

/// Write `body` to the local path of `log_file_name`, creating parent folders
async fn write_log_file(
    folder: &Path,
    log_file_name: &str,
    body: &[u8],
) -> Result<PathBuf, FetchError> {
    let relative = local_log_path(folder, log_file_name);
    let path = std::path::absolute(&relative).map_err(|source| FetchError::Filesystem {
        path: relative.clone(),
        source,
    })?;
    let fs_error = |source: io::Error| FetchError::Filesystem {
        path: path.clone(),
        source,
    };

    // Names come from the remote listing and must stay inside `folder`.
    if Path::new(log_file_name)
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(fs_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "log file name escapes the destination folder",
        )));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(fs_error)?;
    }
    fs::write(&path, body).await.map_err(fs_error)?;

    Ok(path)
}
