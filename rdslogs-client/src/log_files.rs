//! Log file API endpoints

use percent_encoding::utf8_percent_encode;
use rdslogs_core::domain::log_file::LogFileDescriptor;
use rdslogs_core::dto::log_file::LogFilePage;
use reqwest::Url;
use tracing::debug;

use crate::error::Result;
use crate::signer::URI_ENCODE_SET;
use crate::{API_VERSION, RdsClient, xml};

/// Path prefix of the REST log download API
const DOWNLOAD_PATH: &str = "/v13/downloadCompleteLogFile";

/// Raw outcome of a log download that reached the service
///
/// Any status is returned as-is; deciding what counts as success is left to
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileResponse {
    /// HTTP status code
    pub status: u16,
    /// Complete response body
    pub body: Vec<u8>,
}

impl LogFileResponse {
    /// Whether the service answered `200 OK`
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Body as text, for error reporting
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl RdsClient {
    // =============================================================================
    // Log File Listing
    // =============================================================================

    /// List all log files of a database instance
    ///
    /// Follows `Marker` pagination until the last page and returns the log
    /// files in the order the service listed them.
    ///
    /// # Arguments
    /// * `instance_id` - The DB instance identifier
    pub async fn describe_db_log_files(&self, instance_id: &str) -> Result<Vec<LogFileDescriptor>> {
        let mut log_files = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let page = self
                .describe_db_log_files_page(instance_id, marker.as_deref())
                .await?;
            log_files.extend(page.log_files);

            match page.marker {
                Some(next) => marker = Some(next),
                None => break,
            }
        }

        Ok(log_files)
    }

    /// Fetch a single page of `DescribeDBLogFiles`
    ///
    /// # Arguments
    /// * `instance_id` - The DB instance identifier
    /// * `marker` - Pagination token returned by the previous page
    pub async fn describe_db_log_files_page(
        &self,
        instance_id: &str,
        marker: Option<&str>,
    ) -> Result<LogFilePage> {
        let mut url = self.endpoint_url("/");
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("Action", "DescribeDBLogFiles")
                .append_pair("DBInstanceIdentifier", instance_id);
            if let Some(marker) = marker {
                query.append_pair("Marker", marker);
            }
            query.append_pair("Version", API_VERSION);
        }

        debug!(instance_id, ?marker, "Requesting DescribeDBLogFiles page");
        let response = self.send_signed(url).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(xml::decode_error(status.as_u16(), &body));
        }

        let page = xml::decode_log_file_page(&body)?;
        debug!(
            instance_id,
            count = page.log_files.len(),
            more = page.marker.is_some(),
            "Received DescribeDBLogFiles page"
        );
        Ok(page)
    }

    // =============================================================================
    // Log File Download
    // =============================================================================

    /// URL of the complete content of one log file
    ///
    /// `log_file_name` may contain `/`; each segment is escaped separately.
    pub fn download_url(&self, instance_id: &str, log_file_name: &str) -> Url {
        let file_path = log_file_name
            .split('/')
            .map(|segment| utf8_percent_encode(segment, URI_ENCODE_SET).to_string())
            .collect::<Vec<_>>()
            .join("/");
        let path = format!(
            "{DOWNLOAD_PATH}/{}/{file_path}",
            utf8_percent_encode(instance_id, URI_ENCODE_SET)
        );

        self.endpoint_url(&path)
    }

    /// Download the complete content of one log file
    ///
    /// The whole body is buffered in memory. Only transport failures are
    /// errors; the status is reported in the returned [`LogFileResponse`].
    ///
    /// # Arguments
    /// * `instance_id` - The DB instance identifier
    /// * `log_file_name` - Name of the log file as listed by the service
    pub async fn download_complete_log_file(
        &self,
        instance_id: &str,
        log_file_name: &str,
    ) -> Result<LogFileResponse> {
        let url = self.download_url(instance_id, log_file_name);
        debug!(%url, "Downloading complete log file");

        let response = self.send_signed(url).await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(LogFileResponse { status, body })
    }
}
