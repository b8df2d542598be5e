//! rdslogs HTTP Client
//!
//! A small, type-safe client for the parts of the Amazon RDS API needed to
//! retrieve database log files: listing the log files of an instance and
//! downloading one complete log file through the REST log API.
//!
//! Every request is signed with AWS Signature Version 4.
//!
//! # Example
//!
//! ```no_run
//! use rdslogs_client::{Credentials, RdsClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let credentials = Credentials::new("AKIDEXAMPLE", "secret");
//!     let client = RdsClient::new("us-east-1", credentials)?;
//!
//!     for log_file in client.describe_db_log_files("my-database").await? {
//!         println!("{} ({} bytes)", log_file.name, log_file.size_bytes);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
mod log_files;
pub mod signer;
mod xml;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use log_files::LogFileResponse;
pub use rdslogs_core::domain::credentials::Credentials;
pub use rdslogs_core::domain::log_file::LogFileDescriptor;

use chrono::Utc;
use reqwest::{Client, Url};
use std::collections::BTreeMap;

use crate::signer::RequestSigner;

/// Signing name of the database service
pub const SERVICE_NAME: &str = "rds";

/// Query API version used for `DescribeDBLogFiles`
pub const API_VERSION: &str = "2014-10-31";

/// Regional endpoint of the database service
pub fn default_endpoint(region: &str) -> String {
    format!("https://{SERVICE_NAME}.{region}.amazonaws.com")
}

/// HTTP client for the RDS API
///
/// Holds the endpoint, the region and the credentials every request is signed
/// with. Cloning is cheap enough to hand one to each caller.
#[derive(Debug, Clone)]
pub struct RdsClient {
    /// Base URL of the service (e.g., "https://rds.us-east-1.amazonaws.com")
    endpoint: Url,
    /// Region used in the signing scope
    region: String,
    /// Credentials used to sign requests
    credentials: Credentials,
    /// HTTP client instance
    client: Client,
}

impl RdsClient {
    /// Create a client for the regional endpoint of `region`
    ///
    /// # Example
    /// ```
    /// use rdslogs_client::{Credentials, RdsClient};
    ///
    /// let client = RdsClient::new("eu-west-1", Credentials::new("AKID", "secret")).unwrap();
    /// assert_eq!(client.endpoint().as_str(), "https://rds.eu-west-1.amazonaws.com/");
    /// ```
    pub fn new(region: impl Into<String>, credentials: Credentials) -> Result<Self> {
        let region = region.into();
        let endpoint = default_endpoint(&region);
        Self::with_endpoint(endpoint, region, credentials)
    }

    /// Create a client for a custom endpoint
    ///
    /// Useful for VPC endpoints and local emulators. Requests are still signed
    /// for `region`.
    pub fn with_endpoint(
        endpoint: impl AsRef<str>,
        region: impl Into<String>,
        credentials: Credentials,
    ) -> Result<Self> {
        Self::with_client(endpoint, region, credentials, Client::new())
    }

    /// Create a client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use rdslogs_client::{Credentials, RdsClient};
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(300))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = RdsClient::with_client(
    ///     "https://rds.us-east-1.amazonaws.com",
    ///     "us-east-1",
    ///     Credentials::new("AKID", "secret"),
    ///     http_client,
    /// )
    /// .unwrap();
    /// ```
    pub fn with_client(
        endpoint: impl AsRef<str>,
        region: impl Into<String>,
        credentials: Credentials,
        client: Client,
    ) -> Result<Self> {
        let endpoint = endpoint.as_ref();
        let parsed = Url::parse(endpoint)
            .map_err(|e| ClientError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
        if parsed.host_str().is_none() {
            return Err(ClientError::InvalidEndpoint(format!(
                "{endpoint}: missing host"
            )));
        }

        Ok(Self {
            endpoint: parsed,
            region: region.into(),
            credentials,
            client,
        })
    }

    /// Get the base URL of the service
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Get the region requests are signed for
    pub fn region(&self) -> &str {
        &self.region
    }

    /// URL of `path` under the endpoint, keeping any path prefix it has
    ///
    /// `path` must start with `/`.
    pub(crate) fn endpoint_url(&self, path: &str) -> Url {
        let prefix = self.endpoint.path().trim_end_matches('/');
        let mut url = self.endpoint.clone();
        url.set_path(&format!("{prefix}{path}"));
        url.set_query(None);
        url
    }

    // =============================================================================
    // Request Dispatch
    // =============================================================================

    /// Sign and send a GET request
    ///
    /// Each call is signed at the current time; signatures are never reused.
    async fn send_signed(&self, url: Url) -> Result<reqwest::Response> {
        let signer = RequestSigner::new(&self.credentials, &self.region, SERVICE_NAME);
        let signed = signer.sign("GET", &url, &BTreeMap::new(), Utc::now())?;

        let mut request = self.client.get(url);
        for (name, value) in signed.iter() {
            request = request.header(name, value);
        }

        Ok(request.send().await?)
    }
}
