//! rdslogs CLI
//!
//! Downloads every log file of an RDS database instance into a local folder.

mod config;
mod credentials;
mod report;
mod service;

use anyhow::{Context, Result};
use clap::Parser;
use rdslogs_client::{Credentials, RdsClient};
use rdslogs_core::DEFAULT_REGION;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::service::{BatchError, get_logs};

#[derive(Parser)]
#[command(name = "rdslogs", version)]
#[command(about = "Download all RDS logs of a database instance", long_about = None)]
struct Cli {
    /// DB instance identifier
    #[arg(short, long)]
    instance_id: String,

    /// Region of the instance
    #[arg(short, long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// Print debug logs
    #[arg(short, long)]
    debug: bool,

    /// Service endpoint, when not the regional one
    #[arg(long, env = "AWS_ENDPOINT_URL_RDS", hide = true)]
    endpoint_url: Option<String>,

    /// Access key ID, instead of the default credentials chain
    #[arg(long, requires = "secret_access_key")]
    access_key_id: Option<String>,

    /// Secret access key, instead of the default credentials chain
    #[arg(long, requires = "access_key_id")]
    secret_access_key: Option<String>,

    /// Session token of temporary credentials given on the command line
    #[arg(long, requires = "access_key_id")]
    session_token: Option<String>,

    /// Folder the log files are written to
    path: PathBuf,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let credentials = match (cli.access_key_id, cli.secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => {
                let credentials = Credentials::new(access_key_id, secret_access_key);
                match cli.session_token.filter(|t| !t.is_empty()) {
                    Some(token) => Some(credentials.with_session_token(token)),
                    None => Some(credentials),
                }
            }
            _ => None,
        };

        Config {
            instance_id: cli.instance_id,
            folder_path: cli.path,
            region: cli.region,
            endpoint_url: cli.endpoint_url,
            credentials,
            debug: cli.debug,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let config = Config::from(Cli::parse());

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config.validate()?;

    debug!(
        "Get logs for instance {} on region {}",
        config.instance_id, config.region
    );
    debug!("Logs will be stored in {}", config.folder_path.display());

    let credentials =
        credentials::resolve(config.credentials.clone(), &credentials::default_provider()).await?;

    let client = match &config.endpoint_url {
        Some(endpoint_url) => {
            RdsClient::with_endpoint(endpoint_url, config.region.clone(), credentials)
        }
        None => RdsClient::new(config.region.clone(), credentials),
    }
    .context("Failed to create RDS client")?;

    match get_logs(
        Some(config.folder_path.as_path()),
        Some(config.instance_id.as_str()),
        &client,
        None,
    )
    .await
    {
        Ok(results) => {
            debug!(
                "All log files retrieved for instance {} on region {}",
                config.instance_id, config.region
            );
            report::print_summary(&results);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            // Already logged by the batch
            if let BatchError::Listing { source, .. } = &err {
                if source.is_not_found() {
                    warn!(
                        "Check that instance {} exists in region {}",
                        config.instance_id, config.region
                    );
                }
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
