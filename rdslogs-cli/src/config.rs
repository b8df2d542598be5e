//! Configuration module
//!
//! Settings of one `rdslogs` run, resolved from command-line arguments and
//! the standard AWS environment variables.

use rdslogs_client::Credentials;
use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// DB instance whose log files are retrieved
    pub instance_id: String,

    /// Folder the log files are written to
    pub folder_path: PathBuf,

    /// Region of the instance
    pub region: String,

    /// Endpoint overriding the regional one (e.g., a local emulator)
    pub endpoint_url: Option<String>,

    /// Credentials given on the command line; the default chain otherwise
    pub credentials: Option<Credentials>,

    /// Whether debug logs are printed
    pub debug: bool,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.instance_id.is_empty() {
            anyhow::bail!("instance_id cannot be empty");
        }

        if self.folder_path.as_os_str().is_empty() {
            anyhow::bail!("folder path cannot be empty");
        }

        if self.region.is_empty() {
            anyhow::bail!("region cannot be empty");
        }

        if let Some(endpoint_url) = &self.endpoint_url {
            if !endpoint_url.starts_with("http://") && !endpoint_url.starts_with("https://") {
                anyhow::bail!("endpoint_url must start with http:// or https://");
            }
        }

        if let Some(credentials) = &self.credentials {
            if credentials.access_key_id.is_empty() || credentials.secret_access_key.is_empty() {
                anyhow::bail!("access key ID and secret access key cannot be empty");
            }
        }

        Ok(())
    }

    /// Default `tracing` filter when `RUST_LOG` is not set
    pub fn log_filter(&self) -> String {
        let level = if self.debug { "debug" } else { "info" };
        format!("rdslogs={level},rdslogs_client={level}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            instance_id: "db-1".to_string(),
            folder_path: PathBuf::from("logs"),
            region: "us-east-1".to_string(),
            endpoint_url: None,
            credentials: Some(Credentials::new("AKIDEXAMPLE", "secret")),
            debug: false,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = config();

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Empty instance_id should fail
        config.instance_id = String::new();
        assert!(config.validate().is_err());

        config.instance_id = "db-1".to_string();

        // Invalid endpoint should fail
        config.endpoint_url = Some("localhost:4566".to_string());
        assert!(config.validate().is_err());

        config.endpoint_url = Some("http://localhost:4566".to_string());
        assert!(config.validate().is_ok());

        // Empty explicit secret should fail
        config.credentials = Some(Credentials::new("AKIDEXAMPLE", ""));
        assert!(config.validate().is_err());

        // No explicit credentials defers to the default chain
        config.credentials = None;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_filter_follows_debug_flag() {
        let mut config = config();
        assert_eq!(config.log_filter(), "rdslogs=info,rdslogs_client=info");

        config.debug = true;
        assert_eq!(config.log_filter(), "rdslogs=debug,rdslogs_client=debug");
    }
}
