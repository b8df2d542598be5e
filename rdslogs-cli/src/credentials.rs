//! Credentials resolution
//!
//! Explicit command-line credentials win. Otherwise the default AWS provider
//! chain is used: environment variables, the shared credentials file
//! (`AWS_PROFILE`), the container role and the instance role.

use anyhow::Context;
use rdslogs_client::Credentials;
use rusoto_credential::{ChainProvider, ProvideAwsCredentials};
use std::time::Duration;

/// Timeout of each metadata lookup of the default chain
const METADATA_TIMEOUT: Duration = Duration::from_millis(500);

/// The default AWS credentials provider chain
pub fn default_provider() -> ChainProvider {
    let mut chain = ChainProvider::new();
    chain.set_timeout(METADATA_TIMEOUT);
    chain
}

/// Pick the credentials requests are signed with
///
/// `provider` is only consulted when no explicit credentials were given.
pub async fn resolve<P>(
    explicit: Option<Credentials>,
    provider: &P,
) -> anyhow::Result<Credentials>
where
    P: ProvideAwsCredentials + ?Sized,
{
    if let Some(credentials) = explicit {
        return Ok(credentials);
    }

    let resolved = provider
        .credentials()
        .await
        .context("No AWS credentials found in flags, environment, profile or instance metadata")?;

    let credentials = Credentials::new(
        resolved.aws_access_key_id(),
        resolved.aws_secret_access_key(),
    );
    Ok(match resolved.token() {
        Some(token) if !token.is_empty() => credentials.with_session_token(token.clone()),
        _ => credentials,
    })
}
