//! Credentials domain model
//!
//! The access key material used to sign requests. Resolving it (environment,
//! profiles, instance metadata) is left to the caller.

use std::fmt;

/// Credentials used to sign requests against the database service
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Access key identifier (`AKIA...` or `ASIA...`)
    pub access_key_id: String,

    /// Secret access key
    pub secret_access_key: String,

    /// Session token for temporary credentials
    pub session_token: Option<String>,
}

impl Credentials {
    /// Create long-term credentials without a session token
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    /// Attach a session token, as issued with temporary credentials
    pub fn with_session_token(mut self, session_token: impl Into<String>) -> Self {
        self.session_token = Some(session_token.into());
        self
    }
}

// Secrets never end up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[censored]")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "[censored]"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_secrets() {
        let credentials =
            Credentials::new("AKIDEXAMPLE", "super-secret").with_session_token("short-lived");
        let debug = format!("{:?}", credentials);

        assert!(debug.contains("AKIDEXAMPLE"));
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("short-lived"));
    }

    #[test]
    fn test_with_session_token() {
        let credentials = Credentials::new("a", "b");
        assert_eq!(credentials.session_token, None);

        let credentials = credentials.with_session_token("c");
        assert_eq!(credentials.session_token.as_deref(), Some("c"));
    }
}
