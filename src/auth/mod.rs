//! Authentication modes and the token provider.
//!
//! Two ways to obtain a bearer token, modeled as a tagged variant so every
//! caller handles both:
//! - `ClientCredentials` — service-to-service OAuth2, acquired and cached
//!   by this crate.
//! - `Passthrough` — a pre-issued (user) token supplied out-of-band, used
//!   verbatim.

pub mod oauth2;
pub mod provider;

use crate::config::credentials::Credentials;

#[derive(Debug, Clone)]
pub enum AuthMode {
    ClientCredentials(Credentials),
    Passthrough(PassthroughToken),
}

/// A token provisioned outside this crate (e.g. via the `get-token` tool).
#[derive(Debug, Clone)]
pub struct PassthroughToken {
    /// The pre-issued token, if one was provisioned.
    pub token: Option<String>,
    /// Optional expiry hint (UNIX seconds). Without it the token is used
    /// verbatim with no expiry tracking.
    pub expires_at: Option<i64>,
    /// Environment key the token is expected under; named in errors so the
    /// operator knows what to provision.
    pub env_key: String,
    /// Explicit mock fallback for environments with simulated auth. Never
    /// activated implicitly.
    pub mock_token: Option<String>,
}

impl PassthroughToken {
    pub fn new(env_key: impl Into<String>, token: Option<String>) -> Self {
        Self {
            token,
            expires_at: None,
            env_key: env_key.into(),
            mock_token: None,
        }
    }

    pub fn with_expiry_hint(mut self, expires_at: i64) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn with_mock_fallback(mut self, mock_token: impl Into<String>) -> Self {
        self.mock_token = Some(mock_token.into());
        self
    }
}
