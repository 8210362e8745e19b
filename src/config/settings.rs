use std::time::Duration;

use crate::resilience::retry::RetrySettings;

pub const DEFAULT_SAFETY_MARGIN_SECS: u64 = 60;
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 30_000;

/// Tunables for a [`TokenProvider`](crate::auth::provider::TokenProvider).
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub retry: RetrySettings,
    /// Subtracted from a token's expiry before deciding cache freshness,
    /// so a token never expires mid-request.
    pub safety_margin_secs: u64,
    /// Per-request timeout passed to the HTTP client.
    pub http_timeout: Duration,
    /// Optional deadline wrapping the whole acquisition, retries included.
    pub overall_timeout: Option<Duration>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            retry: RetrySettings::default(),
            safety_margin_secs: DEFAULT_SAFETY_MARGIN_SECS,
            http_timeout: Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS),
            overall_timeout: None,
        }
    }
}
