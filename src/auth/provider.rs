use reqwest::Client;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::auth::oauth2::{request_token, TokenResponse};
use crate::auth::{AuthMode, PassthroughToken};
use crate::cache::token::CachedToken;
use crate::cache::token_cache::TokenCache;
use crate::config::credentials::Credentials;
use crate::config::settings::ProviderSettings;
use crate::error::TokenError;

/// Produces a valid bearer token for one credential set, minimizing network
/// round-trips and tolerating transient upstream failures.
#[derive(Debug)]
pub struct TokenProvider {
    app: String,
    mode: AuthMode,
    settings: ProviderSettings,
    client: Client,
    cache: TokenCache,
    /// Guards the check-then-refresh sequence so concurrent callers never
    /// race two redundant refreshes of the same credential set.
    refresh_gate: Mutex<()>,
}

impl TokenProvider {
    /// Credentials are validated here, before any network call.
    pub fn new(
        app: impl Into<String>,
        mode: AuthMode,
        settings: ProviderSettings,
    ) -> Result<Self, TokenError> {
        let app = app.into();
        if let AuthMode::ClientCredentials(credentials) = &mode {
            credentials.validate(&app)?;
        }
        let client = Client::builder()
            .timeout(settings.http_timeout)
            .build()
            .map_err(|e| TokenError::configuration(&app, format!("http client: {e}")))?;
        Ok(Self {
            app,
            mode,
            settings,
            client,
            cache: TokenCache::new(),
            refresh_gate: Mutex::new(()),
        })
    }

    /// Share a cache across providers (one entry per credential identity).
    pub fn with_cache(mut self, cache: TokenCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    /// Returns a token valid at the moment of return, within the configured
    /// safety margin. Cache hits cost no I/O.
    pub async fn get_token(&self) -> Result<String, TokenError> {
        match &self.mode {
            AuthMode::Passthrough(passthrough) => self.passthrough_token(passthrough),
            AuthMode::ClientCredentials(credentials) => {
                let key = credentials.cache_key();
                let margin = self.settings.safety_margin_secs;

                if let Some(cached) = self.cache.get(&key, margin).await {
                    debug!("app '{}': token cache hit", self.app);
                    return Ok(cached.access_token);
                }

                let _gate = self.refresh_gate.lock().await;
                // another caller may have refreshed while we waited
                if let Some(cached) = self.cache.get(&key, margin).await {
                    debug!("app '{}': token refreshed concurrently", self.app);
                    return Ok(cached.access_token);
                }

                let response = self.acquire(credentials).await?;
                let token = CachedToken::with_ttl(response.access_token, response.expires_in);
                self.cache.set(&key, token.clone()).await;
                info!(
                    "app '{}': acquired token, expires_at {}",
                    self.app, token.expires_at
                );
                Ok(token.access_token)
            }
        }
    }

    /// Discard the cached entry; the next `get_token` call re-acquires.
    pub async fn invalidate(&self) {
        if let AuthMode::ClientCredentials(credentials) = &self.mode {
            self.cache.invalidate(&credentials.cache_key()).await;
        }
    }

    async fn acquire(&self, credentials: &Credentials) -> Result<TokenResponse, TokenError> {
        let acquisition = self.settings.retry.run_with_retry(|| {
            let client = self.client.clone();
            let app = self.app.clone();
            let credentials = credentials.clone();
            async move { request_token(&client, &app, &credentials).await }
        });

        match self.settings.overall_timeout {
            Some(deadline) => timeout(deadline, acquisition)
                .await
                .map_err(|_| TokenError::Timeout(deadline))?,
            None => acquisition.await,
        }
    }

    fn passthrough_token(&self, passthrough: &PassthroughToken) -> Result<String, TokenError> {
        if let Some(token) = &passthrough.token {
            let usable = match passthrough.expires_at {
                // honor the hint with the same margin as acquired tokens
                Some(expires_at) => {
                    CachedToken::new(token.clone(), expires_at)
                        .is_fresh(self.settings.safety_margin_secs)
                }
                None => true,
            };
            if usable {
                return Ok(token.clone());
            }
            debug!(
                "app '{}': pre-issued token under '{}' expired",
                self.app, passthrough.env_key
            );
        }
        if let Some(mock) = &passthrough.mock_token {
            debug!("app '{}': using configured mock token", self.app);
            return Ok(mock.clone());
        }
        Err(TokenError::NoTokenAvailable {
            app: self.app.clone(),
            env_key: passthrough.env_key.clone(),
        })
    }
}
