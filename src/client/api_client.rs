use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::auth::provider::TokenProvider;

// header names must be lowercase for HeaderName::from_static
pub const SUBSCRIPTION_KEY_HEADER: &str = "ocp-apim-subscription-key";
pub const APP_ID_HEADER: &str = "app-id";
pub const UNIQUE_NAME_HEADER: &str = "unique-name";

/// Identity headers for environments where the gateway simulates auth.
/// `unique_name` is only sent for user-role apps.
#[derive(Debug, Clone)]
pub struct MockIdentity {
    pub app_id: String,
    pub unique_name: Option<String>,
}

/// HTTP client for business endpoints: obtains a bearer token from the
/// provider and attaches it with the static subscription key on every
/// request. Knows nothing about token acquisition beyond `get_token`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    subscription_key: String,
    provider: Arc<TokenProvider>,
    mock_identity: Option<MockIdentity>,
    client: Client,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        subscription_key: impl Into<String>,
        provider: Arc<TokenProvider>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            subscription_key: subscription_key.into(),
            provider,
            mock_identity: None,
            client,
        })
    }

    pub fn with_mock_identity(mut self, identity: MockIdentity) -> Self {
        self.mock_identity = Some(identity);
        self
    }

    pub async fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Response> {
        let url = self.url(endpoint);
        let headers = self.prepare_headers().await?;
        debug!("GET {url}");
        self.client
            .get(&url)
            .headers(headers)
            .query(query)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Response> {
        let url = self.url(endpoint);
        let headers = self.prepare_headers().await?;
        debug!("POST {url}");
        self.client
            .post(&url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {url} failed"))
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    async fn prepare_headers(&self) -> Result<HeaderMap> {
        let token = self
            .provider
            .get_token()
            .await
            .with_context(|| format!("no bearer token for app '{}'", self.provider.app()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}"))
                .context("bearer token is not a valid header value")?,
        );
        headers.insert(
            SUBSCRIPTION_KEY_HEADER,
            HeaderValue::from_str(&self.subscription_key)
                .context("subscription key is not a valid header value")?,
        );

        if let Some(identity) = &self.mock_identity {
            headers.insert(
                APP_ID_HEADER,
                HeaderValue::from_str(&identity.app_id).context("invalid App-Id header")?,
            );
            if let Some(unique_name) = &identity.unique_name {
                headers.insert(
                    UNIQUE_NAME_HEADER,
                    HeaderValue::from_str(unique_name).context("invalid Unique-Name header")?,
                );
            }
        }
        Ok(headers)
    }
}
