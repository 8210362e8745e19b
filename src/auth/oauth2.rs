use reqwest::Client;
use serde::Deserialize;

use crate::config::credentials::Credentials;
use crate::error::{truncate_body, TokenError};

/// Successful token-endpoint response contract.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub expires_in: u64,
}

/// One client-credentials POST against the token endpoint.
///
/// Classification of failures drives the retry loop: network errors and
/// 5xx/429 come back transient, other rejections and malformed bodies
/// do not.
pub async fn request_token(
    client: &Client,
    app: &str,
    credentials: &Credentials,
) -> Result<TokenResponse, TokenError> {
    let form = [
        ("grant_type", "client_credentials"),
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.as_str()),
        ("scope", credentials.scope.as_str()),
    ];

    let response = client
        .post(&credentials.token_url)
        .form(&form)
        .send()
        .await
        .map_err(|e| TokenError::authentication(app, None, &e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TokenError::authentication(app, Some(status.as_u16()), &e.to_string()))?;

    if !status.is_success() {
        return Err(TokenError::authentication(app, Some(status.as_u16()), &body));
    }

    // 200 with a body we cannot parse means a broken contract, not a
    // transient condition
    serde_json::from_str::<TokenResponse>(&body).map_err(|e| TokenError::Authentication {
        app: app.to_owned(),
        status: Some(status.as_u16()),
        body: format!("malformed token response ({e}): {}", truncate_body(&body)),
        transient: false,
    })
}
