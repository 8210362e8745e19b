use crate::error::TokenError;

/// Immutable credential set for the client-credentials grant.
///
/// Supplied fully resolved by the caller; this module never reads
/// configuration files or the environment itself.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
    pub token_url: String,
}

impl Credentials {
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scope: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: scope.into(),
            token_url: token_url.into(),
        }
    }

    /// Convenience constructor using the Azure AD v2.0 token endpoint
    /// derived from the tenant id.
    pub fn for_tenant(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        let tenant_id = tenant_id.into();
        let token_url = format!(
            "https://login.microsoftonline.com/{}/oauth2/v2.0/token",
            tenant_id
        );
        Self::new(tenant_id, client_id, client_secret, scope, token_url)
    }

    /// Cache identity: one live token per (client, scope) pair.
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.client_id, self.scope)
    }

    /// Fail-fast validation, run before any network call.
    pub fn validate(&self, app: &str) -> Result<(), TokenError> {
        let required = [
            ("tenant_id", &self.tenant_id),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("scope", &self.scope),
            ("token_url", &self.token_url),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(TokenError::configuration(
                    app,
                    format!("field '{}' is empty", name),
                ));
            }
        }
        if self.scope.chars().any(char::is_whitespace) {
            return Err(TokenError::configuration(
                app,
                format!("scope '{}' contains whitespace", self.scope),
            ));
        }
        if !self.token_url.starts_with("http://") && !self.token_url.starts_with("https://") {
            return Err(TokenError::configuration(
                app,
                format!("token_url '{}' is not an http(s) URL", self.token_url),
            ));
        }
        Ok(())
    }
}
