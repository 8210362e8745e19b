use std::time::Duration;

/// Upstream bodies can be multi-KB HTML error pages; keep diagnostics readable.
pub const MAX_BODY_SNIPPET: usize = 512;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Credential fields are missing or malformed. Raised before any network
    /// call is attempted.
    #[error("invalid credentials for app '{app}': {reason}")]
    Configuration { app: String, reason: String },

    /// The token endpoint rejected the request, or retries exhausted.
    /// `status` is the last observed HTTP status, `None` for network-level
    /// failures that never produced a response.
    #[error("authentication failed for app '{app}'{}: {body}", status_suffix(.status))]
    Authentication {
        app: String,
        status: Option<u16>,
        body: String,
        transient: bool,
    },

    /// The overall deadline wrapping token acquisition was exceeded.
    #[error("token acquisition timed out after {0:?}")]
    Timeout(Duration),

    /// Passthrough mode with no token configured and no mock fallback enabled.
    #[error("no token available for app '{app}': set '{env_key}' or enable the mock fallback")]
    NoTokenAvailable { app: String, env_key: String },
}

impl TokenError {
    /// Whether the retry loop may re-attempt after this error.
    /// Only network errors, 5xx and 429 qualify.
    pub fn is_transient(&self) -> bool {
        matches!(self, TokenError::Authentication { transient: true, .. })
    }

    pub fn authentication(app: &str, status: Option<u16>, body: &str) -> Self {
        let transient = match status {
            Some(code) => code == 429 || (500..600).contains(&code),
            // no response at all: connect/timeout/dns, worth retrying
            None => true,
        };
        TokenError::Authentication {
            app: app.to_owned(),
            status,
            body: truncate_body(body),
            transient,
        }
    }

    pub fn configuration(app: &str, reason: impl Into<String>) -> Self {
        TokenError::Configuration {
            app: app.to_owned(),
            reason: reason.into(),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

/// Cap a response body for inclusion in an error message.
pub fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_BODY_SNIPPET {
        return body.to_owned();
    }
    let mut end = MAX_BODY_SNIPPET;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated {} bytes]", &body[..end], body.len() - end)
}
