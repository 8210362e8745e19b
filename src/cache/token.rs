use crate::helpers::time::now_i64;

/// Token struct holding the bearer value and computed expiration.
///
/// Replaced wholesale on refresh; never partially mutated.
#[derive(Debug, Clone)]
pub struct CachedToken {
    pub access_token: String,
    pub expires_at: i64, // UNIX timestamp
}

impl CachedToken {
    pub fn new(access_token: String, expires_at: i64) -> Self {
        Self {
            access_token,
            expires_at,
        }
    }

    /// Build from a token-endpoint `expires_in` (seconds from now).
    pub fn with_ttl(access_token: String, expires_in_secs: u64) -> Self {
        Self::new(access_token, now_i64() + expires_in_secs as i64)
    }

    /// Usable for at least `safety_margin_secs` more seconds.
    pub fn is_fresh(&self, safety_margin_secs: u64) -> bool {
        now_i64() < self.expires_at - safety_margin_secs as i64
    }
}
