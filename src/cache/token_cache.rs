use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::token::CachedToken;

/// In-memory token cache: credential identity -> token.
///
/// Cheap to clone; clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    inner: Arc<RwLock<HashMap<String, CachedToken>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert or replace the token for a credential identity.
    pub async fn set(&self, key: &str, token: CachedToken) {
        let mut map = self.inner.write().await;
        map.insert(key.to_owned(), token);
    }

    /// Get the token if it exists and has at least `safety_margin_secs`
    /// of validity left. Stale entries are treated as absent.
    pub async fn get(&self, key: &str, safety_margin_secs: u64) -> Option<CachedToken> {
        let map = self.inner.read().await;
        map.get(key)
            .cloned()
            .filter(|t| t.is_fresh(safety_margin_secs))
    }

    /// Drop the entry for a credential identity, if any.
    pub async fn invalidate(&self, key: &str) {
        let mut map = self.inner.write().await;
        map.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::time::now_i64;

    #[tokio::test]
    async fn stale_entries_read_as_absent() {
        let cache = TokenCache::new();
        cache
            .set("app:scope", CachedToken::new("old".into(), now_i64() + 30))
            .await;

        // 30s left: absent under a 60s margin, present under a 10s one
        assert!(cache.get("app:scope", 60).await.is_none());
        assert_eq!(
            cache.get("app:scope", 10).await.unwrap().access_token,
            "old"
        );
    }

    #[tokio::test]
    async fn set_replaces_wholesale_and_invalidate_removes() {
        let cache = TokenCache::new();
        cache
            .set("k", CachedToken::with_ttl("first".into(), 3600))
            .await;
        cache
            .set("k", CachedToken::with_ttl("second".into(), 3600))
            .await;
        assert_eq!(cache.get("k", 60).await.unwrap().access_token, "second");

        cache.invalidate("k").await;
        assert!(cache.get("k", 0).await.is_none());
    }
}
