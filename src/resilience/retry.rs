use rand::Rng;
use tokio::time::{sleep, Duration};
use tracing::{error, warn};

use crate::error::TokenError;

#[derive(Debug, Clone)]
pub struct RetrySettings {
    pub attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            attempts: 3,
            base_delay_ms: 1_000,
            max_delay_ms: 8_000,
        }
    }
}

impl RetrySettings {
    /// Backoff before retrying a failed `attempt` (1-based): base delay
    /// doubled per attempt, capped at `max_delay_ms`. Jitter is added on
    /// top separately so this stays deterministic.
    pub fn delay_for_attempt(&self, attempt: u32) -> u64 {
        let factor = 1u64 << (attempt.saturating_sub(1)).min(16);
        self.base_delay_ms.saturating_mul(factor).min(self.max_delay_ms)
    }

    /// Random jitter, up to a quarter of the delay, to avoid synchronized
    /// retries against the token endpoint.
    fn jitter_ms(&self, delay: u64) -> u64 {
        if delay == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..=delay / 4)
    }

    /// Run `operation` up to `attempts` times. Only transient errors
    /// (network, 5xx, 429) are retried; everything else returns on the
    /// first failure.
    pub async fn run_with_retry<F, Fut, T>(&self, mut operation: F) -> Result<T, TokenError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, TokenError>>,
    {
        let attempts = self.attempts.max(1);
        for attempt in 1..=attempts {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < attempts => {
                    let backoff = self.delay_for_attempt(attempt);
                    let delay = backoff + self.jitter_ms(backoff);
                    warn!("attempt {attempt}/{attempts} failed: {e}; retrying in {delay}ms");
                    sleep(Duration::from_millis(delay)).await;
                }
                Err(e) => {
                    error!("giving up after {attempt} attempt(s): {e}");
                    return Err(e);
                }
            }
        }
        unreachable!("retry loop exhausted unexpectedly")
    }
}
