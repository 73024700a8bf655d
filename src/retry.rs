use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio_retry::RetryIf;

use crate::config::RetryConfig;
use crate::error::{EzError, Result};

/// Retry policy for calls against the completion service
#[derive(Debug, Clone)]
pub enum RetryPolicy {
    /// Exponential backoff with configuration
    ExponentialBackoff(RetryConfig),
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::ExponentialBackoff(RetryConfig::default())
    }
}

impl RetryPolicy {
    pub fn max_attempts(&self) -> u32 {
        match self {
            Self::ExponentialBackoff(cfg) => cfg.max_attempts.max(1),
        }
    }

    /// Waits taken before the second, third, ... attempt.
    pub fn delays(&self) -> Vec<Duration> {
        match self {
            Self::ExponentialBackoff(cfg) => {
                let initial = cfg.initial_delay().as_millis() as f64;
                (0..self.max_attempts() - 1)
                    .map(|i| {
                        let ms = initial * cfg.backoff_base.powi(i as i32);
                        Duration::from_millis(ms.round() as u64)
                    })
                    .collect()
            }
        }
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or
    /// runs out of attempts. Only rate limits are retried.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.max_attempts();
        let attempt = AtomicU32::new(0);

        let outcome = RetryIf::start(
            self.delays(),
            || {
                attempt.fetch_add(1, Ordering::Relaxed);
                op()
            },
            |e: &EzError| {
                let retryable = e.is_rate_limited();
                let made = attempt.load(Ordering::Relaxed);
                if retryable && made < max_attempts {
                    tracing::warn!(
                        "Rate limited on attempt {} of {}, backing off",
                        made,
                        max_attempts
                    );
                }
                retryable
            },
        )
        .await;

        match outcome {
            Err(EzError::RateLimited) => Err(EzError::RetriesExhausted {
                attempts: max_attempts,
            }),
            other => other,
        }
    }
}
