//! Retry logic for page fetches and player requests

use crate::error::TubeError;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt
    pub max_retries: u32,
    /// Initial delay between retries
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Backoff multiplier
    pub backoff_multiplier: f64,
    /// Jitter factor (0.0 to 1.0)
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter_factor: 0.1,
        }
    }
}

impl RetryConfig {
    /// Default configuration with a different retry count
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }
}

/// Retry executor
#[derive(Debug, Clone, Default)]
pub struct RetryExecutor {
    config: RetryConfig,
}

impl RetryExecutor {
    /// Create a new retry executor with configuration
    pub fn with_config(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Run `func` until it succeeds, fails with a non-retryable error, or
    /// runs out of retries
    pub async fn execute<F, Fut, T>(&self, mut func: F) -> Result<T, TubeError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, TubeError>>,
    {
        let mut delay = self.config.initial_delay;
        let mut attempt = 0;

        loop {
            let error = match func().await {
                Ok(result) => return Ok(result),
                Err(error) => error,
            };

            if !error.is_retryable() || attempt >= self.config.max_retries {
                return Err(error);
            }
            attempt += 1;

            let wait = delay + self.jitter(delay);
            debug!(
                "Attempt {} failed ({}), retrying in {:?}",
                attempt, error, wait
            );
            tokio::time::sleep(wait).await;

            delay = delay
                .mul_f64(self.config.backoff_multiplier)
                .min(self.config.max_delay);
        }
    }

    fn jitter(&self, delay: Duration) -> Duration {
        if self.config.jitter_factor <= 0.0 {
            return Duration::ZERO;
        }
        let range = delay.as_millis() as f64 * self.config.jitter_factor;
        let jitter = (rand::random::<f64>() - 0.5) * 2.0 * range;
        Duration::from_millis(jitter.abs() as u64)
    }
}
