//! Retry logic for network operations with exponential backoff.
//!
//! Failure classes map to different policies:
//! - `Network` errors are retried with backoff until the attempt budget
//!   runs out, then reported as "Failed after N attempts".
//! - `RateLimit` errors are never retried; Instagram told us to stop.
//! - Anything else aborts the loop immediately as an unexpected error.

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use std::future::Future;
use std::time::Duration;

/// Retry strategy configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total number of attempts (first try included)
    pub max_attempts: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Cap applied to the computed delay
    pub max_delay: Duration,
    /// Whether to add jitter to delays
    pub add_jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: config::retry::MAX_ATTEMPTS,
            base_delay: Duration::from_secs_f64(config::retry::BASE_DELAY_SECS),
            max_delay: Duration::from_secs_f64(config::retry::MAX_DELAY_SECS),
            add_jitter: true,
        }
    }
}

impl RetryConfig {
    /// Creates a retry config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the total attempt budget.
    #[must_use]
    pub fn max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }

    /// Sets the base delay.
    #[must_use]
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the delay cap.
    #[must_use]
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Disables jitter (deterministic delays for tests).
    #[must_use]
    pub fn no_jitter(mut self) -> Self {
        self.add_jitter = false;
        self
    }

    /// Calculates the delay after the given failed attempt (0-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_delay = self.base_delay.as_secs_f64() * 2.0_f64.powi(attempt as i32);
        let capped_delay = base_delay.min(self.max_delay.as_secs_f64());

        let final_delay = if self.add_jitter {
            let jitter = rand::random::<f64>() * config::retry::JITTER_FACTOR * capped_delay;
            capped_delay + jitter
        } else {
            capped_delay
        };

        Duration::from_secs_f64(final_delay)
    }
}

/// Executes an async operation with class-aware retry.
///
/// # Returns
/// The operation's success value, the untouched `RateLimit` error, a
/// `Network` exhaustion error, or an "Unexpected error" wrapper for any
/// other failure class.
pub async fn retry<F, Fut, T>(config: &RetryConfig, mut operation: F) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut attempts = 0;

    loop {
        attempts += 1;

        match operation().await {
            Ok(value) => return Ok(value),
            Err(AppError::RateLimit(msg)) => return Err(AppError::RateLimit(msg)),
            Err(AppError::Network(msg)) if attempts < config.max_attempts => {
                let delay = config.delay_for_attempt(attempts - 1);
                log::warn!(
                    "Attempt {}/{} failed (retrying in {:?}): {}",
                    attempts,
                    config.max_attempts,
                    delay,
                    msg
                );
                tokio::time::sleep(delay).await;
            }
            Err(AppError::Network(msg)) => {
                return Err(AppError::Network(format!(
                    "Failed after {} attempts: {}",
                    config.max_attempts, msg
                )));
            }
            Err(err) => return Err(AppError::Download(format!("Unexpected error: {}", err))),
        }
    }
}
