use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::core::config;

/// Sliding-window rate limiter for outgoing Instagram requests.
///
/// Keeps the timestamps of recent requests; when the window is saturated,
/// `acquire` sleeps until the oldest request has left the window, then
/// starts a fresh window. Consulted once per extraction job, before any
/// network traffic.
#[derive(Clone)]
pub struct RateLimiter {
    /// Timestamps of requests made inside the current window
    timestamps: Arc<Mutex<Vec<Instant>>>,
    /// Maximum requests per window
    max_requests: usize,
    /// Window length
    window: Duration,
}

impl RateLimiter {
    /// Creates a rate limiter with the configured defaults
    /// (30 requests per 60 seconds).
    pub fn new() -> Self {
        Self::with_limits(config::rate_limit::MAX_REQUESTS, config::rate_limit::window())
    }

    /// Creates a rate limiter with custom limits.
    pub fn with_limits(max_requests: usize, window: Duration) -> Self {
        Self {
            timestamps: Arc::new(Mutex::new(Vec::new())),
            max_requests,
            window,
        }
    }

    /// Waits until a request slot is available, then claims it.
    ///
    /// Requests older than the window are pruned first. If the window is
    /// still full, sleeps until the oldest entry expires (plus a small
    /// buffer) and resets the window.
    pub async fn acquire(&self) {
        let mut timestamps = self.timestamps.lock().await;
        let now = Instant::now();
        timestamps.retain(|&t| now.duration_since(t) < self.window);

        if timestamps.len() >= self.max_requests {
            if let Some(oldest) = timestamps.iter().min().copied() {
                let wait = self.window.saturating_sub(now.duration_since(oldest));
                log::info!(
                    "Rate limit reached ({} requests), waiting {:.1}s",
                    self.max_requests,
                    wait.as_secs_f64()
                );
                tokio::time::sleep(wait + config::rate_limit::wait_buffer()).await;
                timestamps.clear();
            }
        }

        timestamps.push(Instant::now());
    }

    /// Number of requests currently recorded in the window.
    pub async fn current_usage(&self) -> usize {
        let timestamps = self.timestamps.lock().await;
        let now = Instant::now();
        timestamps
            .iter()
            .filter(|&&t| now.duration_since(t) < self.window)
            .count()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
