//! Token-bucket rate limiter shared by the HTTP clients.

use std::time::{Duration, Instant};

/// Token-bucket rate limiter.
///
/// Allows up to `capacity` requests per `window`. When the bucket is
/// exhausted, [`acquire`](RateLimiter::acquire) sleeps until the window
/// resets and a token becomes available.
#[derive(Debug)]
pub struct RateLimiter {
    /// Label used in log events.
    name: &'static str,
    /// Maximum tokens in the bucket.
    capacity: u32,
    /// Current available tokens.
    tokens: u32,
    /// Duration of the refill window.
    window: Duration,
    /// When the current window started.
    window_start: Instant,
}

impl RateLimiter {
    /// Create a new rate limiter with the given capacity and window.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(name: &'static str, capacity: u32, window: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            name,
            capacity,
            tokens: capacity,
            window,
            window_start: Instant::now(),
        }
    }

    /// Acquire a single token, sleeping if necessary.
    pub async fn acquire(&mut self) {
        let elapsed = self.window_start.elapsed();
        if elapsed >= self.window {
            self.tokens = self.capacity;
            self.window_start = Instant::now();
        }

        if self.tokens > 0 {
            self.tokens -= 1;
        } else {
            let remaining = self.window.saturating_sub(elapsed);
            tracing::warn!(
                client = self.name,
                sleep_ms = remaining.as_millis() as u64,
                "rate limit reached, sleeping"
            );
            tokio::time::sleep(remaining).await;
            self.tokens = self.capacity - 1;
            self.window_start = Instant::now();
        }
    }

    pub fn available(&self) -> u32 {
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_creation() {
        let rl = RateLimiter::new("jira", 100, Duration::from_secs(60));
        assert_eq!(rl.capacity, 100);
        assert_eq!(rl.available(), 100);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let rl = RateLimiter::new("jira", 0, Duration::from_secs(1));
        assert_eq!(rl.available(), 1);
    }

    #[tokio::test]
    async fn test_rate_limiter_acquire_decrements_tokens() {
        let mut rl = RateLimiter::new("jira", 5, Duration::from_secs(60));
        rl.acquire().await;
        assert_eq!(rl.available(), 4);
        rl.acquire().await;
        assert_eq!(rl.available(), 3);
    }

    #[tokio::test]
    async fn test_rate_limiter_waits_for_next_window() {
        let mut rl = RateLimiter::new("sheets", 1, Duration::from_millis(50));
        rl.acquire().await;
        let start = Instant::now();
        rl.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(40));
        assert_eq!(rl.available(), 0);
    }
}
