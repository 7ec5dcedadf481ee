//! Request pacing for the storefront crawler.
//!
//! The crawl is strictly sequential and the only politeness mechanism is a
//! fixed pause after every request that produced an HTTP response, whatever
//! its status. There is no retry and no backoff: a failed URL is reported and
//! the crawl moves on.

use std::time::Duration;

/// Fixed post-response delay.
///
/// | Outcome of the request | Pause? |
/// |------------------------|--------|
/// | 2xx response | yes |
/// | non-2xx response | yes |
/// | connect/TLS/timeout failure (no response) | no |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    #[must_use]
    pub fn from_millis(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// No pause at all. Intended for tests against a local mock server.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleeps for the configured delay. Returns immediately when disabled.
    pub(crate) async fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        tracing::trace!(delay_ms = self.delay.as_millis(), "throttling before next request");
        tokio::time::sleep(self.delay).await;
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::from_millis(500)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn default_is_half_a_second() {
        assert_eq!(Throttle::default().delay(), Duration::from_millis(500));
    }

    #[tokio::test]
    async fn disabled_returns_immediately() {
        let started = Instant::now();
        Throttle::disabled().pause().await;
        assert!(started.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn pause_waits_at_least_the_delay() {
        let throttle = Throttle::from_millis(30);
        let started = Instant::now();
        throttle.pause().await;
        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
