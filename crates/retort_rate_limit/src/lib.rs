//! Minimum-interval request gate.
//!
//! Enforces a fixed wall-clock interval between consecutive upstream calls,
//! process-wide. Built on the governor crate's GCRA direct limiter with a
//! burst of one, which is exactly a single-slot interval gate: the first
//! call passes immediately, and each subsequent call completes no earlier
//! than one interval after the previous permitted call.
//!
//! The gate is deliberately global rather than per-caller: concurrent
//! callers serialize through the same interval.

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Minimum wall-clock interval between consecutive upstream calls.
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(1);

/// Process-wide gate enforcing a minimum interval between calls.
pub struct IntervalLimiter {
    limiter: Arc<DirectRateLimiter>,
    interval: Duration,
}

impl IntervalLimiter {
    /// Creates a limiter with the default one-second interval.
    pub fn new() -> Self {
        Self::with_interval(MIN_REQUEST_INTERVAL)
    }

    /// Creates a limiter with a custom interval.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    pub fn with_interval(interval: Duration) -> Self {
        let quota = Quota::with_period(interval)
            .expect("interval must be non-zero")
            .allow_burst(NonZeroU32::MIN);
        Self {
            limiter: Arc::new(GovernorRateLimiter::direct(quota)),
            interval,
        }
    }

    /// Waits until the interval since the last permitted call has elapsed,
    /// then claims the next slot.
    pub async fn await_turn(&self) {
        if self.limiter.check().is_ok() {
            return;
        }
        debug!(interval_ms = self.interval.as_millis() as u64, "throttling upstream call");
        self.limiter.until_ready().await;
    }

    /// Claims a slot only if one is available right now.
    pub fn try_turn(&self) -> bool {
        self.limiter.check().is_ok()
    }

    /// The configured minimum interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for IntervalLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn first_turn_is_immediate() {
        let limiter = IntervalLimiter::with_interval(Duration::from_millis(200));

        let start = Instant::now();
        limiter.await_turn().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn consecutive_turns_are_spaced_by_the_interval() {
        let limiter = IntervalLimiter::with_interval(Duration::from_millis(200));

        limiter.await_turn().await;
        let first_done = Instant::now();
        limiter.await_turn().await;

        assert!(first_done.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test]
    async fn spaced_out_turns_are_not_delayed() {
        let limiter = IntervalLimiter::with_interval(Duration::from_millis(100));

        limiter.await_turn().await;
        tokio::time::sleep(Duration::from_millis(150)).await;

        let start = Instant::now();
        limiter.await_turn().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn try_turn_reports_availability() {
        let limiter = IntervalLimiter::with_interval(Duration::from_millis(200));

        assert!(limiter.try_turn());
        assert!(!limiter.try_turn());
    }
}
