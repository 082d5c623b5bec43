//! Pacing between ticker lookups.
//!
//! The scan calls `pause()` once after every processed ticker. The free Alpha
//! Vantage tier allows a handful of calls per minute, and every ticker costs one
//! call per oscillator configuration plus one for prices.

use std::thread;
use std::time::Duration;

/// Blocks the scan between tickers.
pub trait RateLimiter: Send {
    fn pause(&mut self);
}

/// Sleeps for a fixed duration on every pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl RateLimiter for FixedDelay {
    fn pause(&mut self) {
        if !self.delay.is_zero() {
            tracing::debug!(delay_ms = self.delay.as_millis() as u64, "rate limit pause");
            thread::sleep(self.delay);
        }
    }
}

/// Never waits. For offline sources and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unthrottled;

impl RateLimiter for Unthrottled {
    fn pause(&mut self) {}
}
