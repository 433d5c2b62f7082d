//! Reconnect policy.
//!
//! Independent of the relay protocol: it only decides how long to wait
//! before the next connection attempt and when to give up.

use std::time::Duration;

/// Exponential backoff with an upper bound on the delay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// `None` retries forever
    pub max_attempts: Option<u32>,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: None,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based), or `None` to give up.
    pub fn delay_for(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 {
            return Some(Duration::ZERO);
        }
        if self.max_attempts.is_some_and(|max| attempt > max) {
            return None;
        }
        let factor = self.multiplier.saturating_pow(attempt - 1);
        Some(self.initial_delay.saturating_mul(factor).min(self.max_delay))
    }
}
