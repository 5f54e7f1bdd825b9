//! Retry policy for webhook delivery.

use std::time::Duration;

/// Capped exponential backoff for at-least-once delivery.
///
/// Attempt `n` (1-based) waits `base * 2^(n-1)` before retrying, capped at
/// `max_delay`. Delivery failures never block the triggering business
/// operation; the worker applies this policy and then records the terminal
/// outcome.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts including the first.
    pub max_attempts: u32,

    /// Backoff base.
    pub base: Duration,

    /// Upper bound on a single backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the given attempt cap and backoff base.
    pub fn new(max_attempts: u32, base: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base,
            ..Self::default()
        }
    }

    /// Delay before retrying after the given 1-based attempt, or `None`
    /// when the attempt budget is spent.
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }
        let exp = attempt.saturating_sub(1).min(16);
        let delay = self.base.saturating_mul(1u32 << exp);
        Some(delay.min(self.max_delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_per_attempt() {
        let policy = RetryPolicy::new(4, Duration::from_millis(500));
        assert_eq!(policy.delay_after(1), Some(Duration::from_millis(500)));
        assert_eq!(policy.delay_after(2), Some(Duration::from_millis(1000)));
        assert_eq!(policy.delay_after(3), Some(Duration::from_millis(2000)));
        assert_eq!(policy.delay_after(4), None);
    }

    #[test]
    fn delay_is_capped() {
        let policy = RetryPolicy {
            max_attempts: 20,
            base: Duration::from_secs(10),
            max_delay: Duration::from_secs(30),
        };
        assert_eq!(policy.delay_after(10), Some(Duration::from_secs(30)));
    }

    #[test]
    fn at_least_one_attempt() {
        let policy = RetryPolicy::new(0, Duration::from_millis(100));
        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.delay_after(1), None);
    }
}
