//! Linear backoff retry policy.

use shortscript_error::{ConfigError, ShortscriptResult};
use std::time::Duration;

/// How many times a provider call is attempted and how long to wait between attempts.
///
/// The delay before attempt `i` (1-indexed) is `base_delay * (i - 1)`, so the
/// default policy waits 2 s before the second attempt and 4 s before the third.
///
/// # Examples
///
/// ```
/// use shortscript_rate_limit::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// let delays: Vec<Duration> = policy.backoff().collect();
/// assert_eq!(delays, vec![Duration::from_millis(2000), Duration::from_millis(4000)]);
///
/// assert!(RetryPolicy::new(0, Duration::from_secs(1)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Attempts made when nothing is configured.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Backoff unit when nothing is configured.
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(2000);

    /// Create a policy.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `max_attempts` is zero.
    #[track_caller]
    pub fn new(max_attempts: u32, base_delay: Duration) -> ShortscriptResult<Self> {
        if max_attempts == 0 {
            return Err(ConfigError::new("retry max_attempts must be at least 1").into());
        }
        Ok(Self {
            max_attempts,
            base_delay,
        })
    }

    /// A policy that makes exactly one attempt.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
        }
    }

    /// Total attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Backoff unit.
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Delay to wait before the given 1-indexed attempt.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt.saturating_sub(1))
    }

    /// The delays between attempts, in order. Yields `max_attempts - 1` items.
    pub fn backoff(&self) -> LinearBackoff {
        LinearBackoff {
            base: self.base_delay,
            step: 1,
            remaining: self.max_attempts - 1,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            base_delay: Self::DEFAULT_BASE_DELAY,
        }
    }
}

/// Iterator of linearly growing delays: `base, 2 * base, 3 * base, ...`.
#[derive(Debug, Clone)]
pub struct LinearBackoff {
    base: Duration,
    step: u32,
    remaining: u32,
}

impl Iterator for LinearBackoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let delay = self.base.saturating_mul(self.step);
        self.step += 1;
        Some(delay)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LinearBackoff {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_before_matches_backoff() {
        let policy = RetryPolicy::new(5, Duration::from_millis(100)).unwrap();
        let delays: Vec<Duration> = policy.backoff().collect();

        assert_eq!(delays.len(), 4);
        for (i, delay) in delays.iter().enumerate() {
            assert_eq!(*delay, policy.delay_before(i as u32 + 2));
        }
        assert_eq!(policy.delay_before(1), Duration::ZERO);
    }

    #[test]
    fn delays_are_non_decreasing() {
        let delays: Vec<Duration> = RetryPolicy::new(6, Duration::from_secs(2))
            .unwrap()
            .backoff()
            .collect();
        assert!(delays.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn no_retry_has_no_delays() {
        assert_eq!(RetryPolicy::no_retry().backoff().count(), 0);
        assert_eq!(RetryPolicy::no_retry().max_attempts(), 1);
    }
}
