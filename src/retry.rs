// file: src/retry.rs
// description: shared retry and back-off policy for external API calls
// reference: exponential back-off with per-sleep and rate-limit ceilings

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Back-off schedule shared by the search fetcher and the completion caller.
///
/// The policy itself is immutable; each call walks its own delay sequence
/// starting from `initial_delay`. Transient failures consume retries. 429
/// responses do not: they are bounded instead by `rate_limit_wait_cap`,
/// the total wall-clock a single call may spend sleeping on rate limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub backoff_multiplier: f64,
    pub max_delay_ms: u64,
    pub rate_limit_wait_cap_ms: u64,
}

impl RetryPolicy {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    pub fn rate_limit_wait_cap(&self) -> Duration {
        Duration::from_millis(self.rate_limit_wait_cap_ms)
    }

    /// Next delay after `current`, doubled (or whatever the multiplier says)
    /// and clamped to `max_delay`.
    pub fn next_delay(&self, current: Duration) -> Duration {
        let scaled = current.as_millis() as f64 * self.backoff_multiplier;
        let capped = scaled.min(self.max_delay_ms as f64);
        Duration::from_millis(capped as u64)
    }

    /// The full delay sequence a call would sleep through if every attempt
    /// failed. Exposed for tests and for logging expected worst-case waits.
    pub fn delay_sequence(&self, attempts: usize) -> Vec<Duration> {
        let mut delays = Vec::with_capacity(attempts);
        let mut current = self.initial_delay();
        for _ in 0..attempts {
            delays.push(current);
            current = self.next_delay(current);
        }
        delays
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 1_000,
            backoff_multiplier: 2.0,
            max_delay_ms: 30_000,
            rate_limit_wait_cap_ms: 60_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_delay_doubles_until_capped() {
        let policy = RetryPolicy::default();
        let delays = policy.delay_sequence(8);

        let expected: Vec<Duration> = [1, 2, 4, 8, 16, 30, 30, 30]
            .iter()
            .map(|s| Duration::from_secs(*s))
            .collect();
        assert_eq!(delays, expected);
    }

    #[test]
    fn test_next_delay_respects_multiplier() {
        let policy = RetryPolicy {
            backoff_multiplier: 3.0,
            max_delay_ms: 100_000,
            ..RetryPolicy::default()
        };

        assert_eq!(
            policy.next_delay(Duration::from_secs(2)),
            Duration::from_secs(6)
        );
    }

    #[test]
    fn test_fresh_sequence_per_call() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_sequence(2), policy.delay_sequence(2));
        assert_eq!(policy.delay_sequence(1)[0], policy.initial_delay());
    }
}
