//! Retry configuration for rate-limited API calls.
//!
//! Only HTTP 429 responses are retried. The delay starts at `initial_backoff`
//! and doubles after every rate-limited attempt unless the server supplies a
//! `Retry-After` hint for that attempt.

use crate::error::ConfigError;
use std::time::Duration;

/// Maximum retries accepted from configuration
pub const MAX_RETRIES: u32 = 10;

/// Retries attempted after the first rate-limited response
pub const DEFAULT_RETRIES: u32 = 3;

/// Wait before the first retry
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(1000);

/// Configuration for retry behavior on rate-limited requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (0 = try once)
    pub retries: u32,
    /// Delay before the first retry
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
        }
    }
}

impl RetryPolicy {
    /// Create a policy from a retry count and initial backoff
    pub fn new(retries: u32, initial_backoff: Duration) -> Self {
        Self {
            retries,
            initial_backoff,
        }
    }

    /// Validate retry counts are reasonable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retries > MAX_RETRIES {
            return Err(ConfigError::TooManyRetries {
                retries: self.retries,
                max: MAX_RETRIES,
            });
        }
        Ok(())
    }

    /// Total attempts including the first request
    pub fn max_attempts(&self) -> u32 {
        self.retries + 1
    }

    /// Fresh backoff state for one logical request
    pub fn backoff(&self) -> Backoff {
        Backoff {
            current: self.initial_backoff,
        }
    }
}

/// Exponential backoff state for a single request
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    current: Duration,
}

impl Backoff {
    /// Delay for the next wait; a server hint overrides the computed backoff
    pub fn delay(&self, retry_after: Option<Duration>) -> Duration {
        retry_after.unwrap_or(self.current)
    }

    /// Double the backoff after a rate-limited attempt
    pub fn advance(&mut self) {
        self.current = self.current.saturating_mul(2);
    }
}

/// Parse a `Retry-After` header given in whole seconds
///
/// HTTP-date values and garbage yield `None` so the computed backoff applies.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.retries, 3);
        assert_eq!(policy.initial_backoff, Duration::from_millis(1000));
        assert_eq!(policy.max_attempts(), 4);
    }

    #[test]
    fn test_backoff_doubles() {
        let mut backoff = RetryPolicy::default().backoff();
        let mut delays = Vec::new();
        for _ in 0..3 {
            delays.push(backoff.delay(None));
            backoff.advance();
        }
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(1000),
                Duration::from_millis(2000),
                Duration::from_millis(4000)
            ]
        );
    }

    #[test]
    fn test_retry_after_overrides_single_wait() {
        let mut backoff = RetryPolicy::default().backoff();
        assert_eq!(
            backoff.delay(Some(Duration::from_secs(7))),
            Duration::from_secs(7)
        );
        backoff.advance();
        // Hint does not reset the doubling sequence
        assert_eq!(backoff.delay(None), Duration::from_millis(2000));
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after("5"), Some(Duration::from_secs(5)));
        assert_eq!(parse_retry_after(" 0 "), Some(Duration::ZERO));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
        assert_eq!(parse_retry_after("-1"), None);
    }

    #[test]
    fn test_validate_clamps_retries() {
        assert!(RetryPolicy::new(MAX_RETRIES, Duration::ZERO).validate().is_ok());
        assert!(matches!(
            RetryPolicy::new(MAX_RETRIES + 1, Duration::ZERO).validate(),
            Err(ConfigError::TooManyRetries { retries: 11, max: 10 })
        ));
    }
}
