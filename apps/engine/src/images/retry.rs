//! Retry policy for vendor calls, kept as data so the schedule and the
//! retryable predicate are testable without a pipeline.

use std::time::Duration;

use crate::images::GenerationError;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Backoff after failed attempt `attempt` (1-based): doubles each time.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }

    /// Whether failed attempt `attempt` should be followed by another.
    pub fn should_retry(&self, attempt: u32, error: &GenerationError) -> bool {
        attempt < self.max_attempts && error.is_retryable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_from_base() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_delay(1), Duration::from_secs(1));
        assert_eq!(policy.backoff_delay(2), Duration::from_secs(2));
        assert_eq!(policy.backoff_delay(3), Duration::from_secs(4));
    }

    #[test]
    fn retryable_errors_exhaust_attempts() {
        let policy = RetryPolicy::default();
        let err = GenerationError::Timeout;
        assert!(policy.should_retry(1, &err));
        assert!(policy.should_retry(2, &err));
        assert!(!policy.should_retry(3, &err));
    }

    #[test]
    fn rejections_are_never_retried() {
        let policy = RetryPolicy::default();
        let err = GenerationError::Rejected { status: 401 };
        assert!(!policy.should_retry(1, &err));
    }
}
