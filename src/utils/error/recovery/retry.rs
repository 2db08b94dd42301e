//! Retry policy with exponential backoff

use std::time::Duration;
use tracing::debug;

/// Default number of execution rounds a batch may run
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
/// Default exponential multiplier
pub const DEFAULT_BACKOFF_MULTIPLIER: Duration = Duration::from_secs(1);
/// Default lower bound for a single wait
pub const DEFAULT_BACKOFF_MIN: Duration = Duration::from_secs(1);
/// Default upper bound for a single wait
pub const DEFAULT_BACKOFF_MAX: Duration = Duration::from_secs(10);

/// Bounded retry policy handed to a batch when it is created.
///
/// The wait after attempt `n` is `multiplier * 2^(n-1)`, clamped to
/// `[backoff_min, backoff_max]`. With the defaults that is 1, 2, 4, 8, 10, 10...
/// seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of execution rounds, including the first one
    pub max_attempts: u32,
    /// Exponential multiplier
    pub backoff_multiplier: Duration,
    /// Minimum wait between rounds
    pub backoff_min: Duration,
    /// Maximum wait between rounds
    pub backoff_max: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
            backoff_min: DEFAULT_BACKOFF_MIN,
            backoff_max: DEFAULT_BACKOFF_MAX,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the default backoff and the given attempt budget
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// Default attempt budget without any wait between rounds
    pub fn no_wait() -> Self {
        Self::default().with_backoff(Duration::ZERO, Duration::ZERO, Duration::ZERO)
    }

    /// Set the attempt budget
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the backoff parameters
    pub fn with_backoff(mut self, multiplier: Duration, min: Duration, max: Duration) -> Self {
        self.backoff_multiplier = multiplier;
        self.backoff_min = min;
        self.backoff_max = max;
        self
    }

    /// Wait to apply after the given (1-based) attempt
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.max(1) - 1;
        let factor = 2u32.checked_pow(exponent).unwrap_or(u32::MAX);
        let delay = self
            .backoff_multiplier
            .checked_mul(factor)
            .unwrap_or(Duration::MAX);

        // min takes precedence over max when they are inverted
        delay.min(self.backoff_max).max(self.backoff_min)
    }

    /// Whether another round may run after `attempt` rounds
    pub fn has_attempts_left(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Suspend the current task for the backoff of the given attempt
    pub async fn wait(&self, attempt: u32) {
        let delay = self.backoff(attempt);
        if delay.is_zero() {
            return;
        }

        debug!("Waiting {:?} before attempt {}", delay, attempt + 1);
        tokio::time::sleep(delay).await;
    }
}
