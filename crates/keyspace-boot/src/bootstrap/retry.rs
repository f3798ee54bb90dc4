use std::time::Duration;

/// Verification retries performed after a repair.
pub const DEFAULT_RETRY_ATTEMPTS: usize = 10;

/// Delay growth per retry.
pub const DEFAULT_RETRY_STEP: Duration = Duration::from_millis(1_200);

/// Linear backoff for post-repair verification.
///
/// Retry `index` (0-based) waits `index * step` before probing, so the first
/// retry is immediate and the default schedule waits 54 s in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: usize,
    step: Duration,
}

impl RetryPolicy {
    /// Builds a policy with `attempts` retries spaced by multiples of `step`.
    #[must_use]
    pub const fn new(attempts: usize, step: Duration) -> Self {
        Self { attempts, step }
    }

    /// Number of retries.
    #[must_use]
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    /// Delay before retry `index`.
    #[must_use]
    pub fn delay(&self, index: usize) -> Duration {
        self.step
            .saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Delays for every retry, in order.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        (0..self.attempts).map(|index| self.delay(index))
    }

    /// Sum of all retry delays.
    #[must_use]
    pub fn total_wait(&self) -> Duration {
        self.delays().fold(Duration::ZERO, Duration::saturating_add)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_STEP)
    }
}
