//! Scheduler timing and retry policy

use std::time::Duration;

/// Debounce and retry policy for conversion jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Quiet period after the last touch before the first attempt (default: 500ms)
    pub debounce: Duration,

    /// Wait between attempts that hit a locked file (default: 300ms)
    pub retry_delay: Duration,

    /// Total conversion attempts per job, including the first (default: 5)
    pub max_attempts: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            retry_delay: Duration::from_millis(300),
            max_attempts: 5,
        }
    }
}

impl SchedulerConfig {
    /// Override the debounce window
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Override the delay between retries
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Override the attempt budget (clamped to at least one attempt)
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }
}
