//! # Mailbox Retry Policy
//!
//! An actor's mailbox is bounded. When it is full the client does not queue indefinitely: it
//! retries the send a bounded number of times with exponential backoff and then reports
//! [`FrameworkError::Busy`](crate::FrameworkError::Busy), so the caller can retry the whole
//! request later.

use std::time::Duration;

/// How many times, and how patiently, a client retries a send into a full mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total send attempts, including the first. Always at least 1.
    pub attempts: u32,
    /// Delay after the first failed attempt; doubled after every further failure.
    pub base_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, base_backoff: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            base_backoff,
        }
    }

    /// A policy that gives up as soon as the mailbox is full.
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Delay to wait after `failed_attempt` (1-based) before trying again.
    pub fn backoff(&self, failed_attempt: u32) -> Duration {
        let shift = failed_attempt.saturating_sub(1).min(16);
        self.base_backoff.saturating_mul(1 << shift)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_millis(5))
    }
}
