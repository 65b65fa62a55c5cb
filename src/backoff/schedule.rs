//! Backoff delay schedule
//!
//! Pure state machine behind the retry loop: tracks the current delay and
//! whether the next outcome should be reported. No timers involved.

use std::time::Duration;

/// Delay for the given number of consecutive failures, starting from
/// `initial` and doubling each time, capped at `max`.
///
/// Standalone helper for computing a delay up front; [`Schedule`] tracks the
/// same progression step by step and does not call it.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use retry_backoff::backoff::schedule::exponential_delay;
///
/// let initial = Duration::from_secs(1);
/// let max = Duration::from_secs(4);
/// assert_eq!(exponential_delay(initial, max, 1), Duration::from_secs(2));
/// assert_eq!(exponential_delay(initial, max, 5), Duration::from_secs(4));
/// ```
pub fn exponential_delay(initial: Duration, max: Duration, failures: u32) -> Duration {
    let factor = 1u32.checked_shl(failures).unwrap_or(u32::MAX);
    initial.saturating_mul(factor).min(max)
}

/// Result of feeding one attempt outcome into a [`Schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// How long to wait before the next attempt.
    pub delay: Duration,
    /// Whether this outcome should be reported.
    pub notify: bool,
}

#[derive(Debug, Clone)]
pub struct Schedule {
    initial: Duration,
    max: Duration,
    current: Duration,
    should_notify: bool,
}

impl Schedule {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max,
            current: initial,
            should_notify: true,
        }
    }

    /// Delay that will be used for the next wait.
    pub fn current(&self) -> Duration {
        self.current
    }

    /// Record the outcome of an incomplete attempt and compute the next step.
    ///
    /// A failure doubles the delay. Once doubling would pass `max` the delay
    /// is clamped and the failure is not reported. A non-failure resets the
    /// delay to `initial` and is reported only when it follows a failure, or
    /// when it is the very first outcome.
    pub fn advance(&mut self, failed: bool) -> Step {
        if failed {
            self.current = self.current.saturating_mul(2);
            self.should_notify = true;
            if self.current > self.max {
                self.current = self.max;
                self.should_notify = false;
            }
        } else {
            self.current = self.initial;
        }

        let notify = self.should_notify;
        // Any failure, even a suppressed one, arms reporting of what comes next.
        self.should_notify = failed;

        Step {
            delay: self.current,
            notify,
        }
    }
}
