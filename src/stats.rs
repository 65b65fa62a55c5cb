use serde::Serialize;
use std::sync::Arc;
/// Attempt and notification counters for a backoff loop
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Counters updated by a running backoff loop
#[derive(Clone, Debug)]
pub struct BackoffStats {
    /// Total number of work invocations
    pub attempts: Arc<AtomicU64>,
    /// Invocations that reported a failure
    pub failures: Arc<AtomicU64>,
    /// Invocations that were neither complete nor failed
    pub pending: Arc<AtomicU64>,
    /// Notifications handed to the reporter
    pub notifications: Arc<AtomicU64>,
    /// Failures not reported because backoff was saturated
    pub suppressed: Arc<AtomicU64>,
    /// Delay chosen for the most recent wait, in milliseconds
    pub current_delay_ms: Arc<AtomicU64>,
}

impl Default for BackoffStats {
    fn default() -> Self {
        Self::new()
    }
}

impl BackoffStats {
    pub fn new() -> Self {
        Self {
            attempts: Arc::new(AtomicU64::new(0)),
            failures: Arc::new(AtomicU64::new(0)),
            pending: Arc::new(AtomicU64::new(0)),
            notifications: Arc::new(AtomicU64::new(0)),
            suppressed: Arc::new(AtomicU64::new(0)),
            current_delay_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record a work invocation. `failed` is `None` for a completed attempt.
    pub fn record_attempt(&self, failed: Option<bool>) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        match failed {
            Some(true) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
            }
            Some(false) => {
                self.pending.fetch_add(1, Ordering::Relaxed);
            }
            None => {}
        }
    }

    pub fn record_notification(&self) {
        self.notifications.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_suppressed(&self) {
        self.suppressed.fetch_add(1, Ordering::Relaxed);
    }

    /// Delays past `u64::MAX` milliseconds are stored as `u64::MAX`.
    pub fn set_current_delay(&self, delay: Duration) {
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.current_delay_ms.store(delay_ms, Ordering::Relaxed);
    }

    /// Get current counters snapshot
    pub fn snapshot(&self) -> StatsSnapshot {
        let attempts = self.attempts.load(Ordering::Relaxed);
        let failures = self.failures.load(Ordering::Relaxed);

        StatsSnapshot {
            attempts,
            failures,
            pending: self.pending.load(Ordering::Relaxed),
            notifications: self.notifications.load(Ordering::Relaxed),
            suppressed: self.suppressed.load(Ordering::Relaxed),
            current_delay_ms: self.current_delay_ms.load(Ordering::Relaxed),
            failure_rate: if attempts > 0 {
                (failures as f64 / attempts as f64) * 100.0
            } else {
                0.0
            },
        }
    }
}

/// Snapshot of backoff counters
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub attempts: u64,
    pub failures: u64,
    pub pending: u64,
    pub notifications: u64,
    pub suppressed: u64,
    pub current_delay_ms: u64,
    pub failure_rate: f64,
}

impl StatsSnapshot {
    pub fn current_delay(&self) -> Duration {
        Duration::from_millis(self.current_delay_ms)
    }
}
