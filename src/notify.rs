/// Notification sink for backoff status changes
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Receives the status notifications emitted by the backoff loop.
///
/// The loop decides *when* to notify; implementors decide where the
/// notification goes.
pub trait Reporter: Send + Sync {
    /// An attempt failed and the loop is backing off for `delay`.
    fn warn(&self, label: &str, delay: Duration, error: &anyhow::Error);

    /// The work succeeded, either on the first attempt or after errors.
    fn info(&self, label: &str);
}

/// Default reporter, writes to the `tracing` log stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn warn(&self, label: &str, delay: Duration, error: &anyhow::Error) {
        warn!("Error {}, backing off {:?}: {:#}", label, delay, error);
    }

    fn info(&self, label: &str) {
        info!("Success {}", label);
    }
}

impl<R> Reporter for Arc<R>
where
    R: Reporter + ?Sized,
{
    fn warn(&self, label: &str, delay: Duration, error: &anyhow::Error) {
        (**self).warn(label, delay, error)
    }

    fn info(&self, label: &str) {
        (**self).info(label)
    }
}
