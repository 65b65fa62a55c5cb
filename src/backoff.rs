//! Retry loop with exponential backoff
//!
//! [`Backoff`] calls a unit of work until it reports completion, sleeping
//! between attempts. Failures double the delay up to a cap; a non-failing,
//! incomplete attempt resets it. Once the delay is saturated, further failures
//! are not reported until the work recovers.
//!
//! ```no_run
//! use retry_backoff::{Backoff, work_fn};
//! use std::time::Duration;
//!
//! # async fn run() {
//! let (backoff, stop) = Backoff::new(work_fn(|| Ok::<bool, std::io::Error>(false)), "syncing peers");
//! let backoff = backoff.with_initial_backoff(Duration::from_millis(500));
//! let task = backoff.spawn();
//! // ...
//! stop.stop().await;
//! task.await.unwrap();
//! # }
//! ```

pub mod schedule;

use crate::config::BackoffConfig;
use crate::notify::{Reporter, TracingReporter};
use crate::stats::BackoffStats;
use crate::work::{Attempt, Work};
use schedule::Schedule;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tracing::debug;

pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Lifecycle of a backoff loop. `Terminated` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Running,
    Terminated,
}

/// A single-use retry loop around a unit of work.
///
/// Created idle by [`Backoff::new`], configured through the setters, then
/// consumed by [`Backoff::start`] (or [`Backoff::spawn`]).
pub struct Backoff<W, R = TracingReporter> {
    work: W,
    label: String,
    initial_backoff: Duration,
    max_backoff: Duration,
    reporter: R,
    stats: BackoffStats,
    quit: Arc<Notify>,
    state: watch::Sender<State>,
}

/// Stops a running [`Backoff`] and waits for it to exit.
///
/// Returned once by [`Backoff::new`]. Not `Clone`: the stop request can only
/// be raised once.
#[derive(Debug)]
pub struct StopHandle {
    quit: Arc<Notify>,
    state: watch::Receiver<State>,
}

impl<W> Backoff<W>
where
    W: Work,
{
    /// Create an idle loop with 10s initial and 60s max backoff, reporting
    /// through `tracing`.
    pub fn new(work: W, label: impl Into<String>) -> (Self, StopHandle) {
        let quit = Arc::new(Notify::new());
        let (state_tx, state_rx) = watch::channel(State::Idle);

        let backoff = Self {
            work,
            label: label.into(),
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
            reporter: TracingReporter,
            stats: BackoffStats::new(),
            quit: Arc::clone(&quit),
            state: state_tx,
        };
        let handle = StopHandle {
            quit,
            state: state_rx,
        };
        (backoff, handle)
    }
}

impl<W, R> Backoff<W, R>
where
    W: Work,
    R: Reporter,
{
    pub fn set_initial_backoff(&mut self, d: Duration) {
        self.initial_backoff = d;
    }

    pub fn set_max_backoff(&mut self, d: Duration) {
        self.max_backoff = d;
    }

    pub fn with_initial_backoff(mut self, d: Duration) -> Self {
        self.set_initial_backoff(d);
        self
    }

    pub fn with_max_backoff(mut self, d: Duration) -> Self {
        self.set_max_backoff(d);
        self
    }

    /// Apply both delays from a loaded config section.
    pub fn with_config(self, config: &BackoffConfig) -> Self {
        self.with_initial_backoff(config.initial_backoff())
            .with_max_backoff(config.max_backoff())
    }

    /// Replace the notification sink.
    pub fn with_reporter<R2: Reporter>(self, reporter: R2) -> Backoff<W, R2> {
        Backoff {
            work: self.work,
            label: self.label,
            initial_backoff: self.initial_backoff,
            max_backoff: self.max_backoff,
            reporter,
            stats: self.stats,
            quit: self.quit,
            state: self.state,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn initial_backoff(&self) -> Duration {
        self.initial_backoff
    }

    pub fn max_backoff(&self) -> Duration {
        self.max_backoff
    }

    /// Shared counters, updated while the loop runs.
    pub fn stats(&self) -> BackoffStats {
        self.stats.clone()
    }

    /// Run the loop until the work completes or a stop is requested.
    ///
    /// Consumes the controller, so it can only run once.
    pub async fn start(self) {
        let Backoff {
            mut work,
            label,
            initial_backoff,
            max_backoff,
            reporter,
            stats,
            quit,
            state,
        } = self;

        state.send_replace(State::Running);
        let _terminated = TerminateOnDrop(state);
        debug!(
            "Backoff {} started (initial {:?}, max {:?})",
            label, initial_backoff, max_backoff
        );

        let mut schedule = Schedule::new(initial_backoff, max_backoff);
        loop {
            let failure = match work.attempt().await {
                Attempt::Done => {
                    stats.record_attempt(None);
                    debug!("Backoff {} complete", label);
                    return;
                }
                Attempt::Pending => None,
                Attempt::Failed(e) => Some(e),
            };
            stats.record_attempt(Some(failure.is_some()));

            let step = schedule.advance(failure.is_some());
            stats.set_current_delay(step.delay);

            if step.notify {
                stats.record_notification();
                match &failure {
                    Some(e) => reporter.warn(&label, step.delay, e),
                    None => reporter.info(&label),
                }
            } else if failure.is_some() {
                stats.record_suppressed();
            }

            tokio::select! {
                biased;
                _ = quit.notified() => {
                    debug!("Backoff {} stopped", label);
                    return;
                }
                _ = tokio::time::sleep(step.delay) => {}
            }
        }
    }

    /// Run the loop on a new tokio task.
    pub fn spawn(self) -> JoinHandle<()>
    where
        W: 'static,
        R: 'static,
    {
        tokio::spawn(self.start())
    }
}

impl StopHandle {
    /// Request the loop to stop and wait until it has exited.
    ///
    /// An attempt already in progress runs to completion first. Returns
    /// immediately if the loop already terminated or was dropped unstarted.
    pub async fn stop(mut self) {
        // Stored as a permit when the loop is not waiting yet
        self.quit.notify_one();
        self.terminated().await;
    }

    /// Wait for the loop to exit without requesting it.
    pub async fn terminated(&mut self) {
        let _ = self
            .state
            .wait_for(|state| *state == State::Terminated)
            .await
            .map(|_| ());
    }

    pub fn state(&self) -> State {
        *self.state.borrow()
    }

    /// True once the loop has exited, or can no longer run because the
    /// controller was dropped.
    pub fn is_terminated(&self) -> bool {
        self.state() == State::Terminated || self.state.has_changed().is_err()
    }
}

/// Publishes `Terminated` when the loop exits. Also covers a panicking work
/// function, but only with `panic = "unwind"`; the release profile aborts.
struct TerminateOnDrop(watch::Sender<State>);

impl Drop for TerminateOnDrop {
    fn drop(&mut self) {
        self.0.send_replace(State::Terminated);
    }
}
