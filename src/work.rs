//! Work-function contract driven by the backoff loop.
//!
//! A unit of work reports one of three outcomes per invocation: it finished,
//! it is not finished yet but nothing went wrong, or the attempt failed.

use async_trait::async_trait;
use std::future::Future;

/// Outcome of a single invocation of the work function.
#[derive(Debug)]
pub enum Attempt {
    /// The work is complete; the loop exits without waiting.
    Done,
    /// Not complete, but the attempt was not an error. Backoff resets.
    Pending,
    /// The attempt failed. Backoff grows.
    Failed(anyhow::Error),
}

impl Attempt {
    pub fn is_done(&self) -> bool {
        matches!(self, Attempt::Done)
    }

    pub fn failure(&self) -> Option<&anyhow::Error> {
        match self {
            Attempt::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// `Ok(true)` is done, `Ok(false)` is pending, `Err` is a failed attempt.
impl<E> From<Result<bool, E>> for Attempt
where
    E: Into<anyhow::Error>,
{
    fn from(result: Result<bool, E>) -> Self {
        match result {
            Ok(true) => Attempt::Done,
            Ok(false) => Attempt::Pending,
            Err(e) => Attempt::Failed(e.into()),
        }
    }
}

/// `(complete, failure)` pairs. `complete` wins when both are set.
impl<E> From<(bool, Option<E>)> for Attempt
where
    E: Into<anyhow::Error>,
{
    fn from((complete, failure): (bool, Option<E>)) -> Self {
        match (complete, failure) {
            (true, _) => Attempt::Done,
            (false, None) => Attempt::Pending,
            (false, Some(e)) => Attempt::Failed(e.into()),
        }
    }
}

/// A unit of work retried by [`crate::Backoff`].
#[async_trait]
pub trait Work: Send {
    async fn attempt(&mut self) -> Attempt;
}

#[async_trait]
impl<W> Work for Box<W>
where
    W: Work + ?Sized,
{
    async fn attempt(&mut self) -> Attempt {
        (**self).attempt().await
    }
}

/// Adapter for synchronous closures, see [`work_fn`].
pub struct WorkFn<F>(F);

/// Wrap a blocking closure as [`Work`].
///
/// The closure runs inline on the loop's task, so it blocks that task for as
/// long as it takes.
///
/// ```
/// use retry_backoff::work::{work_fn, Work, Attempt};
///
/// let mut calls = 0;
/// let mut work = work_fn(move || {
///     calls += 1;
///     Ok::<bool, std::io::Error>(calls >= 3)
/// });
/// let attempt = tokio_test::block_on(work.attempt());
/// assert!(matches!(attempt, Attempt::Pending));
/// ```
pub fn work_fn<F, T>(f: F) -> WorkFn<F>
where
    F: FnMut() -> T + Send,
    T: Into<Attempt> + 'static,
{
    WorkFn(f)
}

#[async_trait]
impl<F, T> Work for WorkFn<F>
where
    F: FnMut() -> T + Send,
    T: Into<Attempt> + 'static,
{
    async fn attempt(&mut self) -> Attempt {
        (self.0)().into()
    }
}

/// Adapter for closures returning futures, see [`async_work_fn`].
pub struct AsyncWorkFn<F>(F);

/// Wrap a closure returning a future as [`Work`].
pub fn async_work_fn<F, Fut, T>(f: F) -> AsyncWorkFn<F>
where
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = T> + Send + 'static,
    T: Into<Attempt> + 'static,
{
    AsyncWorkFn(f)
}

#[async_trait]
impl<F, Fut, T> Work for AsyncWorkFn<F>
where
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = T> + Send + 'static,
    T: Into<Attempt> + 'static,
{
    async fn attempt(&mut self) -> Attempt {
        (self.0)().await.into()
    }
}
