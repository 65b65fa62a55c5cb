use retry_backoff::work::{Attempt, Work, async_work_fn, work_fn};
use std::io;

#[test]
fn test_attempt_from_result() {
    assert!(matches!(Attempt::from(Ok::<bool, io::Error>(true)), Attempt::Done));
    assert!(matches!(
        Attempt::from(Ok::<bool, io::Error>(false)),
        Attempt::Pending
    ));

    let failed = Attempt::from(Err::<bool, _>(io::Error::other("refused")));
    assert_eq!(failed.failure().unwrap().to_string(), "refused");
}

#[test]
fn test_attempt_from_pair() {
    assert!(Attempt::from((true, None::<io::Error>)).is_done());
    assert!(matches!(
        Attempt::from((false, None::<io::Error>)),
        Attempt::Pending
    ));
    assert!(matches!(
        Attempt::from((false, Some(io::Error::other("boom")))),
        Attempt::Failed(_)
    ));
}

#[test]
fn test_complete_is_authoritative() {
    let attempt = Attempt::from((true, Some(io::Error::other("ignored"))));
    assert!(attempt.is_done());
    assert!(attempt.failure().is_none());
}

#[test]
fn test_attempt_from_anyhow() {
    let attempt = Attempt::from(Err::<bool, anyhow::Error>(anyhow::anyhow!("wrapped")));
    assert_eq!(attempt.failure().unwrap().to_string(), "wrapped");
}

#[tokio::test]
async fn test_work_fn_invokes_closure_each_attempt() {
    let mut calls = 0;
    let mut work = work_fn(move || {
        calls += 1;
        Ok::<bool, io::Error>(calls == 2)
    });

    assert!(matches!(work.attempt().await, Attempt::Pending));
    assert!(matches!(work.attempt().await, Attempt::Done));
}

#[tokio::test]
async fn test_async_work_fn() {
    let mut work = async_work_fn(|| async {
        tokio::task::yield_now().await;
        Err::<bool, io::Error>(io::Error::other("unreachable host"))
    });

    let attempt = work.attempt().await;
    assert_eq!(attempt.failure().unwrap().to_string(), "unreachable host");
}

#[tokio::test]
async fn test_boxed_dyn_work() {
    let mut work: Box<dyn Work> = Box::new(work_fn(|| Attempt::Pending));
    assert!(matches!(work.attempt().await, Attempt::Pending));
}
