pub mod backoff;
pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
pub mod stats;
pub mod work;

// Re-export commonly used types for convenience
pub use backoff::{Backoff, State, StopHandle};
pub use config::{BackoffConfig, LoggingConfig, Settings};
pub use notify::{Reporter, TracingReporter};
pub use work::{Attempt, Work, async_work_fn, work_fn};
