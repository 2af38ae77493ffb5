//! Abstraction over where detached background work runs.
//!
//! Click accounting is fire-and-forget relative to the redirect response. The
//! service hands the job to a [`TaskSpawner`]; production uses
//! [`crate::infrastructure::tasks::TokioSpawner`], tests use
//! [`crate::infrastructure::tasks::DeferredSpawner`] and drive the queue
//! themselves.

use std::future::Future;
use std::pin::Pin;

/// A boxed, sendable unit of background work.
pub type BackgroundTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Runs detached background tasks.
///
/// Implementations must not block the caller: `spawn` returns before the task
/// completes. Tasks handle their own errors.
pub trait TaskSpawner: Send + Sync {
    fn spawn(&self, task: BackgroundTask);
}
