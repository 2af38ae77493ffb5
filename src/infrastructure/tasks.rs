//! [`TaskSpawner`] implementations.

use std::sync::{Mutex, PoisonError};

use crate::domain::task_spawner::{BackgroundTask, TaskSpawner};

/// Spawns each task onto the ambient Tokio runtime and detaches it.
///
/// The task is not tied to the request that created it and keeps running
/// after the response has been sent.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSpawner;

impl TaskSpawner for TokioSpawner {
    fn spawn(&self, task: BackgroundTask) {
        tokio::spawn(task);
    }
}

/// Queues tasks instead of running them.
///
/// Tests call [`DeferredSpawner::run_pending`] to execute everything queued so
/// far, in submission order, and then assert on the effects.
#[derive(Default)]
pub struct DeferredSpawner {
    queue: Mutex<Vec<BackgroundTask>>,
}

impl DeferredSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Runs queued tasks to completion, including any they enqueue, and
    /// returns how many ran.
    pub async fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            let batch: Vec<BackgroundTask> = {
                let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
                std::mem::take(&mut *queue)
            };
            if batch.is_empty() {
                return ran;
            }
            for task in batch {
                task.await;
                ran += 1;
            }
        }
    }
}

impl TaskSpawner for DeferredSpawner {
    fn spawn(&self, task: BackgroundTask) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(task);
    }
}
