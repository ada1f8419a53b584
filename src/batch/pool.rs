//! Bounded worker pool
//!
//! Caps the number of units of work executing at once, independent of how
//! many targets are pending. Capacity is managed by a counting semaphore
//! whose permits are released by RAII drop, so a slot is returned no matter
//! how the task finishes.

use std::sync::Arc;
use tokio::sync::Semaphore;

/// Counting admission gate for concurrently executing fetch tasks
#[derive(Clone)]
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl WorkerPool {
    /// Creates a pool with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Runs `task` once a capacity slot is available
    ///
    /// Suspends the caller until fewer than `capacity` tasks are executing
    /// under this pool, then awaits the task. The slot is released when the
    /// task completes, whatever its outcome.
    pub async fn run<F, T>(&self, task: F) -> T
    where
        F: std::future::Future<Output = T>,
    {
        // `acquire` only fails when the semaphore is closed, which we
        // never do.
        let _permit = self
            .semaphore
            .acquire()
            .await
            .expect("worker pool semaphore unexpectedly closed");
        task.await
    }

    /// Returns the configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of currently free slots
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_pool_runs_task_and_returns_value() {
        let pool = WorkerPool::new(2);
        let value = pool.run(async { 42 }).await;
        assert_eq!(value, 42);
        assert_eq!(pool.available(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pool_bounds_concurrency() {
        let pool = WorkerPool::new(2);
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let pool = pool.clone();
            let running = Arc::clone(&running);
            let peak = Arc::clone(&peak);
            handles.push(tokio::spawn(async move {
                pool.run(async {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    running.fetch_sub(1, Ordering::SeqCst);
                })
                .await;
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_slot_released_after_completion() {
        let pool = WorkerPool::new(1);

        pool.run(async {}).await;
        assert_eq!(pool.available(), 1);

        // A second task can run after the first finished
        let value = pool.run(async { "done" }).await;
        assert_eq!(value, "done");
        assert_eq!(pool.available(), 1);
    }
}
