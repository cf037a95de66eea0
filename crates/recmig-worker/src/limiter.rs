//! Concurrency limiter for in-flight migrations.

use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

/// Default number of migrations allowed in flight at once.
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 10;

/// Caps how many tasks run at once, however many are queued.
///
/// Backed by a fair semaphore, so waiting tasks are admitted in the order
/// they first asked for a permit. Tasks run on the caller's task; nothing is
/// spawned.
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    limit: usize,
}

impl ConcurrencyLimiter {
    /// Create a limiter admitting at most `limit` tasks (minimum one).
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Run one task once a permit is available.
    pub async fn run<F>(&self, task: F) -> F::Output
    where
        F: Future,
    {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .expect("limiter semaphore is never closed");
        task.await
    }

    /// Run every task under the limit and wait until all of them settle.
    ///
    /// Outputs are returned in submission order. A task's outcome never
    /// affects its siblings.
    pub async fn run_all<I, F>(&self, tasks: I) -> Vec<F::Output>
    where
        I: IntoIterator<Item = F>,
        F: Future,
    {
        join_all(tasks.into_iter().map(|task| self.run(task))).await
    }
}

impl Default for ConcurrencyLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_never_exceeds_limit() {
        let limiter = ConcurrencyLimiter::new(10);
        let current = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        let tasks = (0..35u64).map(|i| {
            let current = &current;
            let peak = &peak;
            async move {
                let now = current.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10 + i % 7)).await;
                current.fetch_sub(1, Ordering::SeqCst);
                i
            }
        });

        let outputs = limiter.run_all(tasks).await;

        assert_eq!(outputs, (0..35).collect::<Vec<_>>());
        assert_eq!(peak.load(Ordering::SeqCst), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_admits_in_submission_order() {
        let limiter = ConcurrencyLimiter::new(1);
        let started = Mutex::new(Vec::new());

        let tasks = (0..5).map(|i| {
            let started = &started;
            async move {
                started.lock().unwrap().push(i);
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        });

        limiter.run_all(tasks).await;
        assert_eq!(*started.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_failures_do_not_cancel_siblings() {
        let limiter = ConcurrencyLimiter::new(2);
        let completed = AtomicUsize::new(0);

        let tasks = (0..6).map(|i| {
            let completed = &completed;
            async move {
                tokio::task::yield_now().await;
                completed.fetch_add(1, Ordering::SeqCst);
                if i % 2 == 0 {
                    Err(format!("task {} failed", i))
                } else {
                    Ok(i)
                }
            }
        });

        let results = limiter.run_all(tasks).await;

        assert_eq!(completed.load(Ordering::SeqCst), 6);
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 3);
        assert_eq!(results[1], Ok(1));
    }

    #[tokio::test]
    async fn test_empty_batch_settles_immediately() {
        let limiter = ConcurrencyLimiter::default();
        let outputs: Vec<()> = limiter
            .run_all(Vec::<futures::future::Ready<()>>::new())
            .await;
        assert!(outputs.is_empty());
        assert_eq!(limiter.limit(), 10);
    }

    #[test]
    fn test_zero_limit_is_raised_to_one() {
        assert_eq!(ConcurrencyLimiter::new(0).limit(), 1);
    }
}
