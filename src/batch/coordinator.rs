//! Batch fetch coordination
//!
//! Fans one unit of work out per target and funnels completions back in
//! whatever order they finish. Each unit acquires a worker-pool slot, then
//! rate-limiter admission, then runs the page-fetch collaborator under the
//! retry policy with a fresh identity per attempt. A target's failure is
//! contained at its own boundary; siblings never notice.

use crate::batch::{Outcome, RateLimiter, RetryPolicy, WorkerPool};
use crate::fetch::{IdentityPool, PageFetcher, Target};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;

/// What a finished batch produced
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Extracted values in completion order
    pub values: Vec<String>,

    /// Total targets attempted
    pub attempted: usize,

    /// Targets whose page carried no datum
    pub absent: usize,

    /// Targets that could not be fetched
    pub failed: usize,
}

impl BatchReport {
    /// Number of targets that yielded a value
    pub fn found(&self) -> usize {
        self.values.len()
    }
}

/// Orchestrates a batch of page fetches
pub struct BatchFetcher {
    pool: WorkerPool,
    limiter: Arc<RateLimiter>,
    retry: RetryPolicy,
    identities: IdentityPool,
}

impl BatchFetcher {
    /// Creates a batch fetcher from its collaborating parts
    pub fn new(
        pool: WorkerPool,
        limiter: RateLimiter,
        retry: RetryPolicy,
        identities: IdentityPool,
    ) -> Self {
        Self {
            pool,
            limiter: Arc::new(limiter),
            retry,
            identities,
        }
    }

    /// Runs the whole batch to completion
    ///
    /// All targets are scheduled up front; actual execution is bounded by
    /// the worker pool and throttled by the rate limiter. Completions are
    /// collected as they arrive, so a slow target never holds up a fast
    /// one. The returned report accumulates every extracted value plus
    /// per-outcome counts.
    pub async fn run(&self, targets: Vec<Target>, fetcher: Arc<dyn PageFetcher>) -> BatchReport {
        let total = targets.len();
        tracing::info!("Fetching {} targets", total);

        let mut inflight = FuturesUnordered::new();

        for target in targets {
            let pool = self.pool.clone();
            let limiter = Arc::clone(&self.limiter);
            let retry = self.retry.clone();
            let identities = self.identities.clone();
            let fetcher = Arc::clone(&fetcher);

            inflight.push(async move {
                pool.run(async {
                    limiter.acquire().await;

                    let outcome = retry
                        .execute(|| {
                            // Fresh identity and fresh session per attempt
                            let identity = identities.sample();
                            let fetcher = Arc::clone(&fetcher);
                            let target = target.clone();
                            async move { fetcher.fetch(&target, &identity).await }
                        })
                        .await;

                    (target, outcome)
                })
                .await
            });
        }

        let mut report = BatchReport::default();

        while let Some((target, outcome)) = inflight.next().await {
            report.attempted += 1;
            match outcome {
                Outcome::Found(value) => {
                    tracing::debug!("Found datum on {}", target);
                    report.values.push(value);
                }
                Outcome::Absent => {
                    tracing::debug!("No datum listed on {}", target);
                    report.absent += 1;
                }
                Outcome::Failed(kind) => {
                    tracing::warn!("Target {} failed: {:?}", target, kind);
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            "Harvest complete: {} out of {} targets yielded a value ({} absent, {} failed)",
            report.found(),
            report.attempted,
            report.absent,
            report.failed
        );

        report
    }
}
