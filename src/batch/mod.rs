//! Batch fetching core
//!
//! The reusable concurrency-and-resilience wrapper around per-target page
//! visits:
//! - Sliding-window rate limiting
//! - Bounded worker pool
//! - Retry with exponential backoff and jitter
//! - Fan-out/fan-in batch coordination

mod coordinator;
mod limiter;
mod pool;
mod retry;

pub use coordinator::{BatchFetcher, BatchReport};
pub use limiter::RateLimiter;
pub use pool::WorkerPool;
pub use retry::{backoff_delay, FailureKind, Outcome, RetryPolicy};

use crate::config::Config;
use crate::fetch::{discover_targets, HttpPageFetcher, IdentityPool};
use crate::output::write_results;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Runs a complete harvest
///
/// This is the main entry point for a run. It will:
/// 1. Discover one target per member profile (fatal on failure)
/// 2. Fetch every target under the pool, rate limit, and retry policy
/// 3. Normalize and write the collected emails to the output file
///
/// Per-target failures are contained inside the batch and only visible in
/// the returned report; discovery and output-file errors abort the run.
///
/// # Arguments
///
/// * `config` - The harvester configuration
///
/// # Returns
///
/// * `Ok(BatchReport)` - The run completed; the report carries the counts
/// * `Err(HarvestError)` - Discovery failed or the output could not be written
pub async fn harvest(config: Config) -> crate::Result<BatchReport> {
    let identities = IdentityPool::new(&config.identity);
    let timeout = Duration::from_secs(config.fetcher.request_timeout_secs);

    // Discovery runs before any batch work; a partial target list is not
    // acceptable, so any error here is fatal.
    let targets = discover_targets(&config.discovery, timeout, &identities.sample()).await?;

    let fetcher = HttpPageFetcher::new(&config.extract.email_selector, timeout)?;

    let batch = BatchFetcher::new(
        WorkerPool::new(config.fetcher.max_concurrent_sessions as usize),
        RateLimiter::new(
            config.rate_limit.max_per_window as usize,
            Duration::from_secs(config.rate_limit.window_secs),
        ),
        RetryPolicy::new(
            config.fetcher.max_retries,
            Duration::from_millis(config.fetcher.base_delay_ms),
        ),
        identities,
    );

    let report = batch.run(targets, Arc::new(fetcher)).await;

    write_results(
        &report.values,
        &config.extract.strip_prefix,
        Path::new(&config.output.emails_path),
    )?;

    Ok(report)
}
