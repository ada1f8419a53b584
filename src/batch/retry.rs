//! Retry policy with exponential backoff and jitter
//!
//! Wraps one target's fetch attempts. Transient failures are retried up to
//! a bounded number of attempts with `base_delay * 2^attempt` backoff plus
//! uniform jitter; everything else resolves immediately. A target that runs
//! out of attempts yields an explicit failed outcome rather than an error,
//! so one stubborn profile can never sink the batch.

use crate::fetch::FetchError;
use std::future::Future;
use std::time::Duration;

/// Upper bound of the uniform jitter added to every backoff delay
const JITTER_MAX: Duration = Duration::from_secs(2);

/// Terminal outcome of one target after retries are resolved
///
/// Distinguishes "the page had no email" from "we could not fetch the
/// page", so downstream consumers cannot confuse an empty profile with a
/// fetch error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A datum was extracted
    Found(String),

    /// The page was fetched but carried no datum
    Absent,

    /// The target could not be fetched
    Failed(FailureKind),
}

impl Outcome {
    /// Returns the extracted datum, if any
    pub fn into_found(self) -> Option<String> {
        match self {
            Outcome::Found(value) => Some(value),
            _ => None,
        }
    }
}

/// Why a target failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Transient errors persisted through every allowed attempt
    TransientExhausted,

    /// A non-transient error stopped the target on its first occurrence
    Other,
}

/// Bounded retry with exponential backoff and jitter
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a new policy
    ///
    /// # Arguments
    ///
    /// * `max_retries` - Maximum attempts per target (at least 1)
    /// * `base_delay` - Base delay for the exponential backoff
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries: max_retries.max(1),
            base_delay,
        }
    }

    /// Runs `operation` until it resolves or attempts are exhausted
    ///
    /// The closure is invoked once per attempt and must produce a fresh
    /// future each time (each attempt gets its own isolated session
    /// downstream).
    ///
    /// * `Ok(Some(value))` resolves to [`Outcome::Found`] immediately.
    /// * `Ok(None)` resolves to [`Outcome::Absent`] immediately.
    /// * A transient error schedules another attempt after
    ///   `base_delay * 2^attempt` plus uniform jitter, until `max_retries`
    ///   attempts have been made.
    /// * A non-transient error resolves to [`Outcome::Failed`] at once.
    pub async fn execute<F, Fut>(&self, mut operation: F) -> Outcome
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<String>, FetchError>>,
    {
        for attempt in 0..self.max_retries {
            match operation().await {
                Ok(Some(value)) => return Outcome::Found(value),
                Ok(None) => return Outcome::Absent,
                Err(e) if e.is_transient() => {
                    if attempt + 1 >= self.max_retries {
                        tracing::warn!(
                            "Giving up after {} attempts: {}",
                            self.max_retries,
                            e
                        );
                        return Outcome::Failed(FailureKind::TransientExhausted);
                    }

                    let delay = backoff_delay(self.base_delay, attempt) + jitter();
                    tracing::warn!(
                        "Transient failure on attempt {} ({}), retrying in {:?}",
                        attempt + 1,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    tracing::warn!("Non-transient failure, not retrying: {}", e);
                    return Outcome::Failed(FailureKind::Other);
                }
            }
        }

        // Unreachable: the loop always returns on its final iteration, but
        // the compiler cannot see that.
        Outcome::Failed(FailureKind::TransientExhausted)
    }

    /// Returns the configured maximum number of attempts
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

/// Deterministic component of the backoff delay before attempt `attempt + 1`
///
/// Grows as `base * 2^attempt`, saturating rather than overflowing for
/// absurd attempt counts.
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

/// Uniform random jitter in `[0, JITTER_MAX)`
///
/// Spreads out retries of concurrently failing targets so they do not
/// hammer the site in lockstep.
fn jitter() -> Duration {
    Duration::from_secs_f64(fastrand::f64() * JITTER_MAX.as_secs_f64())
}
