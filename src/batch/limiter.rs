//! Sliding-window rate limiter
//!
//! Bounds the number of fetch admissions within a trailing time window.
//! Admission timestamps are kept in an ordered queue and pruned lazily on
//! each acquire; when the window is full, the caller sleeps exactly until
//! the oldest retained admission falls out of the window.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a maximum number of operations within a trailing time window
///
/// The check-and-record sequence in [`acquire`](RateLimiter::acquire) is
/// serialized through an async mutex held across the wait, so concurrent
/// callers can never admit more than `max_per_window` operations into one
/// window. Waiters queue on the mutex in roughly FIFO order.
pub struct RateLimiter {
    max_per_window: usize,
    window: Duration,
    admissions: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Creates a new rate limiter
    ///
    /// # Arguments
    ///
    /// * `max_per_window` - Maximum admissions within one trailing window
    /// * `window` - Length of the trailing window
    pub fn new(max_per_window: usize, window: Duration) -> Self {
        Self {
            max_per_window,
            window,
            admissions: Mutex::new(VecDeque::new()),
        }
    }

    /// Blocks the calling task until one more operation can be admitted
    ///
    /// Only the calling task is parked; unrelated tasks keep running. On
    /// return, the current instant has been recorded as an admission.
    pub async fn acquire(&self) {
        let mut admissions = self.admissions.lock().await;

        loop {
            let now = Instant::now();

            // Prune admissions that have aged out of the trailing window
            while let Some(oldest) = admissions.front() {
                if now.duration_since(*oldest) >= self.window {
                    admissions.pop_front();
                } else {
                    break;
                }
            }

            if admissions.len() < self.max_per_window {
                admissions.push_back(now);
                return;
            }

            // Window is full: wait until the oldest retained admission
            // expires, then re-check. The wait is never negative because
            // the oldest entry survived the prune above.
            let oldest = *admissions
                .front()
                .expect("window is full, so the queue is non-empty");
            let wait = self.window.saturating_sub(now.duration_since(oldest));

            tracing::debug!(
                "Rate limit reached ({} in window), waiting {:?}",
                admissions.len(),
                wait
            );

            tokio::time::sleep(wait).await;
        }
    }

    /// Returns the number of admissions currently retained in the window
    ///
    /// Stale entries are not pruned here; the count is an upper bound used
    /// for observability only.
    pub async fn admitted(&self) -> usize {
        self.admissions.lock().await.len()
    }
}
