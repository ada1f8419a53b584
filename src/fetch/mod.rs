//! Page fetching module
//!
//! This module contains the collaborators the batch core delegates to:
//! - Discovery of profile targets from the member list page
//! - Per-target page fetching and email extraction over HTTP
//! - Randomized per-attempt browser identities

mod client;
mod discover;
mod identity;

pub use client::{extract_href, HttpPageFetcher};
pub use discover::discover_targets;
pub use identity::{IdentityHint, IdentityPool};

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// One unit of scrape work: a member profile page
///
/// Always carries an absolute URL; root-relative links are resolved against
/// the list page's origin during discovery, before a Target exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    url: Url,
}

impl Target {
    /// Creates a target from an absolute URL
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// The profile URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The profile URL as a string slice
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Error raised by a page-fetch collaborator
///
/// The retry policy keys off this classification: transient errors are
/// retried with backoff, everything else resolves the target immediately.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Timeout-class failure expected to self-resolve on retry
    #[error("Transient fetch error for {url}: {message}")]
    Transient { url: String, message: String },

    /// Anything else; retrying would not help
    #[error("Fetch error for {url}: {message}")]
    Other { url: String, message: String },
}

impl FetchError {
    /// Whether this error should be retried
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transient { .. })
    }
}

/// Page-fetch collaborator: one isolated session per call
///
/// Implementations open a fresh session carrying the identity hint, fetch
/// the target, extract one optional datum, and tear the session down before
/// returning, whatever the outcome. Sessions are never shared across
/// targets or across retry attempts of one target.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches one target and extracts its datum
    ///
    /// * `Ok(Some(value))` - the datum was found
    /// * `Ok(None)` - the page rendered but carried no datum
    /// * `Err(FetchError)` - the fetch failed
    async fn fetch(&self, target: &Target, identity: &IdentityHint)
        -> Result<Option<String>, FetchError>;
}
