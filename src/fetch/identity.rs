//! Randomized per-attempt browser identities
//!
//! Every fetch attempt presents a user-agent and an Accept-Language value
//! drawn at random from small fixed sets, so retries of the same target do
//! not correlate into one fingerprint.

use crate::config::IdentityConfig;

/// One attempt's browser identity
#[derive(Debug, Clone)]
pub struct IdentityHint {
    /// User-agent header value
    pub user_agent: String,

    /// Accept-Language header value
    pub accept_language: String,
}

/// Fixed sets of identity components to sample from
#[derive(Debug, Clone)]
pub struct IdentityPool {
    user_agents: Vec<String>,
    accept_languages: Vec<String>,
}

impl IdentityPool {
    /// Builds a pool from the identity configuration
    ///
    /// The configuration is validated to be non-empty before this is
    /// reached.
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            user_agents: config.user_agents.clone(),
            accept_languages: config.accept_languages.clone(),
        }
    }

    /// Draws one random identity
    pub fn sample(&self) -> IdentityHint {
        IdentityHint {
            user_agent: self.user_agents[fastrand::usize(..self.user_agents.len())].clone(),
            accept_language: self.accept_languages
                [fastrand::usize(..self.accept_languages.len())]
            .clone(),
        }
    }
}
