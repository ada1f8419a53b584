use serde::Deserialize;

/// Main configuration structure for MEP-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub fetcher: FetcherConfig,
    #[serde(rename = "rate-limit")]
    pub rate_limit: RateLimitConfig,
    pub discovery: DiscoveryConfig,
    pub extract: ExtractConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    pub output: OutputConfig,
}

/// Fetcher behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Maximum number of profile pages fetched concurrently
    #[serde(rename = "max-concurrent-sessions")]
    pub max_concurrent_sessions: u32,

    /// Maximum attempts per target before giving up on transient failures
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Base delay for exponential backoff between retry attempts (milliseconds)
    #[serde(rename = "base-delay-ms")]
    pub base_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    30
}

/// Sliding-window rate limit configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum number of fetches admitted within one trailing window
    #[serde(rename = "max-per-window")]
    pub max_per_window: u32,

    /// Length of the trailing window (seconds)
    #[serde(rename = "window-secs")]
    pub window_secs: u64,
}

/// Discovery configuration: where the member list lives and how to find
/// profile links on it
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    /// URL of the full member list page
    #[serde(rename = "list-url")]
    pub list_url: String,

    /// CSS selector matching the profile link anchors on the list page
    #[serde(rename = "link-selector")]
    pub link_selector: String,
}

/// Extraction configuration for the profile pages
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    /// CSS selector matching the email anchor on a profile page
    #[serde(rename = "email-selector")]
    pub email_selector: String,

    /// Prefix token stripped from extracted values before writing
    #[serde(rename = "strip-prefix", default = "default_strip_prefix")]
    pub strip_prefix: String,
}

fn default_strip_prefix() -> String {
    "mailto:".to_string()
}

/// Per-attempt browser identity configuration
///
/// Each fetch attempt draws one user-agent and one Accept-Language value at
/// random from these sets to reduce fingerprinting correlation across
/// attempts.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Candidate user-agent strings
    #[serde(rename = "user-agents", default = "default_user_agents")]
    pub user_agents: Vec<String>,

    /// Candidate Accept-Language header values
    #[serde(rename = "accept-languages", default = "default_accept_languages")]
    pub accept_languages: Vec<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            user_agents: default_user_agents(),
            accept_languages: default_accept_languages(),
        }
    }
}

fn default_user_agents() -> Vec<String> {
    vec![
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
            .to_string(),
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36"
            .to_string(),
        "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0".to_string(),
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
         (KHTML, like Gecko) Version/17.1 Safari/605.1.15"
            .to_string(),
    ]
}

fn default_accept_languages() -> Vec<String> {
    vec![
        "en-US,en;q=0.9".to_string(),
        "fr-FR,fr;q=0.9".to_string(),
        "de-DE,de;q=0.9".to_string(),
        "es-ES,es;q=0.9".to_string(),
    ]
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the line-delimited email output file
    #[serde(rename = "emails-path")]
    pub emails_path: String,
}
