use crate::config::types::Config;
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates a parsed configuration
///
/// Checks that all numeric limits are positive, that the list URL is a valid
/// absolute http(s) URL, that the CSS selectors parse, and that the identity
/// sets are non-empty.
///
/// # Arguments
///
/// * `config` - The configuration to validate
///
/// # Returns
///
/// * `Ok(())` - The configuration is usable
/// * `Err(ConfigError)` - The first problem found
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.fetcher.max_concurrent_sessions == 0 {
        return Err(ConfigError::Validation(
            "fetcher.max-concurrent-sessions must be at least 1".to_string(),
        ));
    }

    if config.fetcher.max_retries == 0 {
        return Err(ConfigError::Validation(
            "fetcher.max-retries must be at least 1".to_string(),
        ));
    }

    if config.fetcher.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "fetcher.request-timeout-secs must be at least 1".to_string(),
        ));
    }

    if config.rate_limit.max_per_window == 0 {
        return Err(ConfigError::Validation(
            "rate-limit.max-per-window must be at least 1".to_string(),
        ));
    }

    if config.rate_limit.window_secs == 0 {
        return Err(ConfigError::Validation(
            "rate-limit.window-secs must be at least 1".to_string(),
        ));
    }

    // The list URL must be absolute so relative profile links can be
    // resolved against its origin.
    let list_url = Url::parse(&config.discovery.list_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", config.discovery.list_url, e)))?;
    if !matches!(list_url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl(format!(
            "discovery.list-url must be http or https, got {}",
            list_url.scheme()
        )));
    }

    validate_selector(&config.discovery.link_selector, "discovery.link-selector")?;
    validate_selector(&config.extract.email_selector, "extract.email-selector")?;

    if config.identity.user_agents.is_empty() {
        return Err(ConfigError::Validation(
            "identity.user-agents must not be empty".to_string(),
        ));
    }

    if config.identity.accept_languages.is_empty() {
        return Err(ConfigError::Validation(
            "identity.accept-languages must not be empty".to_string(),
        ));
    }

    if config.output.emails_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output.emails-path must not be empty".to_string(),
        ));
    }

    Ok(())
}

/// Checks that a CSS selector string parses
fn validate_selector(selector: &str, field: &str) -> Result<(), ConfigError> {
    if selector.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "{} must not be empty",
            field
        )));
    }

    Selector::parse(selector)
        .map_err(|e| ConfigError::InvalidSelector(format!("{}: {:?}", field, e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{
        DiscoveryConfig, ExtractConfig, FetcherConfig, IdentityConfig, OutputConfig,
        RateLimitConfig,
    };

    fn create_valid_config() -> Config {
        Config {
            fetcher: FetcherConfig {
                max_concurrent_sessions: 3,
                max_retries: 3,
                base_delay_ms: 1000,
                request_timeout_secs: 30,
            },
            rate_limit: RateLimitConfig {
                max_per_window: 10,
                window_secs: 60,
            },
            discovery: DiscoveryConfig {
                list_url: "https://www.europarl.europa.eu/meps/en/full-list/all".to_string(),
                link_selector: ".erpl_member-list > div:nth-child(1) a".to_string(),
            },
            extract: ExtractConfig {
                email_selector: ".link_email".to_string(),
                strip_prefix: "mailto:".to_string(),
            },
            identity: IdentityConfig::default(),
            output: OutputConfig {
                emails_path: "./emails.txt".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        let config = create_valid_config();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = create_valid_config();
        config.fetcher.max_concurrent_sessions = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_window_rejected() {
        let mut config = create_valid_config();
        config.rate_limit.window_secs = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_relative_list_url_rejected() {
        let mut config = create_valid_config();
        config.discovery.list_url = "/meps/en/full-list/all".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_non_http_list_url_rejected() {
        let mut config = create_valid_config();
        config.discovery.list_url = "ftp://example.com/list".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_malformed_selector_rejected() {
        let mut config = create_valid_config();
        config.extract.email_selector = ":::not-a-selector".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidSelector(_))
        ));
    }

    #[test]
    fn test_empty_user_agents_rejected() {
        let mut config = create_valid_config();
        config.identity.user_agents.clear();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_output_path_rejected() {
        let mut config = create_valid_config();
        config.output.emails_path = "  ".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }
}
