//! Target discovery
//!
//! Fetches the full member list page once and turns every profile link into
//! a [`Target`]. Discovery runs before any batch work and is fatal on
//! failure: a partial target list would silently under-report, so nothing
//! is written in that case.

use crate::config::DiscoveryConfig;
use crate::fetch::{IdentityHint, Target};
use crate::HarvestError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

/// Fetches the member list and extracts all profile targets
///
/// Root-relative hrefs are resolved against the list URL; absolute hrefs
/// pass through unchanged. Hrefs that resolve to nothing parseable are
/// skipped with a debug log, matching the list page's habit of mixing in
/// anchor fragments and javascript links.
///
/// # Arguments
///
/// * `config` - List URL and link selector
/// * `timeout` - Request timeout for the single list fetch
/// * `identity` - Identity presented for the list fetch
///
/// # Returns
///
/// * `Ok(Vec<Target>)` - One target per extractable profile link, in page order
/// * `Err(HarvestError)` - The list could not be fetched or parsed; the
///   whole run must abort
pub async fn discover_targets(
    config: &DiscoveryConfig,
    timeout: Duration,
    identity: &IdentityHint,
) -> Result<Vec<Target>, HarvestError> {
    let list_url = Url::parse(&config.list_url)?;

    let selector = Selector::parse(&config.link_selector).map_err(|e| HarvestError::Selector {
        selector: config.link_selector.clone(),
        message: format!("{:?}", e),
    })?;

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&identity.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, value);
    }
    let client = Client::builder()
        .user_agent(identity.user_agent.clone())
        .default_headers(headers)
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()?;

    tracing::info!("Discovering targets from {}", list_url);

    let response = client
        .get(list_url.clone())
        .send()
        .await
        .map_err(|e| HarvestError::Discovery {
            url: config.list_url.clone(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::Discovery {
            url: config.list_url.clone(),
            message: format!("HTTP {}", status.as_u16()),
        });
    }

    let body = response.text().await.map_err(|e| HarvestError::Discovery {
        url: config.list_url.clone(),
        message: e.to_string(),
    })?;

    let targets = extract_targets(&body, &selector, &list_url);

    tracing::info!("Discovered {} profile targets", targets.len());

    Ok(targets)
}

/// Extracts profile targets from the list page body
///
/// Pure HTML-to-targets step, split out from the network call so it can be
/// tested against fixture documents.
pub fn extract_targets(body: &str, selector: &Selector, base: &Url) -> Vec<Target> {
    let document = Html::parse_document(body);
    let mut targets = Vec::new();

    for element in document.select(selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let resolved = match Url::parse(href) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => base.join(href),
            Err(e) => Err(e),
        };

        match resolved {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                targets.push(Target::new(url));
            }
            Ok(url) => {
                tracing::debug!("Skipping non-http link {}", url);
            }
            Err(e) => {
                tracing::debug!("Skipping unparsable href '{}': {}", href, e);
            }
        }
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link_selector() -> Selector {
        Selector::parse(".member-list a").unwrap()
    }

    fn base() -> Url {
        Url::parse("https://www.europarl.europa.eu/meps/en/full-list/all").unwrap()
    }

    #[test]
    fn test_extracts_and_resolves_relative_links() {
        let body = r#"<html><body><div class="member-list">
            <a href="/meps/en/1234">Member A</a>
            <a href="/meps/en/5678">Member B</a>
        </div></body></html>"#;

        let targets = extract_targets(body, &link_selector(), &base());
        assert_eq!(targets.len(), 2);
        assert_eq!(
            targets[0].as_str(),
            "https://www.europarl.europa.eu/meps/en/1234"
        );
        assert_eq!(
            targets[1].as_str(),
            "https://www.europarl.europa.eu/meps/en/5678"
        );
    }

    #[test]
    fn test_absolute_links_pass_through() {
        let body = r#"<html><body><div class="member-list">
            <a href="https://example.org/profile/1">Member</a>
        </div></body></html>"#;

        let targets = extract_targets(body, &link_selector(), &base());
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].as_str(), "https://example.org/profile/1");
    }

    #[test]
    fn test_malformed_and_non_http_links_are_skipped() {
        let body = r#"<html><body><div class="member-list">
            <a href="javascript:void(0)">Noise</a>
            <a>No href at all</a>
            <a href="/meps/en/1234">Member</a>
        </div></body></html>"#;

        let targets = extract_targets(body, &link_selector(), &base());
        assert_eq!(targets.len(), 1);
        assert_eq!(
            targets[0].as_str(),
            "https://www.europarl.europa.eu/meps/en/1234"
        );
    }

    #[test]
    fn test_duplicate_links_are_kept() {
        // Deduplication is deliberately not discovery's job
        let body = r#"<html><body><div class="member-list">
            <a href="/meps/en/1234">Member</a>
            <a href="/meps/en/1234">Member again</a>
        </div></body></html>"#;

        let targets = extract_targets(body, &link_selector(), &base());
        assert_eq!(targets.len(), 2);
    }

    #[test]
    fn test_no_matches_yields_empty_list() {
        let body = "<html><body><p>Nothing here</p></body></html>";
        let targets = extract_targets(body, &link_selector(), &base());
        assert!(targets.is_empty());
    }
}
