//! HTTP page fetcher
//!
//! Production implementation of the page-fetch collaborator. Each call
//! builds a fresh `reqwest::Client` carrying the attempt's identity hint,
//! fetches the profile page, and pulls the email anchor's `href` out of the
//! rendered HTML. The client is dropped before returning, so no connection
//! state leaks between attempts.

use crate::fetch::{FetchError, IdentityHint, PageFetcher, Target};
use crate::HarvestError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;

/// Fetches profile pages over HTTP and extracts one email href per page
pub struct HttpPageFetcher {
    email_selector: Selector,
    timeout: Duration,
}

impl HttpPageFetcher {
    /// Creates a fetcher
    ///
    /// # Arguments
    ///
    /// * `email_selector` - CSS selector matching the email anchor
    /// * `timeout` - Per-request timeout
    ///
    /// # Returns
    ///
    /// * `Ok(HttpPageFetcher)` - Ready to fetch
    /// * `Err(HarvestError)` - The selector failed to parse
    pub fn new(email_selector: &str, timeout: Duration) -> Result<Self, HarvestError> {
        let email_selector =
            Selector::parse(email_selector).map_err(|e| HarvestError::Selector {
                selector: email_selector.to_string(),
                message: format!("{:?}", e),
            })?;
        Ok(Self {
            email_selector,
            timeout,
        })
    }

    /// Builds a one-shot HTTP session carrying the identity hint
    fn build_session(&self, identity: &IdentityHint) -> Result<Client, reqwest::Error> {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&identity.accept_language) {
            headers.insert(ACCEPT_LANGUAGE, value);
        }

        Client::builder()
            .user_agent(identity.user_agent.clone())
            .default_headers(headers)
            .timeout(self.timeout)
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(
        &self,
        target: &Target,
        identity: &IdentityHint,
    ) -> Result<Option<String>, FetchError> {
        let session = self.build_session(identity).map_err(|e| FetchError::Other {
            url: target.as_str().to_string(),
            message: format!("failed to build HTTP session: {}", e),
        })?;

        let response = session
            .get(target.url().clone())
            .send()
            .await
            .map_err(|e| classify_request_error(target, e))?;

        let status = response.status();
        if status.as_u16() == 429 || status.is_server_error() {
            // The server is struggling or throttling us; worth retrying
            return Err(FetchError::Transient {
                url: target.as_str().to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Other {
                url: target.as_str().to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_request_error(target, e))?;

        Ok(extract_href(&body, &self.email_selector))
    }
}

/// Maps a reqwest error to the retry taxonomy
///
/// Timeouts and connection failures are expected to self-resolve; anything
/// else is not retried.
fn classify_request_error(target: &Target, error: reqwest::Error) -> FetchError {
    let url = target.as_str().to_string();
    if error.is_timeout() {
        FetchError::Transient {
            url,
            message: "request timeout".to_string(),
        }
    } else if error.is_connect() {
        FetchError::Transient {
            url,
            message: format!("connection failed: {}", error),
        }
    } else {
        FetchError::Other {
            url,
            message: error.to_string(),
        }
    }
}

/// Extracts the `href` attribute of the first element matching `selector`
///
/// Returns None when the element is missing or has no href; that is the
/// explicit "no datum on this page" outcome, not an error.
pub fn extract_href(body: &str, selector: &Selector) -> Option<String> {
    let document = Html::parse_document(body);
    document
        .select(selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .map(|href| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_selector() -> Selector {
        Selector::parse(".link_email").unwrap()
    }

    #[test]
    fn test_fetcher_rejects_bad_selector() {
        let result = HttpPageFetcher::new(":::nope", Duration::from_secs(30));
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_href_finds_email_anchor() {
        let body = r#"<html><body>
            <a class="link_email" href="mailto:a@example.org">Contact</a>
        </body></html>"#;

        let href = extract_href(body, &email_selector());
        assert_eq!(href, Some("mailto:a@example.org".to_string()));
    }

    #[test]
    fn test_extract_href_first_match_wins() {
        let body = r#"<html><body>
            <a class="link_email" href="mailto:first@example.org">First</a>
            <a class="link_email" href="mailto:second@example.org">Second</a>
        </body></html>"#;

        let href = extract_href(body, &email_selector());
        assert_eq!(href, Some("mailto:first@example.org".to_string()));
    }

    #[test]
    fn test_extract_href_missing_element_is_none() {
        let body = "<html><body><p>No contact listed</p></body></html>";
        assert_eq!(extract_href(body, &email_selector()), None);
    }

    #[test]
    fn test_extract_href_element_without_href_is_none() {
        let body = r#"<html><body><a class="link_email">Contact</a></body></html>"#;
        assert_eq!(extract_href(body, &email_selector()), None);
    }
}
