use std::time::Duration;

use log::info;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};

use crate::error::ScrapeError;
use crate::extractor;
use crate::pipeline::PageSource;

const LISTING_BASE: &str = "https://stackoverflow.com/jobs";

/// The search input for one scrape run. Threaded explicitly through the
/// pipeline and never read from ambient state.
#[derive(Debug, Clone)]
pub struct Query {
    term: String,
}

impl Query {
    pub fn new(term: &str) -> Self {
        Query {
            term: term.trim().to_string(),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Listing URL for the search term, also the URL of page 0.
    pub fn base_url(&self) -> String {
        format!("{}?q={}", LISTING_BASE, urlencoding::encode(&self.term))
    }

    /// URL of one zero-based page of the listing.
    pub fn page_url(&self, page: usize) -> String {
        format!("{}&pg={}", self.base_url(), page)
    }
}

/// HTTP client for the remote listing site. Stateless transport, safe to
/// share read-only across worker threads.
pub struct SiteClient {
    client: Client,
}

impl SiteClient {
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(USER_AGENT, HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        ));

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        SiteClient { client }
    }

    /// One GET. Any non-success status is terminal, not retried.
    fn get(&self, url: &str) -> Result<String, ScrapeError> {
        info!("Request URL {}", url);
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                status,
                url: url.to_string(),
            });
        }
        Ok(resp.text()?)
    }
}

impl Default for SiteClient {
    fn default() -> Self {
        SiteClient::new()
    }
}

impl PageSource for SiteClient {
    fn count_pages(&self, query: &Query) -> Result<usize, ScrapeError> {
        let html = self.get(&query.base_url())?;
        Ok(extractor::count_pages_in(&html))
    }

    fn fetch_page(&self, query: &Query, page: usize) -> Result<String, ScrapeError> {
        self.get(&query.page_url(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_encodes_the_term() {
        let query = Query::new("go developer");
        assert_eq!(
            query.base_url(),
            "https://stackoverflow.com/jobs?q=go%20developer"
        );
    }

    #[test]
    fn page_url_appends_zero_based_index() {
        let query = Query::new("rust");
        assert_eq!(query.page_url(2), "https://stackoverflow.com/jobs?q=rust&pg=2");
    }

    #[test]
    fn query_trims_surrounding_whitespace() {
        assert_eq!(Query::new("  rust  ").term(), "rust");
    }
}
