//! HTTP client for the election results site.

use std::time::Duration;

use scraper::{Html, Selector};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    types::{District, Seat},
    user_agent::get_user_agent,
    Error,
};

const DEFAULT_ORIGIN: &str = "https://www.Election.net";
const RESULTS_PATH: &str = "/election2026data";

/// HTTP client for the results site's district API and results pages.
///
/// Sends requests with browser-like headers and a randomized user agent.
/// Each request builds a fresh `reqwest::Client` with a 30-second timeout.
pub struct Client {
    /// Site origin. Defaults to `https://www.Election.net`.
    base_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production site.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_ORIGIN.to_string(),
        }
    }

    /// Creates a new client with a custom origin. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The origin requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, Error> {
        let mut url = Url::parse(format!("{}{}", &self.base_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn fetch(&self, url: Url, accept: &str) -> Result<String, Error> {
        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url.clone())
            .header("accept", accept)
            .header("accept-language", "en-US,en;q=0.9")
            .header("referer", format!("{}{}", self.base_url, RESULTS_PATH))
            .header("cache-control", "no-cache")
            .header("pragma", "no-cache")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get {}: {}", url, e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request to {} failed with status {}: {}", url, status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.get_url(path, &[])?;
        let body = self
            .fetch(url, "application/json, text/plain, */*")
            .await?;
        decode_api_body(&body)
    }

    /// Fetches the districts of one division.
    pub async fn get_districts(&self, division_id: &str) -> Result<Vec<District>, Error> {
        self.get_json(&format!("/api/districts/division/{}", division_id))
            .await
    }

    /// Fetches the seats of one district.
    pub async fn get_seats(&self, district_id: &str) -> Result<Vec<Seat>, Error> {
        self.get_json(&format!("/api/districts/district/{}/seats", district_id))
            .await
    }

    /// Fetches the results page listing every seat of a district as tabs.
    pub async fn get_district_page(
        &self,
        division_id: &str,
        district_id: &str,
    ) -> Result<String, Error> {
        let url = self.get_url(
            RESULTS_PATH,
            &[("division", division_id), ("district", district_id)],
        )?;
        self.fetch(url, "text/html,application/xhtml+xml").await
    }
}

/// Decodes an API body that is either raw JSON or an HTML document with the
/// JSON inside a `<pre>` element (how browsers render the endpoint).
pub(crate) fn decode_api_body<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    let trimmed = body.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return serde_json::from_str(trimmed).map_err(|e| {
            tracing::error!("Failed to parse resource: {} | body: {}", e, truncate_body(body));
            Error::InvalidPayload(e.to_string())
        });
    }

    let document = Html::parse_document(body);
    let pre = Selector::parse("pre").map_err(|e| Error::InvalidPayload(e.to_string()))?;
    let text: String = document
        .select(&pre)
        .next()
        .map(|el| el.text().collect())
        .ok_or_else(|| Error::InvalidPayload("response has neither JSON nor <pre>".into()))?;

    serde_json::from_str(text.trim()).map_err(|e| {
        tracing::error!("Failed to parse <pre> payload: {} | body: {}", e, truncate_body(&text));
        Error::InvalidPayload(e.to_string())
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
