//! HTTP client for the Kemenag Bimas Islam site.
//!
//! Every scrape first loads the schedule landing page so the site issues a
//! session cookie, then posts the lookup form the page would have posted.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::Upstream;
use super::error::UpstreamError;
use super::parse::{parse_options, parse_province_options};
use super::types::{RegionOption, UpstreamSchedule};

/// Default base URL for the upstream site.
pub const DEFAULT_BASE_URL: &str = "https://bimasislam.kemenag.go.id";

const LANDING_PATH: &str = "/jadwalimsakiyah";
const CITIES_PATH: &str = "/ajax/getKabkoshalat";
const SCHEDULE_PATH: &str = "/ajax/getImsyakiyah";

/// Configuration for the Kemenag client.
#[derive(Debug, Clone)]
pub struct KemenagConfig {
    /// Base URL for the site
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl KemenagConfig {
    /// Create a config pointing at the production site.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for KemenagConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Scraping client for the Kemenag site.
#[derive(Debug, Clone)]
pub struct KemenagClient {
    http: reqwest::Client,
    base_url: String,
}

impl KemenagClient {
    /// Create a new client with the given configuration.
    pub fn new(config: KemenagConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Load the landing page, opening a session.
    async fn landing_page(&self) -> Result<String, UpstreamError> {
        let response = self.http.get(self.url(LANDING_PATH)).send().await?;
        read_body(response).await
    }

    /// Post a form on a fresh session and return the response body.
    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<String, UpstreamError> {
        self.landing_page().await?;

        let response = self.http.post(self.url(path)).form(form).send().await?;
        read_body(response).await
    }
}

/// Check the status and return the body text.
async fn read_body(response: reqwest::Response) -> Result<String, UpstreamError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(UpstreamError::Api {
            status: status.as_u16(),
            message: body.chars().take(500).collect(),
        });
    }

    Ok(response.text().await?)
}

#[async_trait]
impl Upstream for KemenagClient {
    async fn fetch_states(&self) -> Result<Vec<RegionOption>, UpstreamError> {
        let html = self.landing_page().await?;
        let states = parse_province_options(&html)?;
        debug!(count = states.len(), "Scraped province dropdown");
        Ok(states)
    }

    async fn fetch_cities(&self, state_code: &str) -> Result<Vec<RegionOption>, UpstreamError> {
        let html = self.post_form(CITIES_PATH, &[("x", state_code)]).await?;
        let cities = parse_options(&html);
        debug!(count = cities.len(), "Scraped city options");
        Ok(cities)
    }

    async fn fetch_schedule(
        &self,
        state_code: &str,
        city_code: &str,
        year: &str,
    ) -> Result<UpstreamSchedule, UpstreamError> {
        let body = self
            .post_form(
                SCHEDULE_PATH,
                &[("x", state_code), ("y", city_code), ("thn", year)],
            )
            .await?;

        serde_json::from_str(&body).map_err(|e| UpstreamError::Json {
            message: e.to_string(),
            body: body.chars().take(500).collect(),
        })
    }
}
