//! Upstream scrape error types.

/// Errors that can occur when scraping the upstream site.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Site returned an error status
    #[error("upstream error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message} (body: {body})")]
    Json { message: String, body: String },

    /// Page did not contain the expected markup
    #[error("unexpected markup: {0}")]
    Markup(String),
}
