//! Upstream scrape target.
//!
//! The government site has no API: city lists come back as HTML `<option>`
//! fragments and schedules as JSON from the endpoints its own form posts to.
//! [`Upstream`] is the seam the resolvers depend on, so tests can swap in
//! [`MockUpstream`].

mod client;
mod error;
mod mock;
mod parse;
mod types;

use async_trait::async_trait;

pub use client::{DEFAULT_BASE_URL, KemenagClient, KemenagConfig};
pub use error::UpstreamError;
pub use mock::MockUpstream;
pub use parse::{parse_options, parse_province_options};
pub use types::{DayMap, RegionOption, SUCCESS_MESSAGE, UpstreamDay, UpstreamSchedule};

/// A source of region dropdowns and schedules.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Scrape the province dropdown.
    async fn fetch_states(&self) -> Result<Vec<RegionOption>, UpstreamError>;

    /// Scrape the city options for a state's opaque code.
    async fn fetch_cities(&self, state_code: &str) -> Result<Vec<RegionOption>, UpstreamError>;

    /// Fetch the schedule payload for a city and year.
    async fn fetch_schedule(
        &self,
        state_code: &str,
        city_code: &str,
        year: &str,
    ) -> Result<UpstreamSchedule, UpstreamError>;
}
