//! In-memory upstream for tests and offline development.
//!
//! Serves canned dropdowns and schedules and counts every scrape, so
//! callers can assert how often the real site would have been hit.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::Upstream;
use super::error::UpstreamError;
use super::types::{RegionOption, UpstreamSchedule};

/// Scrape counters, shared between clones.
#[derive(Debug, Default)]
struct Counters {
    states: AtomicUsize,
    cities: AtomicUsize,
    schedules: AtomicUsize,
}

/// Mock upstream serving fixed data.
///
/// Unknown state codes yield an empty city list, mirroring the site.
/// Unknown schedules yield a 404.
#[derive(Debug, Clone, Default)]
pub struct MockUpstream {
    states: Vec<RegionOption>,
    cities: HashMap<String, Vec<RegionOption>>,
    schedules: HashMap<(String, String, String), UpstreamSchedule>,
    counters: Arc<Counters>,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provinces returned by [`Upstream::fetch_states`].
    pub fn with_states(mut self, states: Vec<RegionOption>) -> Self {
        self.states = states;
        self
    }

    /// Cities returned for a state code.
    pub fn with_cities(mut self, state_code: &str, cities: Vec<RegionOption>) -> Self {
        self.cities.insert(state_code.to_string(), cities);
        self
    }

    /// Schedule returned for a (state code, city code, year).
    pub fn with_schedule(
        mut self,
        state_code: &str,
        city_code: &str,
        year: &str,
        schedule: UpstreamSchedule,
    ) -> Self {
        self.schedules.insert(
            (
                state_code.to_string(),
                city_code.to_string(),
                year.to_string(),
            ),
            schedule,
        );
        self
    }

    /// Number of province scrapes so far.
    pub fn state_fetches(&self) -> usize {
        self.counters.states.load(Ordering::SeqCst)
    }

    /// Number of city scrapes so far.
    pub fn city_fetches(&self) -> usize {
        self.counters.cities.load(Ordering::SeqCst)
    }

    /// Number of schedule scrapes so far.
    pub fn schedule_fetches(&self) -> usize {
        self.counters.schedules.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Upstream for MockUpstream {
    async fn fetch_states(&self) -> Result<Vec<RegionOption>, UpstreamError> {
        self.counters.states.fetch_add(1, Ordering::SeqCst);
        Ok(self.states.clone())
    }

    async fn fetch_cities(&self, state_code: &str) -> Result<Vec<RegionOption>, UpstreamError> {
        self.counters.cities.fetch_add(1, Ordering::SeqCst);
        Ok(self.cities.get(state_code).cloned().unwrap_or_default())
    }

    async fn fetch_schedule(
        &self,
        state_code: &str,
        city_code: &str,
        year: &str,
    ) -> Result<UpstreamSchedule, UpstreamError> {
        self.counters.schedules.fetch_add(1, Ordering::SeqCst);

        let key = (
            state_code.to_string(),
            city_code.to_string(),
            year.to_string(),
        );
        self.schedules
            .get(&key)
            .cloned()
            .ok_or_else(|| UpstreamError::Api {
                status: 404,
                message: format!("no mock schedule for {city_code} in {year}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_fetches_across_clones() {
        let mock = MockUpstream::new().with_cities("X", vec![RegionOption::new("c1", "KOTA A")]);
        let clone = mock.clone();

        let cities = clone.fetch_cities("X").await.unwrap();
        assert_eq!(cities.len(), 1);
        mock.fetch_cities("unknown").await.unwrap();

        assert_eq!(mock.city_fetches(), 2);
        assert_eq!(clone.schedule_fetches(), 0);
    }

    #[tokio::test]
    async fn unknown_schedule_returns_error() {
        let mock = MockUpstream::new();
        let result = mock.fetch_schedule("X", "c1", "2022").await;

        assert!(matches!(result, Err(UpstreamError::Api { status: 404, .. })));
        assert_eq!(mock.schedule_fetches(), 1);
    }
}
