//! City resolver: a state's cities, cached per state.

use std::sync::Arc;

use tracing::info;

use crate::cache::{Cache, CacheKey, Fill};
use crate::domain::{City, matches_search};
use crate::upstream::Upstream;

use super::error::LookupError;
use super::states::RegionStore;

/// Resolves the cities of a state, scraping the upstream dropdown on a miss.
#[derive(Clone)]
pub struct CityResolver {
    regions: Arc<RegionStore>,
    cache: Cache,
    upstream: Arc<dyn Upstream>,
}

impl CityResolver {
    pub fn new(regions: Arc<RegionStore>, cache: Cache, upstream: Arc<dyn Upstream>) -> Self {
        Self {
            regions,
            cache,
            upstream,
        }
    }

    /// Cities of `state_id` whose name contains `search` (case-insensitive).
    ///
    /// A scraped list is cached as-is, even when empty. Filtering happens
    /// after the cache, so every search shares one entry per state.
    pub async fn list_cities(
        &self,
        state_id: u32,
        search: Option<&str>,
    ) -> Result<Vec<City>, LookupError> {
        let state = self
            .regions
            .find(state_id)
            .ok_or(LookupError::StateNotFound)?;

        let cities: Vec<City> = self
            .cache
            .get_or_populate(&CacheKey::cities(state_id), || async {
                info!(state_id, state = %state.name, "Scraping cities");
                let options = self.upstream.fetch_cities(&state.code).await?;
                let cities =
                    City::from_options(state, options.into_iter().map(|o| (o.code, o.name)));
                Ok::<_, LookupError>(Fill::Persist(cities))
            })
            .await?;

        let cities: Vec<City> = cities
            .into_iter()
            .filter(|c| matches_search(&c.name, search))
            .collect();

        if cities.is_empty() {
            return Err(LookupError::CityNotFound);
        }

        Ok(cities)
    }

    /// A single city of `state_id` by id.
    pub async fn find_city(&self, state_id: u32, city_id: u32) -> Result<City, LookupError> {
        self.list_cities(state_id, None)
            .await?
            .into_iter()
            .find(|c| c.id == city_id)
            .ok_or(LookupError::CityNotFound)
    }
}
