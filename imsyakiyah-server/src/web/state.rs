//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::Cache;
use crate::resolve::{CityResolver, RegionStore, ScheduleResolver};
use crate::upstream::Upstream;

/// Shared application state.
///
/// Contains the three resolvers, wired to one cache and one upstream.
#[derive(Clone)]
pub struct AppState {
    /// Static state list
    pub regions: Arc<RegionStore>,

    /// City lookups
    pub cities: Arc<CityResolver>,

    /// Schedule lookups
    pub schedules: Arc<ScheduleResolver>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(regions: RegionStore, cache: Cache, upstream: Arc<dyn Upstream>) -> Self {
        let regions = Arc::new(regions);
        let cities = Arc::new(CityResolver::new(
            regions.clone(),
            cache.clone(),
            upstream.clone(),
        ));
        let schedules = Arc::new(ScheduleResolver::new(cities.clone(), cache, upstream));

        Self {
            regions,
            cities,
            schedules,
        }
    }
}
