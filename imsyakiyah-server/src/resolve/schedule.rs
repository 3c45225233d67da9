//! Schedule resolver: a city's yearly imsyakiyah, cached per (year, city).

use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::{Cache, CacheKey, Fill};
use crate::domain::{ScheduleEntry, ScheduleResult};
use crate::upstream::{Upstream, UpstreamSchedule};

use super::cities::CityResolver;
use super::error::LookupError;

/// Resolves schedules, scraping the upstream JSON endpoint on a miss.
#[derive(Clone)]
pub struct ScheduleResolver {
    cities: Arc<CityResolver>,
    cache: Cache,
    upstream: Arc<dyn Upstream>,
}

impl ScheduleResolver {
    pub fn new(cities: Arc<CityResolver>, cache: Cache, upstream: Arc<dyn Upstream>) -> Self {
        Self {
            cities,
            cache,
            upstream,
        }
    }

    /// Schedule for `city_id` of `state_id` in `year`.
    ///
    /// Only payloads the site marks as successful are cached; anything else
    /// is served for this call and scraped again next time.
    ///
    /// With `date`, returns just the day stored under that key. The key is
    /// whatever the site uses in its per-day mapping; an absent key is
    /// [`LookupError::UnknownDate`], not a not-found.
    pub async fn get_schedule(
        &self,
        state_id: u32,
        city_id: u32,
        year: &str,
        date: Option<&str>,
    ) -> Result<ScheduleResult, LookupError> {
        let city = self.cities.find_city(state_id, city_id).await?;

        let key = CacheKey::schedule(year, city.id);
        let payload: UpstreamSchedule = self
            .cache
            .get_or_populate(&key, || async {
                info!(city_id, city = %city.name, year, "Scraping schedule");
                let payload = self
                    .upstream
                    .fetch_schedule(&city.state.code, &city.code, year)
                    .await?;

                if payload.is_success() {
                    Ok::<_, LookupError>(Fill::Persist(payload))
                } else {
                    warn!(
                        upstream_message = %payload.message,
                        "Upstream schedule unsuccessful, not caching"
                    );
                    Ok(Fill::Transient(payload))
                }
            })
            .await?;

        let data: Vec<ScheduleEntry> = match date {
            Some(day_key) => {
                let day = payload
                    .data
                    .get(day_key)
                    .ok_or_else(|| LookupError::UnknownDate(day_key.to_string()))?;
                vec![day.to_entry()]
            }
            None => payload.data.iter().map(|(_, day)| day.to_entry()).collect(),
        };

        if data.is_empty() {
            return Err(LookupError::DataNotFound);
        }

        Ok(ScheduleResult::success(data, payload.meta(year)))
    }
}
