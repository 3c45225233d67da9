//! The state → city → schedule lookup chain.
//!
//! States come from a static file. Cities and schedules are cache-aside
//! lookups: read the cache, otherwise scrape upstream and (conditionally)
//! write the result back.

mod cities;
mod error;
mod schedule;
mod states;

pub use cities::CityResolver;
pub use error::{LookupError, RegionError};
pub use schedule::ScheduleResolver;
pub use states::RegionStore;
