//! Lookup error types.

use std::path::PathBuf;

use crate::cache::CacheError;
use crate::upstream::UpstreamError;

/// Errors from the state → city → schedule lookup chain.
///
/// The three not-found variants display as the exact messages clients see.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("State not found")]
    StateNotFound,

    #[error("City not found")]
    CityNotFound,

    #[error("Data not found")]
    DataNotFound,

    /// The requested day key is absent from the schedule payload.
    #[error("no schedule entry for date key {0:?}")]
    UnknownDate(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Errors loading the static state list.
#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode state list: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to scrape provinces: {0}")]
    Upstream(#[from] UpstreamError),

    /// Bootstrap scraped no provinces
    #[error("upstream returned no provinces")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_messages_are_client_facing() {
        assert_eq!(LookupError::StateNotFound.to_string(), "State not found");
        assert_eq!(LookupError::CityNotFound.to_string(), "City not found");
        assert_eq!(LookupError::DataNotFound.to_string(), "Data not found");
    }

    #[test]
    fn unknown_date_names_the_key() {
        let err = LookupError::UnknownDate("02-04-2022".into());
        assert_eq!(err.to_string(), "no schedule entry for date key \"02-04-2022\"");
    }
}
