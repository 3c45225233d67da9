//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

/// Query for `/state`.
#[derive(Debug, Deserialize)]
pub struct StateQuery {
    /// Case-insensitive substring of the state name
    pub search: Option<String>,
}

/// Query for `/city`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityQuery {
    pub state_id: u32,

    /// Case-insensitive substring of the city name
    pub search: Option<String>,
}

/// Query for `/imsyakiyah`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleQuery {
    pub state_id: u32,
    pub city_id: u32,
    pub year: String,

    /// Key of a single day in the upstream schedule
    pub date: Option<String>,
}

/// Envelope for list endpoints.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub status: bool,
    pub message: String,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn success(data: Vec<T>) -> Self {
        Self {
            status: true,
            message: "Success".to_string(),
            data,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub detail: String,
}
