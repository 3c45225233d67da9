//! Prayer-time schedule types as served to clients.

use serde::{Deserialize, Serialize};

/// One day of the imsyakiyah schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// "Weekday, DD/MM/YYYY"
    pub date: String,
    pub imsak: String,
    pub subuh: String,
    /// Sunrise.
    pub syuruk: String,
    pub dhuha: String,
    pub dzuhur: String,
    pub ashar: String,
    pub maghrib: String,
    pub isya: String,
}

/// Location and calendar details accompanying a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMeta {
    pub state: String,
    pub city: String,
    pub year: String,
    pub latitude: String,
    pub longitude: String,
    /// Hijri year.
    pub hijri: String,
}

/// A resolved schedule for one city and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub status: bool,
    pub message: String,
    pub data: Vec<ScheduleEntry>,
    pub meta: ScheduleMeta,
}

impl ScheduleResult {
    /// A successful result.
    pub fn success(data: Vec<ScheduleEntry>, meta: ScheduleMeta) -> Self {
        Self {
            status: true,
            message: "Success".to_string(),
            data,
            meta,
        }
    }
}
